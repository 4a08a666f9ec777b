use crate::config::AppConfig;
use crate::db::Database;
use crate::models::UserCredentials;
use crate::state::AppState;

// Fresh in-memory state with a cheap bcrypt cost
pub fn test_state() -> AppState {
    let config = AppConfig {
        jwt_secret: "test-secret".to_string(),
        bcrypt_cost: 4,
        event_buffer: 64,
        ..AppConfig::default()
    };
    AppState::new(Database::open_in_memory().unwrap(), &config)
}

// Registers a user and returns (user_id, bearer header value)
pub fn sign_up(state: &AppState, email: &str) -> (String, String) {
    let user = state
        .users
        .register(&UserCredentials {
            email: email.to_string(),
            password: "password123".to_string(),
        })
        .unwrap();
    let token = state.jwt.issue_token(&user).unwrap();
    (user.id, format!("Bearer {}", token))
}
