use crate::errors::ServiceError;
use crate::models::{LoginResponse, UserCredentials};
use crate::state::AppState;
use crate::utils::get_identity_from_request;
use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use log::{debug, error, info};
use serde_json::json;

// Register a new user
#[post("/register")]
async fn register(
    state: web::Data<AppState>,
    credentials: web::Json<UserCredentials>,
) -> Result<HttpResponse, ServiceError> {
    info!("📝 Register request for email: {}", credentials.email);

    let user = state.users.register(&credentials)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "User registered successfully",
        "userId": user.id
    })))
}

// Login and get JWT token
#[post("/login")]
async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<UserCredentials>,
) -> Result<HttpResponse, ServiceError> {
    info!("🔑 Login request for email: {}", credentials.email);

    let user = state.users.authenticate(&credentials)?;
    let token = state.jwt.issue_token(&user)?;

    info!("✅ User logged in successfully: {}", user.id);

    // Return token in headers as well as response body
    let response = LoginResponse {
        token: token.clone(),
        user_id: user.id,
        email: user.email,
    };

    Ok(HttpResponse::Ok()
        .append_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .json(response))
}

// Get current user info (requires authentication)
#[get("/users/me")]
async fn me(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    debug!("👤 Get user info request");

    let identity = get_identity_from_request(&req)?;
    match state.users.find_user(&identity.user_id)? {
        Some(user) => Ok(HttpResponse::Ok().json(json!({
            "userId": user.id,
            "email": user.email,
            "createdAt": user.created_at
        }))),
        None => {
            error!("❌ Token subject has no account: {}", identity.user_id);
            Err(ServiceError::Unauthorized)
        }
    }
}

// Public routes, mounted under /api/auth
pub fn init_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login);
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(me);
}
