// src/services/user_service.rs
use crate::db::{Database, StoreError};
use crate::errors::ServiceError;
use crate::models::{User, UserCredentials};
use crate::repo::UserRepository;
use crate::utils::password;
use chrono::Utc;
use log::{error, info};
use uuid::Uuid;

/// Account registration and credential checks.
#[derive(Clone)]
pub struct UserService {
    db: Database,
    bcrypt_cost: u32,
    // Verified against for unknown emails so both failures pay one bcrypt check
    dummy_hash: Option<String>,
}

impl UserService {
    pub fn new(db: Database, bcrypt_cost: u32) -> Self {
        let dummy_hash = password::hash_password("retro-service-dummy", bcrypt_cost).ok();
        Self {
            db,
            bcrypt_cost,
            dummy_hash,
        }
    }

    pub fn register(&self, credentials: &UserCredentials) -> Result<User, ServiceError> {
        let email = normalize_email(&credentials.email)?;
        if credentials.password.len() < 8 {
            return Err(ServiceError::BadRequest(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash: password::hash_password(&credentials.password, self.bcrypt_cost)?,
            created_at: Utc::now(),
        };

        self.db.with_conn(|conn| match UserRepository::new(conn).insert(&user) {
            Ok(()) => Ok(()),
            Err(StoreError::UniqueViolation) => {
                error!("❌ Email already registered: {}", user.email);
                Err(ServiceError::BadRequest("Email already registered".to_string()))
            }
            Err(err) => Err(err.into()),
        })?;

        info!("✅ User registered: {}", user.id);
        Ok(user)
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub fn authenticate(&self, credentials: &UserCredentials) -> Result<User, ServiceError> {
        let email = credentials.email.trim().to_lowercase();
        let user = match self
            .db
            .with_conn(|conn| Ok::<_, ServiceError>(UserRepository::new(conn).find_by_email(&email)?))?
        {
            Some(user) => user,
            None => {
                if let Some(dummy) = &self.dummy_hash {
                    password::verify_password(&credentials.password, dummy)?;
                }
                error!("❌ Login for unknown email: {}", email);
                return Err(ServiceError::Unauthorized);
            }
        };

        if !password::verify_password(&credentials.password, &user.password_hash)? {
            error!("❌ Invalid password for user: {}", user.id);
            return Err(ServiceError::Unauthorized);
        }
        Ok(user)
    }

    pub fn find_user(&self, user_id: &str) -> Result<Option<User>, ServiceError> {
        self.db
            .with_conn(|conn| Ok(UserRepository::new(conn).find_by_id(user_id)?))
    }
}

fn normalize_email(raw: &str) -> Result<String, ServiceError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ServiceError::BadRequest("Invalid email address".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::UserService;
    use crate::db::Database;
    use crate::errors::ServiceError;
    use crate::models::UserCredentials;
    use crate::utils::password;

    fn credentials(email: &str, password: &str) -> UserCredentials {
        UserCredentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn register_then_authenticate() {
        let users = UserService::new(Database::open_in_memory().unwrap(), 4);
        let user = users.register(&credentials("Alice@Example.com", "correct horse")).unwrap();
        assert_eq!(user.email, "alice@example.com");

        let logged_in = users.authenticate(&credentials("alice@example.com", "correct horse")).unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(
            users.authenticate(&credentials("alice@example.com", "wrong horse")).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert_eq!(users.find_user(&user.id).unwrap().map(|u| u.email), Some(user.email));
    }

    #[test]
    fn unknown_email_is_checked_against_the_dummy_hash() {
        let users = UserService::new(Database::open_in_memory().unwrap(), 4);
        let dummy = users.dummy_hash.clone().unwrap();
        assert!(dummy.starts_with("$2"));
        assert!(!password::verify_password("correct horse", &dummy).unwrap());

        assert_eq!(
            users.authenticate(&credentials("nobody@example.com", "correct horse")).unwrap_err(),
            ServiceError::Unauthorized
        );
    }

    #[test]
    fn duplicate_and_malformed_registrations_are_rejected() {
        let users = UserService::new(Database::open_in_memory().unwrap(), 4);
        users.register(&credentials("bob@example.com", "hunter2hunter2")).unwrap();

        assert!(matches!(
            users.register(&credentials("BOB@example.com", "hunter2hunter2")),
            Err(ServiceError::BadRequest(_))
        ));
        assert!(matches!(
            users.register(&credentials("not-an-email", "hunter2hunter2")),
            Err(ServiceError::BadRequest(_))
        ));
        assert!(matches!(
            users.register(&credentials("carol@example.com", "short")),
            Err(ServiceError::BadRequest(_))
        ));
    }
}
