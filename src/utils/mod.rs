use crate::errors::ServiceError;
use crate::models::{Claims, Identity, User};
use actix_web::http::header;
use actix_web::{dev::ServiceRequest, HttpMessage, HttpRequest};
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::error;
use std::sync::Arc;

// JWT utility functions
pub mod jwt {
    use super::*;

    struct KeyMaterial {
        encoding: EncodingKey,
        decoding: DecodingKey,
        ttl: Duration,
    }

    /// HS256 signing and verification keys, built once from the configured secret.
    #[derive(Clone)]
    pub struct JwtKeys {
        inner: Arc<KeyMaterial>,
    }

    impl JwtKeys {
        pub fn new(secret: &str, ttl_hours: i64) -> Self {
            Self {
                inner: Arc::new(KeyMaterial {
                    encoding: EncodingKey::from_secret(secret.as_bytes()),
                    decoding: DecodingKey::from_secret(secret.as_bytes()),
                    ttl: Duration::hours(ttl_hours.max(1)),
                }),
            }
        }

        // Generate a new JWT token for a user
        pub fn issue_token(&self, user: &User) -> Result<String, ServiceError> {
            let now = Utc::now();
            let claims = Claims {
                sub: user.id.clone(),
                email: user.email.clone(),
                exp: (now + self.inner.ttl).timestamp() as usize,
                iat: now.timestamp() as usize,
            };

            encode(&Header::default(), &claims, &self.inner.encoding).map_err(|e| {
                error!("❌ Failed to sign token: {:?}", e);
                ServiceError::InternalServerError
            })
        }

        // Validate and decode a JWT token
        pub fn decode_token(&self, token: &str) -> Result<Claims, ServiceError> {
            decode::<Claims>(token, &self.inner.decoding, &Validation::default())
                .map(|data| data.claims)
                .map_err(|_| ServiceError::Unauthorized)
        }
    }

    // Extract JWT from Authorization header
    pub fn extract_token_from_header(auth_header: &str) -> Result<&str, ServiceError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(ServiceError::Unauthorized),
        }
    }
}

// Password utility functions
pub mod password {
    use super::*;

    // Hash a password using bcrypt
    pub fn hash_password(password: &str, cost: u32) -> Result<String, ServiceError> {
        hash(password, cost).map_err(|e| {
            error!("❌ Failed to hash password: {:?}", e);
            ServiceError::InternalServerError
        })
    }

    // Verify a password against a hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
        verify(password, hash).map_err(|e| {
            error!("❌ Failed to verify password: {:?}", e);
            ServiceError::InternalServerError
        })
    }
}

// Middleware for JWT authentication
pub mod auth_middleware {
    use super::*;
    use actix_web::body::EitherBody;
    use actix_web::dev::{forward_ready, Service, ServiceResponse, Transform};
    use actix_web::{Error, ResponseError};
    use futures::future::{ok, LocalBoxFuture, Ready};

    /// Rejects requests without a valid bearer token; stores the verified
    /// `Claims` in request extensions otherwise.
    pub struct Authentication {
        keys: jwt::JwtKeys,
    }

    impl Authentication {
        pub fn new(keys: jwt::JwtKeys) -> Self {
            Self { keys }
        }
    }

    impl<S, B> Transform<S, ServiceRequest> for Authentication
    where
        S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = ServiceResponse<EitherBody<B>>;
        type Error = Error;
        type Transform = AuthenticationMiddleware<S>;
        type InitError = ();
        type Future = Ready<Result<Self::Transform, Self::InitError>>;

        fn new_transform(&self, service: S) -> Self::Future {
            ok(AuthenticationMiddleware {
                service,
                keys: self.keys.clone(),
            })
        }
    }

    pub struct AuthenticationMiddleware<S> {
        service: S,
        keys: jwt::JwtKeys,
    }

    impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
    where
        S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = ServiceResponse<EitherBody<B>>;
        type Error = Error;
        type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

        forward_ready!(service);

        fn call(&self, req: ServiceRequest) -> Self::Future {
            // CORS preflight carries no credentials
            if req.method() == actix_web::http::Method::OPTIONS {
                let fut = self.service.call(req);
                return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
            }

            let claims = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .ok_or(ServiceError::Unauthorized)
                .and_then(jwt::extract_token_from_header)
                .and_then(|token| self.keys.decode_token(token));

            match claims {
                Ok(claims) => {
                    // Add the claims to the request extensions
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
                }
                Err(err) => {
                    error!("❌ Rejected unauthenticated request to {}", req.path());
                    let response = err.error_response();
                    Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
                }
            }
        }
    }
}

/// Identity of the caller, as verified by the authentication middleware.
pub fn get_identity_from_request(req: &HttpRequest) -> Result<Identity, ServiceError> {
    req.extensions()
        .get::<Claims>()
        .map(Identity::from)
        .ok_or_else(|| {
            error!("❌ No verified claims on request to {}", req.path());
            ServiceError::Unauthorized
        })
}

#[cfg(test)]
mod tests {
    use super::jwt::{extract_token_from_header, JwtKeys};
    use super::password::{hash_password, verify_password};
    use crate::errors::ServiceError;
    use crate::models::User;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: "user-1".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_tokens_decode_with_the_same_secret_only() {
        let keys = JwtKeys::new("first-secret", 1);
        let token = keys.issue_token(&user()).unwrap();

        let claims = keys.decode_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.exp > claims.iat);

        let other = JwtKeys::new("second-secret", 1);
        assert_eq!(other.decode_token(&token).unwrap_err(), ServiceError::Unauthorized);
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token_from_header("Bearer abc.def").unwrap(), "abc.def");
        assert!(extract_token_from_header("Basic abc").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }

    #[test]
    fn password_hash_verifies() {
        let hashed = hash_password("correct horse", 4).unwrap();
        assert!(verify_password("correct horse", &hashed).unwrap());
        assert!(!verify_password("wrong horse", &hashed).unwrap());
    }
}
