// src/errors.rs
use crate::db::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use log::error;

// Domain errors raised by services and guards
#[derive(Debug, Display, PartialEq, Eq)]
pub enum ServiceError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,
    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),
    #[display(fmt = "Unauthorized")]
    Unauthorized,
    #[display(fmt = "Forbidden")]
    Forbidden,
    #[display(fmt = "Team not found")]
    TeamNotFound,
    #[display(fmt = "Team already exists")]
    TeamAlreadyExists,
    #[display(fmt = "Invite not found")]
    InviteNotFound,
    #[display(fmt = "Invite expired")]
    InviteExpired,
    #[display(fmt = "Thought {} not found", _0)]
    ThoughtNotFound(i64),
    #[display(fmt = "Column not found")]
    ColumnNotFound,
    #[display(fmt = "Action item not found")]
    ActionItemNotFound,
    #[display(fmt = "Board not found")]
    BoardNotFound,
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::TeamNotFound
                | ServiceError::InviteNotFound
                | ServiceError::ThoughtNotFound(_)
                | ServiceError::ColumnNotFound
                | ServiceError::ActionItemNotFound
                | ServiceError::BoardNotFound
        )
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        error!("❌ Store failure: {}", err);
        ServiceError::InternalServerError
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::BadRequest(_) | ServiceError::InviteExpired => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::TeamAlreadyExists => StatusCode::CONFLICT,
            _ if self.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Not-found variants share one body so callers can't tell which lookup failed
        if self.is_not_found() {
            return HttpResponse::NotFound().json("Not Found");
        }
        match self {
            ServiceError::InternalServerError => {
                HttpResponse::InternalServerError().json("Internal Server Error")
            }
            ServiceError::BadRequest(ref message) => HttpResponse::BadRequest().json(message),
            ServiceError::InviteExpired => HttpResponse::BadRequest().json("Invite expired"),
            ServiceError::Unauthorized => HttpResponse::Unauthorized().json("Unauthorized"),
            ServiceError::Forbidden => HttpResponse::Forbidden()
                .json("Forbidden: You don't have permission to access this resource"),
            ServiceError::TeamAlreadyExists => {
                HttpResponse::Conflict().json("A team with this name already exists")
            }
            _ => HttpResponse::InternalServerError().json("Internal Server Error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn not_found_variants_map_to_404() {
        let uniform = ServiceError::TeamNotFound.error_response();
        for err in [
            ServiceError::TeamNotFound,
            ServiceError::InviteNotFound,
            ServiceError::ThoughtNotFound(7),
            ServiceError::ColumnNotFound,
            ServiceError::ActionItemNotFound,
            ServiceError::BoardNotFound,
        ] {
            assert!(err.is_not_found());
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
            assert_eq!(err.error_response().status(), uniform.status());
        }
        for err in [ServiceError::Forbidden, ServiceError::InviteExpired, ServiceError::InternalServerError] {
            assert!(!err.is_not_found());
        }
    }

    #[test]
    fn lifecycle_errors_map_to_expected_statuses() {
        assert_eq!(ServiceError::TeamAlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(ServiceError::InviteExpired.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ServiceError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }
}
