use crate::errors::ServiceError;
use crate::models::Identity;
use crate::state::AppState;
use crate::utils::get_identity_from_request;
use actix_web::HttpRequest;
use log::error;
use uuid::Uuid;

use super::{OwnedResource, ResourceOwnershipChecker};

/// Resolves the caller and requires membership of `team_id`.
pub fn require_membership(state: &AppState, req: &HttpRequest, team_id: &Uuid) -> Result<Identity, ServiceError> {
    let identity = get_identity_from_request(req)?;
    if !state.membership.is_member_of_team(&identity, team_id)? {
        error!("❌ User {} is not a member of team {}", identity.user_id, team_id);
        return Err(ServiceError::Forbidden);
    }
    Ok(identity)
}

/// Resolves the caller and requires membership of `team_id` plus team
/// ownership of the `R` identified by `resource_id`.
pub fn require_ownership<R: OwnedResource>(
    state: &AppState,
    req: &HttpRequest,
    team_id: &Uuid,
    resource_id: i64,
) -> Result<Identity, ServiceError> {
    let identity = get_identity_from_request(req)?;
    let checker = ResourceOwnershipChecker::<R>::new(state.db.clone());
    if !checker.request_is_authorized(&identity, team_id, resource_id)? {
        error!(
            "❌ User {} denied access to {:?} {} of team {}",
            identity.user_id,
            checker.kind(),
            resource_id,
            team_id
        );
        return Err(ServiceError::Forbidden);
    }
    Ok(identity)
}
