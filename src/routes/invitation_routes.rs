use crate::authorization::require_membership;
use crate::errors::ServiceError;
use crate::state::AppState;
use actix_web::http::header;
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use log::{error, info};
use uuid::Uuid;

// Create a new team invite
#[post("/team/{team_id}/invites")]
async fn create_invite(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    let identity = require_membership(&state, &req, &team_id)?;

    info!("📧 User {} creating invite for team {}", identity.user_id, team_id);

    let invite = state.invites.create_invite(&team_id)?;

    Ok(HttpResponse::Created()
        .append_header((
            header::LOCATION,
            format!("/api/team/{}/invites/{}", team_id, invite.id),
        ))
        .json(invite))
}

#[get("/team/{team_id}/invites/{invite_id}")]
async fn get_invite(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, invite_id) = path.into_inner();
    require_membership(&state, &req, &team_id)?;

    match state.invites.get_invite(&team_id, &invite_id)? {
        Some(invite) => Ok(HttpResponse::Ok().json(invite)),
        None => {
            error!("❌ Invite {} not found for team {}", invite_id, team_id);
            Err(ServiceError::InviteNotFound)
        }
    }
}

#[delete("/team/{team_id}/invites/{invite_id}")]
async fn delete_invite(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, invite_id) = path.into_inner();
    require_membership(&state, &req, &team_id)?;

    // Only this team's invites may be deleted through its route
    if state.invites.get_invite(&team_id, &invite_id)?.is_some() {
        state.invites.delete_invite(&invite_id)?;
    }

    Ok(HttpResponse::Ok().finish())
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_invite)
        .service(get_invite)
        .service(delete_invite);
}
