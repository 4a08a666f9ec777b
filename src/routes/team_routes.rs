use crate::authorization::require_membership;
use crate::errors::ServiceError;
use crate::models::{AddUserToTeamRequest, CreateTeamRequest};
use crate::state::AppState;
use crate::utils::get_identity_from_request;
use actix_web::http::header;
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use log::{error, info};
use uuid::Uuid;

// Create a new team with the caller as first member
#[post("/team")]
async fn create_team(
    state: web::Data<AppState>,
    req: HttpRequest,
    data: web::Json<CreateTeamRequest>,
) -> Result<HttpResponse, ServiceError> {
    let identity = get_identity_from_request(&req)?;

    info!("📝 Creating new team: {} for user: {}", data.name, identity.user_id);

    let team = state.teams.create_team(&data.name, &identity.user_id)?;

    Ok(HttpResponse::Created()
        .append_header((header::LOCATION, format!("/api/team/{}", team.id)))
        .json(team))
}

// Get all teams for the current user
#[get("/team")]
async fn get_user_teams(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    let identity = get_identity_from_request(&req)?;

    info!("📋 Fetching teams for user: {}", identity.user_id);

    let teams = state.teams.list_teams_for_user(&identity.user_id)?;

    info!("✅ Found {} teams for user: {}", teams.len(), identity.user_id);

    Ok(HttpResponse::Ok().json(teams))
}

// Get a specific team by ID
#[get("/team/{team_id}")]
async fn get_team(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    require_membership(&state, &req, &team_id)?;

    match state.teams.get_team(&team_id)? {
        Some(team) => Ok(HttpResponse::Ok().json(team)),
        None => {
            error!("❌ Team not found: {}", team_id);
            Err(ServiceError::TeamNotFound)
        }
    }
}

// Join a team through one of its invites
#[post("/team/{team_id}/users")]
async fn add_user_to_team(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    data: web::Json<AddUserToTeamRequest>,
) -> Result<HttpResponse, ServiceError> {
    let identity = get_identity_from_request(&req)?;
    let team_id = path.into_inner();

    info!("👥 User {} joining team {} with invite {}", identity.user_id, team_id, data.invite_id);

    state.teams.add_user(&team_id, &identity.user_id, &data.invite_id)?;

    Ok(HttpResponse::Ok().finish())
}

// List the memberships of a team
#[get("/team/{team_id}/users")]
async fn get_team_members(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    require_membership(&state, &req, &team_id)?;

    let members = state.teams.list_members(&team_id)?;
    Ok(HttpResponse::Ok().json(members))
}

// Remove a user from a team
#[delete("/team/{team_id}/users/{user_id}")]
async fn remove_user_from_team(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, user_id) = path.into_inner();
    let identity = require_membership(&state, &req, &team_id)?;

    info!("👋 User {} removing {} from team {}", identity.user_id, user_id, team_id);

    state.teams.remove_user(&team_id, &user_id)?;

    Ok(HttpResponse::Ok().finish())
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_team)
        .service(get_user_teams)
        .service(get_team)
        .service(add_user_to_team)
        .service(get_team_members)
        .service(remove_user_from_team);
}
