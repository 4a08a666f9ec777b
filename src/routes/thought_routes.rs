use crate::authorization::{require_membership, require_ownership};
use crate::errors::ServiceError;
use crate::models::{
    CreateThoughtRequest, MoveThoughtRequest, Thought, UpdateThoughtDiscussedRequest,
    UpdateThoughtMessageRequest,
};
use crate::state::AppState;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use log::info;
use uuid::Uuid;

#[post("/team/{team_id}/thought")]
async fn create_thought(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    data: web::Json<CreateThoughtRequest>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    let identity = require_membership(&state, &req, &team_id)?;

    info!("💭 User {} adding thought to team {}", identity.user_id, team_id);

    let thought = state
        .thoughts
        .create_thought(&team_id, &data.message, data.column_id)?;
    Ok(HttpResponse::Created().json(thought))
}

#[get("/team/{team_id}/thoughts")]
async fn get_thoughts(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    require_membership(&state, &req, &team_id)?;

    let thoughts = state.thoughts.fetch_all_active_thoughts(&team_id)?;
    Ok(HttpResponse::Ok().json(thoughts))
}

#[put("/team/{team_id}/thought/{thought_id}/heart")]
async fn like_thought(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, thought_id) = path.into_inner();
    require_ownership::<Thought>(&state, &req, &team_id, thought_id)?;

    let thought = state.thoughts.like_thought(&team_id, thought_id)?;
    Ok(HttpResponse::Ok().json(thought))
}

#[put("/team/{team_id}/thought/{thought_id}/discuss")]
async fn discuss_thought(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
    data: web::Json<UpdateThoughtDiscussedRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, thought_id) = path.into_inner();
    require_ownership::<Thought>(&state, &req, &team_id, thought_id)?;

    let thought = state
        .thoughts
        .discuss_thought(&team_id, thought_id, data.discussed)?;
    Ok(HttpResponse::Ok().json(thought))
}

#[put("/team/{team_id}/thought/{thought_id}/column-id")]
async fn move_thought(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
    data: web::Json<MoveThoughtRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, thought_id) = path.into_inner();
    require_ownership::<Thought>(&state, &req, &team_id, thought_id)?;

    let thought = state
        .thoughts
        .update_column(&team_id, thought_id, data.column_id)?;
    Ok(HttpResponse::Ok().json(thought))
}

#[put("/team/{team_id}/thought/{thought_id}/message")]
async fn update_thought_message(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
    data: web::Json<UpdateThoughtMessageRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, thought_id) = path.into_inner();
    require_ownership::<Thought>(&state, &req, &team_id, thought_id)?;

    let thought = state
        .thoughts
        .update_thought_message(&team_id, thought_id, &data.message)?;
    Ok(HttpResponse::Ok().json(thought))
}

#[delete("/team/{team_id}/thought/{thought_id}")]
async fn delete_thought(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, thought_id) = path.into_inner();
    let identity = require_ownership::<Thought>(&state, &req, &team_id, thought_id)?;

    info!("🗑️ User {} deleting thought {} of team {}", identity.user_id, thought_id, team_id);

    state.thoughts.delete_thought(&team_id, thought_id)?;
    Ok(HttpResponse::Ok().finish())
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_thought)
        .service(get_thoughts)
        .service(like_thought)
        .service(discuss_thought)
        .service(move_thought)
        .service(update_thought_message)
        .service(delete_thought);
}
