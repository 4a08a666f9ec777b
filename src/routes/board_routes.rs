use crate::authorization::{require_membership, require_ownership};
use crate::errors::ServiceError;
use crate::models::{Board, BoardPageQuery, CreateBoardRequest, DeleteBoardsRequest};
use crate::state::AppState;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use log::info;
use serde_json::json;
use uuid::Uuid;

#[post("/team/{team_id}/board")]
async fn create_board(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    data: Option<web::Json<CreateBoardRequest>>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    let identity = require_membership(&state, &req, &team_id)?;

    info!("🧾 User {} opening a board for team {}", identity.user_id, team_id);

    let description = data.as_ref().and_then(|body| body.description.as_deref());
    let board = state.boards.create_board(&team_id, description)?;
    Ok(HttpResponse::Created().json(board))
}

#[get("/team/{team_id}/boards")]
async fn list_boards(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<BoardPageQuery>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    require_membership(&state, &req, &team_id)?;

    let boards = state.boards.list_boards(&team_id, &query)?;
    Ok(HttpResponse::Ok().json(boards))
}

#[get("/team/{team_id}/boards/{board_id}")]
async fn get_board(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, board_id) = path.into_inner();
    require_ownership::<Board>(&state, &req, &team_id, board_id)?;

    Ok(HttpResponse::Ok().json(state.boards.get_board(&team_id, board_id)?))
}

#[delete("/team/{team_id}/board/{board_id}")]
async fn delete_board(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, board_id) = path.into_inner();
    require_ownership::<Board>(&state, &req, &team_id, board_id)?;

    state.boards.delete_board(&team_id, board_id)?;
    Ok(HttpResponse::Ok().finish())
}

// Bulk delete; ids owned by other teams are ignored
#[delete("/team/{team_id}/boards")]
async fn delete_boards(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    data: web::Json<DeleteBoardsRequest>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    require_membership(&state, &req, &team_id)?;

    let deleted = state.boards.delete_boards(&team_id, &data.board_ids)?;
    Ok(HttpResponse::Ok().json(json!({ "deletedIds": deleted })))
}

#[put("/team/{team_id}/end-retro")]
async fn end_retro(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    let identity = require_membership(&state, &req, &team_id)?;

    info!("🏁 User {} ending the retro of team {}", identity.user_id, team_id);

    let board = state.boards.end_retro(&team_id)?;
    Ok(HttpResponse::Ok().json(board))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_board)
        .service(list_boards)
        .service(get_board)
        .service(delete_board)
        .service(delete_boards)
        .service(end_retro);
}
