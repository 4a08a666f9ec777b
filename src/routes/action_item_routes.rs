use crate::authorization::{require_membership, require_ownership};
use crate::errors::ServiceError;
use crate::models::{
    ActionItem, ActionItemQuery, CreateActionItemRequest, DeleteActionItemsRequest,
    UpdateActionItemArchivedRequest, UpdateActionItemAssigneeRequest,
    UpdateActionItemCompletedRequest, UpdateActionItemTaskRequest,
};
use crate::state::AppState;
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use log::info;
use serde_json::json;
use uuid::Uuid;

#[post("/team/{team_id}/action-item")]
async fn create_action_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    data: web::Json<CreateActionItemRequest>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    let identity = require_membership(&state, &req, &team_id)?;

    info!("📌 User {} adding action item to team {}", identity.user_id, team_id);

    let item = state.action_items.create_action_item(&team_id, &data)?;
    Ok(HttpResponse::Created().json(item))
}

#[get("/team/{team_id}/action-item")]
async fn get_action_items(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ActionItemQuery>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    require_membership(&state, &req, &team_id)?;

    let items = state.action_items.get_action_items(&team_id, query.archived)?;
    Ok(HttpResponse::Ok().json(items))
}

#[put("/team/{team_id}/action-item/{item_id}/completed")]
async fn update_completed(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
    data: web::Json<UpdateActionItemCompletedRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, item_id) = path.into_inner();
    require_ownership::<ActionItem>(&state, &req, &team_id, item_id)?;

    let item = state
        .action_items
        .update_completed_status(&team_id, item_id, data.completed)?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/team/{team_id}/action-item/{item_id}/task")]
async fn update_task(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
    data: web::Json<UpdateActionItemTaskRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, item_id) = path.into_inner();
    require_ownership::<ActionItem>(&state, &req, &team_id, item_id)?;

    let item = state.action_items.update_task(&team_id, item_id, &data.task)?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/team/{team_id}/action-item/{item_id}/assignee")]
async fn update_assignee(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
    data: web::Json<UpdateActionItemAssigneeRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, item_id) = path.into_inner();
    require_ownership::<ActionItem>(&state, &req, &team_id, item_id)?;

    let item = state
        .action_items
        .update_assignee(&team_id, item_id, data.assignee.as_deref())?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/team/{team_id}/action-item/{item_id}/archived")]
async fn update_archived(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
    data: web::Json<UpdateActionItemArchivedRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, item_id) = path.into_inner();
    require_ownership::<ActionItem>(&state, &req, &team_id, item_id)?;

    let item = state
        .action_items
        .update_archived_status(&team_id, item_id, data.archived)?;
    Ok(HttpResponse::Ok().json(item))
}

#[delete("/team/{team_id}/action-item/{item_id}")]
async fn delete_action_item(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, item_id) = path.into_inner();
    require_ownership::<ActionItem>(&state, &req, &team_id, item_id)?;

    state.action_items.delete_one(&team_id, item_id)?;
    Ok(HttpResponse::Ok().finish())
}

// Bulk delete; ids owned by other teams are ignored
#[delete("/team/{team_id}/action-item")]
async fn delete_action_items(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    data: web::Json<DeleteActionItemsRequest>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    require_membership(&state, &req, &team_id)?;

    let deleted = state
        .action_items
        .delete_multiple(&team_id, &data.action_item_ids)?;
    Ok(HttpResponse::Ok().json(json!({ "deletedIds": deleted })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_action_item)
        .service(get_action_items)
        .service(update_completed)
        .service(update_task)
        .service(update_assignee)
        .service(update_archived)
        .service(delete_action_item)
        .service(delete_action_items);
}
