use crate::authorization::{require_membership, require_ownership};
use crate::errors::ServiceError;
use crate::models::{Column, UpdateColumnTitleRequest};
use crate::state::AppState;
use actix_web::{get, put, web, HttpRequest, HttpResponse};
use uuid::Uuid;

#[get("/team/{team_id}/columns")]
async fn get_columns(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    require_membership(&state, &req, &team_id)?;

    Ok(HttpResponse::Ok().json(state.columns.get_columns(&team_id)?))
}

#[put("/team/{team_id}/column/{column_id}/title")]
async fn edit_column_title(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, i64)>,
    data: web::Json<UpdateColumnTitleRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (team_id, column_id) = path.into_inner();
    require_ownership::<Column>(&state, &req, &team_id, column_id)?;

    let column = state.columns.edit_title(&team_id, column_id, &data.title)?;
    Ok(HttpResponse::Ok().json(column))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_columns).service(edit_column_title);
}
