use crate::authorization::require_membership;
use crate::errors::ServiceError;
use crate::models::{EventType, TeamEvent};
use crate::state::AppState;
use actix_web::http::header::{self, CacheDirective};
use actix_web::web::Bytes;
use actix_web::{get, web, HttpRequest, HttpResponse};
use futures::stream;
use log::{error, info, warn};
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

/// Server-sent event stream of every mutation published for one team.
///
/// ```text
/// event: update
/// data: {"teamId":"...","eventType":"UPDATE","payload":{...}}
/// ```
#[get("/team/{team_id}/events")]
async fn team_events(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let team_id = path.into_inner();
    let identity = require_membership(&state, &req, &team_id)?;

    info!("📡 User {} subscribed to events of team {}", identity.user_id, team_id);

    let receiver = state.events.subscribe();
    let events = stream::unfold(receiver, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) if event.team_id == team_id => match encode_event(&event) {
                    Some(frame) => return Some((Ok::<_, Infallible>(frame), rx)),
                    None => continue,
                },
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("⚠️ Event subscriber of team {} lagged, skipped {} events", team_id, skipped);
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(header::CacheControl(vec![CacheDirective::NoCache]))
        .streaming(events))
}

fn encode_event(event: &TeamEvent) -> Option<Bytes> {
    let name = match event.event_type {
        EventType::Update => "update",
        EventType::Delete => "delete",
    };
    match serde_json::to_string(event) {
        Ok(data) => Some(Bytes::from(format!("event: {}\ndata: {}\n\n", name, data))),
        Err(e) => {
            error!("❌ Failed to serialize event: {:?}", e);
            None
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(team_events);
}
