use serde::Serialize;
use uuid::Uuid;

use super::{ActionItem, Board, Column, Thought};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Update,
    Delete,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Thought,
    Column,
    ActionItem,
    Board,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "resource", content = "data", rename_all = "camelCase")]
pub enum EventPayload {
    Thought(Thought),
    Column(Column),
    ActionItem(ActionItem),
    Board(Board),
    // Deletes only carry the id of what was removed
    Removed { kind: ResourceKind, id: i64 },
}

// Notification fanned out to clients connected to a team
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamEvent {
    pub team_id: Uuid,
    pub event_type: EventType,
    pub payload: EventPayload,
}

impl TeamEvent {
    pub fn update(team_id: Uuid, payload: EventPayload) -> Self {
        Self {
            team_id,
            event_type: EventType::Update,
            payload,
        }
    }

    pub fn delete(team_id: Uuid, kind: ResourceKind, id: i64) -> Self {
        Self {
            team_id,
            event_type: EventType::Delete,
            payload: EventPayload::Removed { kind, id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn delete_event_serializes_only_the_id() {
        let team_id = Uuid::new_v4();
        let event = TeamEvent::delete(team_id, ResourceKind::Thought, 42);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "teamId": team_id.to_string(),
                "eventType": "DELETE",
                "payload": { "resource": "removed", "data": { "kind": "thought", "id": 42 } }
            })
        );
    }
}
