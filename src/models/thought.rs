use serde::{Deserialize, Serialize};
use uuid::Uuid;

// A single note in a column; `board_id == None` means it is still active
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: i64,
    pub team_id: Uuid,
    pub board_id: Option<i64>,
    pub column_id: i64,
    pub message: String,
    pub heart_count: i64,
    pub discussed: bool,
}

impl Thought {
    pub fn is_active(&self) -> bool {
        self.board_id.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateThoughtRequest {
    pub message: String,
    pub column_id: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateThoughtDiscussedRequest {
    pub discussed: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MoveThoughtRequest {
    pub column_id: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateThoughtMessageRequest {
    pub message: String,
}
