use serde::{Deserialize, Serialize};
use uuid::Uuid;

// (topic, title) pairs every new team starts with
pub const DEFAULT_COLUMNS: [(&str, &str); 3] = [
    ("happy", "Happy"),
    ("confused", "Confused"),
    ("unhappy", "Sad"),
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: i64,
    pub team_id: Uuid,
    pub topic: String,
    pub title: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateColumnTitleRequest {
    pub title: String,
}
