use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Follow-up task; `completed` and `archived` move independently
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: i64,
    pub team_id: Uuid,
    pub task: String,
    pub completed: bool,
    pub archived: bool,
    pub assignee: Option<String>,
    pub date_created: NaiveDate,
    pub due_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateActionItemRequest {
    pub task: String,
    pub assignee: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ActionItemQuery {
    pub archived: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateActionItemCompletedRequest {
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateActionItemTaskRequest {
    pub task: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateActionItemAssigneeRequest {
    pub assignee: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateActionItemArchivedRequest {
    pub archived: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteActionItemsRequest {
    pub action_item_ids: Vec<i64>,
}
