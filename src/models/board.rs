use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Column, Thought};

pub const DEFAULT_PAGE_SIZE: u32 = 30;
pub const MAX_PAGE_SIZE: u32 = 100;

// Archived retrospective; columns and thoughts are frozen when the retro ends
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: i64,
    pub team_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub active: bool,
    pub columns: Vec<Column>,
    pub thoughts: Vec<Thought>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CreateBoardRequest {
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBoardsRequest {
    pub board_ids: Vec<i64>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BoardPageQuery {
    pub page_index: Option<u32>,
    pub page_size: Option<u32>,
}

impl BoardPageQuery {
    // (limit, offset) with the page size clamped to 1..=MAX_PAGE_SIZE
    pub fn limit_offset(&self) -> (u32, u32) {
        let size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let index = self.page_index.unwrap_or(0);
        (size, index.saturating_mul(size))
    }
}
