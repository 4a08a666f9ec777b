// src/models/invitations.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Invites stay usable for this many hours after creation
pub const INVITE_TTL_HOURS: i64 = 3;

// Team invite; any holder may join the team while it is valid
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub id: Uuid,
    pub team_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    pub fn new(team_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            created_at: Utc::now(),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::hours(INVITE_TTL_HOURS)
    }

    // Still valid at exactly `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
