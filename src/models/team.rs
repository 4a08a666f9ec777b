use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

const MAX_TEAM_NAME_CHARS: usize = 64;

lazy_static! {
    // Control characters and path separators would corrupt the uri
    static ref FORBIDDEN_NAME_CHARS: Regex = Regex::new(r"[\p{Cc}/\\]").unwrap();
}

// Team model; the tenant boundary for every other resource
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
        }
    }

    // Unique key used to detect colliding team names
    pub fn uri(&self) -> String {
        team_uri(&self.name)
    }
}

pub fn team_uri(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

pub fn validate_team_name(name: &str) -> Result<(), ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::BadRequest("Team name cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_TEAM_NAME_CHARS {
        return Err(ServiceError::BadRequest(format!(
            "Team name cannot exceed {} characters",
            MAX_TEAM_NAME_CHARS
        )));
    }
    if FORBIDDEN_NAME_CHARS.is_match(trimmed) {
        return Err(ServiceError::BadRequest(
            "Team name cannot contain control characters or slashes".to_string(),
        ));
    }
    Ok(())
}

// Proof that a user belongs to a team
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: i64,
    pub team_id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CreateTeamRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddUserToTeamRequest {
    pub invite_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_is_lowercase_and_hyphenated() {
        assert_eq!(team_uri("  Team Alpha "), "team-alpha");
        assert_eq!(Team::new("Team Alpha").uri(), team_uri("team alpha"));
        assert_eq!(team_uri("Équipe Rouge"), "équipe-rouge");
    }

    #[test]
    fn team_name_validation() {
        assert!(validate_team_name("Alpha Team_2").is_ok());
        for name in ["Équipe Rouge", "R&D", "Team #1", "Kaffee Küche"] {
            assert!(validate_team_name(name).is_ok(), "{name} should be accepted");
        }
        assert!(validate_team_name("   ").is_err());
        assert!(validate_team_name("alpha/../beta").is_err());
        assert!(validate_team_name("tab\tname").is_err());
        assert!(validate_team_name(&"a".repeat(65)).is_err());
    }
}
