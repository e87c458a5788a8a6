//! Team and Profile Models
//!
//! A team is the tenant boundary: every other row carries a `team_id`.
//! A profile is the account behind a caller identity.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;

/// Team entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

/// Profile role inside a team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            other => Err(AppError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// Caller account (one per identity-provider subject)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Identity-provider subject
    pub id: String,
    /// None until the account is onboarded into a team
    pub team_id: Option<i64>,
    pub role: Role,
    pub display_name: String,
}

/// Profile together with its team (for "who am I" views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileWithTeam {
    #[serde(flatten)]
    pub profile: Profile,
    pub team: Option<Team>,
}

/// Invite payload: attach an existing or new identity to the caller's team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInvite {
    pub profile_id: String,
    #[serde(default)]
    pub display_name: String,
}

/// Rename payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRename {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_serialize() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("member".parse::<Role>().unwrap(), Role::Member);
        assert!("owner".parse::<Role>().is_err());
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert!(Role::Admin.is_admin());
        assert!(!Role::Member.is_admin());
    }
}
