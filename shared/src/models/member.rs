//! Member Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;

/// Enrollment status; only active members receive payment rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            other => Err(AppError::validation(format!("unknown member status: {other}"))),
        }
    }
}

/// Member entity (club member eligible for fee collection)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    /// Phonetic reading, used for roster ordering
    pub furigana: String,
    pub position: String,
    pub contact: String,
    pub address: String,
    pub status: MemberStatus,
    pub created_at: i64,
}

impl Member {
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

/// Create member payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberCreate {
    pub name: String,
    #[serde(default)]
    pub furigana: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub address: String,
}

/// Update member payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub furigana: Option<String>,
    pub position: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub status: Option<MemberStatus>,
}
