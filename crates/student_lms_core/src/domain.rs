//! crates/student_lms_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs mirror what the remote LMS API serves; the client never
//! mutates any of them except `Session`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The authenticated session slice. This is the only client-owned state
/// that survives a restart.
///
/// Invariant: `access_token` and `refresh_token` are both present or both
/// absent, except transiently while a refresh is in flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<Value>,
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// The kind of a coin transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earned,
    Spent,
    Bonus,
    Penalty,
}

impl TransactionKind {
    /// The wire value used by the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Earned => "earned",
            TransactionKind::Spent => "spent",
            TransactionKind::Bonus => "bonus",
            TransactionKind::Penalty => "penalty",
        }
    }
}

/// A single coin transaction. Read-only, server-sourced.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    #[serde(rename = "transaction_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub current: u32,
    pub total: u32,
    #[serde(rename = "totalItems")]
    pub total_items: u64,
}

/// One page of coin history as served by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinsHistoryPage {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// The student header shown on the dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "imgURL", default)]
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Statistics {
    #[serde(rename = "totalCoins", default)]
    pub total_coins: Option<i64>,
    #[serde(rename = "currentLevel", default)]
    pub current_level: Option<u32>,
    #[serde(rename = "currentRank", default)]
    pub current_rank: Option<u32>,
    #[serde(rename = "completedModules", default)]
    pub completed_modules: Option<u32>,
    #[serde(rename = "totalModules", default)]
    pub total_modules: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "imgURL", default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub coins: Option<i64>,
    #[serde(default)]
    pub modules: Option<u32>,
}

/// The full dashboard payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub student: StudentProfile,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// An introduction video card.
#[derive(Debug, Clone, Deserialize)]
pub struct Introduction {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
}

/// A student record. The server is inconsistent about which name fields it
/// populates, so all of them are optional and `display_name` picks the first
/// usable one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Student {
    pub id: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Student {
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        if let Some(full) = &self.full_name {
            return full.clone();
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => "Unknown".to_string(),
        }
    }
}

/// The weekly schedule of a group, split by odd/even/every calendar days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupDays {
    pub odd_days: Vec<String>,
    pub even_days: Vec<String>,
    pub every_days: Vec<String>,
}

/// A group roster entry: either a bare student id or an embedded record.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupMember {
    Id(String),
    Student(Student),
}

impl GroupMember {
    pub fn id(&self) -> &str {
        match self {
            GroupMember::Id(id) => id,
            GroupMember::Student(student) => &student.id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: Option<String>,
    pub time: Option<String>,
    pub days: Option<GroupDays>,
    pub students: Vec<GroupMember>,
}

impl Group {
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "Unnamed group".to_string())
    }

    pub fn has_member(&self, student_id: &str) -> bool {
        self.students.iter().any(|m| m.id() == student_id)
    }
}

/// One student's row in the marks/attendance table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentMarks {
    pub student_id: Option<String>,
    pub marks: Vec<Option<i64>>,
    pub overall: Option<String>,
}
