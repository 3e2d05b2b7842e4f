use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Complaint status label. Any status may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
    Escalated,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 4] = [
        ComplaintStatus::Pending,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
        ComplaintStatus::Escalated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "PENDING",
            ComplaintStatus::InProgress => "IN_PROGRESS",
            ComplaintStatus::Resolved => "RESOLVED",
            ComplaintStatus::Escalated => "ESCALATED",
        }
    }

    /// Closed complaints offer a "re-open" action in the admin views
    pub fn is_closed(&self) -> bool {
        matches!(self, ComplaintStatus::Resolved | ComplaintStatus::Escalated)
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComplaintStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown complaint status: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: i64,
    pub canteen_id: i64,
    pub title: String,
    pub description: String,
    pub status: ComplaintStatus,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub attachment_key: Option<String>,
}

/// Body of `POST /user/complaints`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
    pub canteen_id: i64,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_key: Option<String>,
}

impl crate::view_state::Keyed for Complaint {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

/// Newest first; complaints without a timestamp sink to the end
pub fn sort_newest_first(complaints: &mut [Complaint]) {
    complaints.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub fn filter_by_status(complaints: &[Complaint], status: ComplaintStatus) -> Vec<Complaint> {
    complaints
        .iter()
        .filter(|c| c.status == status)
        .cloned()
        .collect()
}

/// Per-status totals in `ComplaintStatus::ALL` order
pub fn status_counts(complaints: &[Complaint]) -> [(ComplaintStatus, usize); 4] {
    ComplaintStatus::ALL.map(|status| {
        let n = complaints.iter().filter(|c| c.status == status).count();
        (status, n)
    })
}
