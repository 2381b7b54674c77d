use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A child on the chore board. Managed outside this system, read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub name: String,
}

/// A chore definition (e.g. "Dishes"). Managed outside this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoreDefinition {
    pub id: i64,
    pub description: String,
}

/// Stored status of a chore assignment row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoreStatus {
    Pending,
    Done,
}

impl ChoreStatus {
    /// Status produced by a checkbox toggle
    pub fn from_done(done: bool) -> Self {
        if done {
            ChoreStatus::Done
        } else {
            ChoreStatus::Pending
        }
    }

    /// Value stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            ChoreStatus::Pending => "pending",
            ChoreStatus::Done => "done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ChoreStatus::Done)
    }
}

impl fmt::Display for ChoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChoreStatus {
    type Err = ChoreStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ChoreStatus::Pending),
            "done" => Ok(ChoreStatus::Done),
            other => Err(ChoreStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoreStatusError(pub String);

impl fmt::Display for ChoreStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid chore status: {}", self.0)
    }
}

impl std::error::Error for ChoreStatusError {}

/// One chore as shown on today's board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayChore {
    pub assignment_id: i64,
    pub description: String,
    /// Status as it applies to today (stale rows are reported as pending)
    pub status: ChoreStatus,
}

/// A child's column on today's board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildBoard {
    pub child: Child,
    pub chores: Vec<TodayChore>,
}

/// Everything the dashboard needs to render today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayBoardResponse {
    pub date: NaiveDate,
    /// Localized weekday label, `None` on rest days
    pub weekday_label: Option<String>,
    pub children: Vec<ChildBoard>,
}

impl TodayBoardResponse {
    pub fn is_rest_day(&self) -> bool {
        self.weekday_label.is_none()
    }
}

/// Request body for toggling an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkChoreRequest {
    pub done: bool,
}

/// State of an assignment after a write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkChoreResponse {
    pub assignment_id: i64,
    pub status: ChoreStatus,
    pub updated_on: NaiveDate,
}
