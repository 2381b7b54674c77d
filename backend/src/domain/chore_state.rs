//! # Chore State Machine
//!
//! An assignment row is a recurring weekly slot (child, chore, weekday) that
//! is reused week after week. Its stored status only counts for the day in
//! `updated_on`; on any other day the row reads as pending. Nothing ever
//! resets rows eagerly: staleness is resolved on every read.
//!
//! The only write is [`AssignmentState::mark`], which sets the status and
//! always stamps today, including when a chore is unchecked.

use chrono::{NaiveDate, Weekday};
use shared::ChoreStatus;

/// Mutable part of an assignment row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentState {
    pub status: ChoreStatus,
    /// Day of the last write, `None` for rows never touched
    pub updated_on: Option<NaiveDate>,
}

impl AssignmentState {
    pub fn new(status: ChoreStatus, updated_on: Option<NaiveDate>) -> Self {
        Self { status, updated_on }
    }

    /// Whether the stored status was written on a day other than `today`
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.updated_on != Some(today)
    }

    /// Status as it applies to `today`
    pub fn effective_status(&self, today: NaiveDate) -> ChoreStatus {
        if self.is_stale(today) {
            ChoreStatus::Pending
        } else {
            self.status
        }
    }

    /// Still needs doing today
    pub fn is_actionable(&self, today: NaiveDate) -> bool {
        self.effective_status(today) == ChoreStatus::Pending
    }

    /// Write transition for a checkbox toggle
    pub fn mark(done: bool, today: NaiveDate) -> Self {
        Self {
            status: ChoreStatus::from_done(done),
            updated_on: Some(today),
        }
    }
}

/// An assignment row joined with its chore description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: i64,
    pub child_id: i64,
    pub chore_id: i64,
    pub description: String,
    pub weekday: Weekday,
    pub state: AssignmentState,
}
