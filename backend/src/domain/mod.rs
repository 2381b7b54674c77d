//! # Domain Module
//!
//! Business rules of the chore board, independent of HTTP and of the chat
//! provider.
//!
//! ## Module Organization
//!
//! - **weekday**: which weekday's chores apply to a date, and its label
//! - **chore_state**: the per-row pending/done state machine with reset-on-read
//! - **board_service**: today's board for the dashboard, and checkbox writes
//! - **digest**: the grouped text summary sent to the chat
//! - **notification_service**: one notifier run, from database to chat
//! - **clock**: injectable wall clock

pub mod board_service;
pub mod chore_state;
pub mod clock;
pub mod digest;
pub mod notification_service;
pub mod weekday;

pub use board_service::BoardService;
pub use chore_state::{Assignment, AssignmentState};
pub use clock::{Clock, FixedClock, SystemClock};
pub use digest::{format_digest, DigestEntry, DigestTemplate};
pub use notification_service::{NotificationService, NotifyOutcome};
pub use weekday::{ChoreDay, WeekdayLocale};
