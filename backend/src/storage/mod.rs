//! # Storage Module
//!
//! Persistence for the chore board: the SQLite connection handle and the
//! repositories over the `children`, `chores` and `chore_assignments` tables.
//!
//! All access goes through parameterized queries. Row-level updates are the
//! only writes; concurrent edits resolve as last write wins.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{AssignmentRepository, ChildRepository};
