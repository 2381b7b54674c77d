//! Repositories over the three chore tables

pub mod assignment_repository;
pub mod child_repository;

pub use assignment_repository::AssignmentRepository;
pub use child_repository::ChildRepository;
