// Dual-store resume repository: PostgreSQL is authoritative, MongoDB mirrors it.
// Handlers classify ids and validate input; the repository owns the reconciliation.

pub mod handlers;
pub mod id;
pub mod mongo;
pub mod postgres;
pub mod repository;
pub mod store;

#[cfg(test)]
pub mod testing;

pub use repository::{DeletionSummary, ResumeRepository, SaveOutcome};
