//! Practice Session Engine
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store traits, progress aggregation
//! - `application/` - Use cases
//! - `infra/` - Store implementations (PostgreSQL, in-memory reference)
//! - `presentation/` - HTTP handlers and wire DTOs
//!
//! ## Consistency Model
//! - Every mutation is a single atomic store call, serialized per session
//! - All operations are overwrites, so client retries are idempotent-safe
//! - Correctness and summary statistics are derived on read, never persisted
//! - A completed session is a historical record; every mutation against it
//!   is rejected
//! - `remainingSeconds` is the last client-reported value; the engine runs
//!   no clock of its own and never auto-completes a session

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PracticeConfig;
pub use error::{PracticeError, PracticeResult};
pub use infra::memory::{InMemoryPracticeRepository, StaticExamCatalog};
pub use infra::postgres::{PgExamCatalog, PgPracticeRepository};
pub use presentation::router::practice_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
