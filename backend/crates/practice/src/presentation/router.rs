//! Practice Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::application::config::PracticeConfig;
use crate::domain::repository::{ExamCatalog, PracticeSessionRepository};
use crate::infra::postgres::{PgExamCatalog, PgPracticeRepository};
use crate::presentation::handlers::{self, PracticeAppState};

/// Create the practice router with PostgreSQL-backed stores
pub fn practice_router(
    repo: PgPracticeRepository,
    catalog: PgExamCatalog,
    config: PracticeConfig,
) -> Router {
    practice_router_generic(repo, catalog, config)
}

/// Create a generic practice router for any store implementation
pub fn practice_router_generic<R, C>(repo: R, catalog: C, config: PracticeConfig) -> Router
where
    R: PracticeSessionRepository + Clone + Send + Sync + 'static,
    C: ExamCatalog + Clone + Send + Sync + 'static,
{
    let state = PracticeAppState {
        repo: Arc::new(repo),
        catalog: Arc::new(catalog),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/sessions/{session_id}",
            get(handlers::get_session::<R, C>).patch(handlers::patch_session::<R, C>),
        )
        .with_state(state)
}
