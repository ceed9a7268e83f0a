//! Get Session Use Case
//!
//! Loads a session together with its exam's answer key so the presentation
//! layer can derive correctness and statistics for the response.

use std::sync::Arc;

use crate::domain::entities::PracticeSession;
use crate::domain::repository::{ExamCatalog, PracticeSessionRepository};
use crate::domain::value_objects::AnswerKey;
use crate::error::{PracticeError, PracticeResult};
use kernel::id::SessionId;

/// A session paired with the answer key it is graded against
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub session: PracticeSession,
    pub answer_key: AnswerKey,
}

/// Get session use case
pub struct GetSessionUseCase<R, C>
where
    R: PracticeSessionRepository + Clone + Send + Sync + 'static,
    C: ExamCatalog + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    catalog: Arc<C>,
}

impl<R, C> GetSessionUseCase<R, C>
where
    R: PracticeSessionRepository + Clone + Send + Sync + 'static,
    C: ExamCatalog + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, catalog: Arc<C>) -> Self {
        Self { repo, catalog }
    }

    /// Load the session view, or `SessionNotFound`
    pub async fn execute(&self, session_id: SessionId) -> PracticeResult<SessionSnapshot> {
        let session = self
            .repo
            .get(session_id)
            .await?
            .ok_or(PracticeError::SessionNotFound)?;

        let answer_key = answer_key_for(self.catalog.as_ref(), &session).await?;

        Ok(SessionSnapshot {
            session,
            answer_key,
        })
    }
}

/// Resolve the answer key for a session's exam
///
/// A stored session referencing an exam the catalog does not know is a
/// server-side integrity fault, not a client error.
pub(crate) async fn answer_key_for<C>(
    catalog: &C,
    session: &PracticeSession,
) -> PracticeResult<AnswerKey>
where
    C: ExamCatalog + Clone + Send + Sync + 'static,
{
    catalog.answer_key(&session.exam_slug).await?.ok_or_else(|| {
        PracticeError::InvariantViolation(format!(
            "no answer key for exam {}",
            session.exam_slug
        ))
    })
}
