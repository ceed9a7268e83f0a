//! Apply Operation Use Case
//!
//! The session controller: validates one sanitized operation against the
//! current session state, dispatches exactly one store primitive, and
//! returns the refreshed session with its answer key.

use std::sync::Arc;

use crate::application::get_session::{SessionSnapshot, answer_key_for};
use crate::domain::entities::PracticeSession;
use crate::domain::repository::{ExamCatalog, PracticeSessionRepository};
use crate::domain::value_objects::SessionOperation;
use crate::error::{PracticeError, PracticeResult};
use kernel::id::SessionId;

/// Apply operation use case
pub struct ApplyOperationUseCase<R, C>
where
    R: PracticeSessionRepository + Clone + Send + Sync + 'static,
    C: ExamCatalog + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    catalog: Arc<C>,
}

impl<R, C> ApplyOperationUseCase<R, C>
where
    R: PracticeSessionRepository + Clone + Send + Sync + 'static,
    C: ExamCatalog + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, catalog: Arc<C>) -> Self {
        Self { repo, catalog }
    }

    /// Validate and apply one operation, returning the refreshed view
    ///
    /// Domain validation happens before the store write; the write itself
    /// is a single atomic primitive, so a rejected operation never touches
    /// stored state.
    pub async fn execute(
        &self,
        session_id: SessionId,
        operation: SessionOperation,
    ) -> PracticeResult<SessionSnapshot> {
        let session = self
            .repo
            .get(session_id)
            .await?
            .ok_or(PracticeError::SessionNotFound)?;

        if session.is_completed() {
            return Err(PracticeError::SessionCompleted);
        }

        let updated = self.dispatch(&session, operation).await?;

        // The session is re-checked after the write; a concurrent delete
        // between the read and the mutation surfaces as not-found.
        let updated = updated.ok_or(PracticeError::SessionNotFound)?;

        let answer_key = answer_key_for(self.catalog.as_ref(), &updated).await?;

        Ok(SessionSnapshot {
            session: updated,
            answer_key,
        })
    }

    async fn dispatch(
        &self,
        session: &PracticeSession,
        operation: SessionOperation,
    ) -> PracticeResult<Option<PracticeSession>> {
        let session_id = session.session_id;

        match operation {
            SessionOperation::Advance {
                current_question_index,
            } => {
                let total = session.total_questions();
                if total == 0 {
                    return Err(PracticeError::InvariantViolation(
                        "session has no questions".to_string(),
                    ));
                }
                // The wire mapper already floored at 0; cap at the last
                // question so the stored cursor always names a question.
                let index = current_question_index.min(total - 1);
                self.repo.advance_question(session_id, index).await
            }
            SessionOperation::ToggleFlag {
                question_id,
                flagged,
            } => {
                self.require_question(session, &question_id)?;
                self.repo.toggle_flag(session_id, &question_id, flagged).await
            }
            SessionOperation::ToggleBookmark {
                question_id,
                bookmarked,
            } => {
                self.require_question(session, &question_id)?;
                self.repo
                    .toggle_bookmark(session_id, &question_id, bookmarked)
                    .await
            }
            SessionOperation::UpdateTimer { remaining_seconds } => {
                self.repo
                    .update_remaining_seconds(session_id, remaining_seconds)
                    .await
            }
            SessionOperation::RecordAnswer {
                question_id,
                selected_answers,
                time_spent_seconds,
            } => {
                self.require_question(session, &question_id)?;
                self.repo
                    .record_question_progress(
                        session_id,
                        &question_id,
                        &selected_answers,
                        time_spent_seconds,
                    )
                    .await
            }
        }
    }

    fn require_question(
        &self,
        session: &PracticeSession,
        question_id: &str,
    ) -> PracticeResult<()> {
        if session.contains_question(question_id) {
            Ok(())
        } else {
            Err(PracticeError::UnknownQuestion(question_id.to_string()))
        }
    }
}
