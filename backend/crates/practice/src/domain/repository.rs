//! Store Traits
//!
//! Interfaces for session persistence and the exam-definition collaborator.
//! Implementations live in the infrastructure layer.
//!
//! Every mutating primitive must be atomic per call and serialized per
//! session ID: two concurrent writes to the same session must not race a
//! read-modify-write and silently drop one of them. Cross-session calls may
//! run fully in parallel.

use crate::domain::entities::PracticeSession;
use crate::domain::value_objects::AnswerKey;
use crate::error::PracticeResult;
use kernel::id::SessionId;

/// Practice session store trait
///
/// Mutating primitives return the refreshed session, `Ok(None)` when the
/// session does not exist (or vanished concurrently), and
/// `Err(SessionCompleted)` when the row raced to `completed` between the
/// controller's status check and the write. They never partially apply.
#[trait_variant::make(PracticeSessionRepository: Send)]
pub trait LocalPracticeSessionRepository {
    /// Load a session by ID
    async fn get(&self, session_id: SessionId) -> PracticeResult<Option<PracticeSession>>;

    /// Store a new current-question cursor (already clamped by the caller)
    async fn advance_question(
        &self,
        session_id: SessionId,
        index: usize,
    ) -> PracticeResult<Option<PracticeSession>>;

    /// Set flag membership for one question
    async fn toggle_flag(
        &self,
        session_id: SessionId,
        question_id: &str,
        flagged: bool,
    ) -> PracticeResult<Option<PracticeSession>>;

    /// Set bookmark membership for one question
    async fn toggle_bookmark(
        &self,
        session_id: SessionId,
        question_id: &str,
        bookmarked: bool,
    ) -> PracticeResult<Option<PracticeSession>>;

    /// Overwrite the client-reported countdown value
    async fn update_remaining_seconds(
        &self,
        session_id: SessionId,
        seconds: u32,
    ) -> PracticeResult<Option<PracticeSession>>;

    /// Overwrite one question's answer state and mark it submitted
    async fn record_question_progress(
        &self,
        session_id: SessionId,
        question_id: &str,
        selected_answers: &[u32],
        time_spent_seconds: Option<u32>,
    ) -> PracticeResult<Option<PracticeSession>>;
}

/// Exam definition collaborator trait
///
/// Read-only view onto the externally-owned exam catalog; the engine uses
/// it to grade answers on read and never stores the key.
#[trait_variant::make(ExamCatalog: Send)]
pub trait LocalExamCatalog {
    /// Accepted-answer sets for an exam, or None for an unknown exam
    async fn answer_key(&self, exam_slug: &str) -> PracticeResult<Option<AnswerKey>>;
}
