//! In-Memory Store Implementations
//!
//! Reference implementation of the store contract, also used as the test
//! double. Single-writer-per-session comes from a per-entry mutex: two
//! writers to the same session queue behind each other, writers to
//! different sessions proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::entities::PracticeSession;
use crate::domain::repository::{ExamCatalog, PracticeSessionRepository};
use crate::domain::value_objects::AnswerKey;
use crate::error::{PracticeError, PracticeResult};
use kernel::id::SessionId;

/// In-memory practice session store
#[derive(Clone, Default)]
pub struct InMemoryPracticeRepository {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<PracticeSession>>>>>,
}

impl InMemoryPracticeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session (creation policy lives in the collaborating
    /// exam service; tests use this to bootstrap state)
    pub async fn insert(&self, session: PracticeSession) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            session.session_id.into_uuid(),
            Arc::new(Mutex::new(session)),
        );
    }

    /// Collaborator hook for the explicit terminal transition
    ///
    /// Not part of the five-operation dispatch; refuses an
    /// already-completed session.
    pub async fn mark_completed(
        &self,
        session_id: SessionId,
    ) -> PracticeResult<Option<PracticeSession>> {
        let Some(entry) = self.entry(session_id).await else {
            return Ok(None);
        };
        let mut session = entry.lock().await;
        if !session.complete() {
            return Err(PracticeError::SessionCompleted);
        }
        session.touch();
        Ok(Some(session.clone()))
    }

    async fn entry(&self, session_id: SessionId) -> Option<Arc<Mutex<PracticeSession>>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id.as_uuid()).cloned()
    }

    /// Apply one mutation under the session's writer lock
    async fn mutate<F>(
        &self,
        session_id: SessionId,
        apply: F,
    ) -> PracticeResult<Option<PracticeSession>>
    where
        F: FnOnce(&mut PracticeSession) -> PracticeResult<()>,
    {
        let Some(entry) = self.entry(session_id).await else {
            return Ok(None);
        };
        let mut session = entry.lock().await;
        if session.is_completed() {
            return Err(PracticeError::SessionCompleted);
        }
        apply(&mut *session)?;
        session.touch();
        Ok(Some(session.clone()))
    }
}

impl PracticeSessionRepository for InMemoryPracticeRepository {
    async fn get(&self, session_id: SessionId) -> PracticeResult<Option<PracticeSession>> {
        let Some(entry) = self.entry(session_id).await else {
            return Ok(None);
        };
        let session = entry.lock().await;
        Ok(Some(session.clone()))
    }

    async fn advance_question(
        &self,
        session_id: SessionId,
        index: usize,
    ) -> PracticeResult<Option<PracticeSession>> {
        self.mutate(session_id, |session| {
            session.advance_to(index);
            Ok(())
        })
        .await
    }

    async fn toggle_flag(
        &self,
        session_id: SessionId,
        question_id: &str,
        flagged: bool,
    ) -> PracticeResult<Option<PracticeSession>> {
        self.mutate(session_id, |session| {
            session.set_flag(question_id, flagged);
            Ok(())
        })
        .await
    }

    async fn toggle_bookmark(
        &self,
        session_id: SessionId,
        question_id: &str,
        bookmarked: bool,
    ) -> PracticeResult<Option<PracticeSession>> {
        self.mutate(session_id, |session| {
            session.set_bookmark(question_id, bookmarked);
            Ok(())
        })
        .await
    }

    async fn update_remaining_seconds(
        &self,
        session_id: SessionId,
        seconds: u32,
    ) -> PracticeResult<Option<PracticeSession>> {
        self.mutate(session_id, |session| {
            session.set_remaining_seconds(seconds);
            Ok(())
        })
        .await
    }

    async fn record_question_progress(
        &self,
        session_id: SessionId,
        question_id: &str,
        selected_answers: &[u32],
        time_spent_seconds: Option<u32>,
    ) -> PracticeResult<Option<PracticeSession>> {
        self.mutate(session_id, |session| {
            if session.record_answer(question_id, selected_answers.to_vec(), time_spent_seconds) {
                Ok(())
            } else {
                Err(PracticeError::UnknownQuestion(question_id.to_string()))
            }
        })
        .await
    }
}

/// Fixed in-memory exam catalog
///
/// Stands in for the exam-definition collaborator in tests and local runs.
#[derive(Clone, Default)]
pub struct StaticExamCatalog {
    keys: Arc<HashMap<String, AnswerKey>>,
}

impl StaticExamCatalog {
    pub fn new(keys: HashMap<String, AnswerKey>) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }

    /// Catalog holding a single exam
    pub fn single(exam_slug: impl Into<String>, key: AnswerKey) -> Self {
        let mut keys = HashMap::new();
        keys.insert(exam_slug.into(), key);
        Self::new(keys)
    }
}

impl ExamCatalog for StaticExamCatalog {
    async fn answer_key(&self, exam_slug: &str) -> PracticeResult<Option<AnswerKey>> {
        Ok(self.keys.get(exam_slug).cloned())
    }
}
