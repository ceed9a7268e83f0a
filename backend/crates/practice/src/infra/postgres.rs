//! PostgreSQL Store Implementations
//!
//! Serialization per session comes from PostgreSQL row locking: every
//! mutation is a conditional UPDATE against the session row (or a
//! transaction that touches the session row first), so concurrent writers
//! to one session queue on the row lock while other sessions proceed in
//! parallel. The `session_status = 'in_progress'` guard doubles as the
//! completed-session check against writes racing the terminal transition.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{PracticeSession, QuestionProgress};
use crate::domain::repository::{ExamCatalog, PracticeSessionRepository};
use crate::domain::value_objects::{AnswerKey, SessionStatus};
use crate::error::{PracticeError, PracticeResult};
use kernel::id::SessionId;

/// PostgreSQL-backed practice session store
#[derive(Clone)]
pub struct PgPracticeRepository {
    pool: PgPool,
}

impl PgPracticeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of sessions still in progress (startup housekeeping log)
    pub async fn count_in_progress(&self) -> PracticeResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM practice_sessions WHERE session_status = 'in_progress'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Collaborator hook for the explicit terminal transition
    ///
    /// Not part of the five-operation dispatch; refuses an
    /// already-completed session.
    pub async fn mark_completed(
        &self,
        session_id: SessionId,
    ) -> PracticeResult<Option<PracticeSession>> {
        let updated = sqlx::query(
            r#"
            UPDATE practice_sessions
            SET session_status = 'completed', updated_at = NOW()
            WHERE session_id = $1 AND session_status = 'in_progress'
            "#,
        )
        .bind(session_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return self.reject_unmodified(session_id).await;
        }

        tracing::info!(session_id = %session_id, "Practice session completed");

        self.get(session_id).await
    }

    /// Distinguish a missing session from one that raced to `completed`
    async fn reject_unmodified(
        &self,
        session_id: SessionId,
    ) -> PracticeResult<Option<PracticeSession>> {
        let exists: Option<String> = sqlx::query_scalar(
            "SELECT session_status FROM practice_sessions WHERE session_id = $1",
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match exists {
            Some(_) => Err(PracticeError::SessionCompleted),
            None => Ok(None),
        }
    }
}

impl PracticeSessionRepository for PgPracticeRepository {
    async fn get(&self, session_id: SessionId) -> PracticeResult<Option<PracticeSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                exam_slug,
                owner_id,
                session_status,
                current_question_index,
                remaining_seconds,
                flagged_question_ids,
                bookmarked_question_ids,
                created_at,
                updated_at
            FROM practice_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let progress_rows = sqlx::query_as::<_, QuestionProgressRow>(
            r#"
            SELECT
                question_id,
                selected_answers,
                is_submitted,
                time_spent_seconds
            FROM practice_question_progress
            WHERE session_id = $1
            ORDER BY position
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let questions = progress_rows
            .into_iter()
            .map(QuestionProgressRow::into_progress)
            .collect();

        row.into_session(questions).map(Some)
    }

    async fn advance_question(
        &self,
        session_id: SessionId,
        index: usize,
    ) -> PracticeResult<Option<PracticeSession>> {
        let updated = sqlx::query(
            r#"
            UPDATE practice_sessions
            SET current_question_index = $2, updated_at = NOW()
            WHERE session_id = $1 AND session_status = 'in_progress'
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(index as i32)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return self.reject_unmodified(session_id).await;
        }

        self.get(session_id).await
    }

    async fn toggle_flag(
        &self,
        session_id: SessionId,
        question_id: &str,
        flagged: bool,
    ) -> PracticeResult<Option<PracticeSession>> {
        let updated = sqlx::query(
            r#"
            UPDATE practice_sessions
            SET flagged_question_ids = CASE
                    WHEN $3 AND NOT ($2 = ANY(flagged_question_ids))
                        THEN array_append(flagged_question_ids, $2)
                    WHEN NOT $3
                        THEN array_remove(flagged_question_ids, $2)
                    ELSE flagged_question_ids
                END,
                updated_at = NOW()
            WHERE session_id = $1 AND session_status = 'in_progress'
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(question_id)
        .bind(flagged)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return self.reject_unmodified(session_id).await;
        }

        self.get(session_id).await
    }

    async fn toggle_bookmark(
        &self,
        session_id: SessionId,
        question_id: &str,
        bookmarked: bool,
    ) -> PracticeResult<Option<PracticeSession>> {
        let updated = sqlx::query(
            r#"
            UPDATE practice_sessions
            SET bookmarked_question_ids = CASE
                    WHEN $3 AND NOT ($2 = ANY(bookmarked_question_ids))
                        THEN array_append(bookmarked_question_ids, $2)
                    WHEN NOT $3
                        THEN array_remove(bookmarked_question_ids, $2)
                    ELSE bookmarked_question_ids
                END,
                updated_at = NOW()
            WHERE session_id = $1 AND session_status = 'in_progress'
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(question_id)
        .bind(bookmarked)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return self.reject_unmodified(session_id).await;
        }

        self.get(session_id).await
    }

    async fn update_remaining_seconds(
        &self,
        session_id: SessionId,
        seconds: u32,
    ) -> PracticeResult<Option<PracticeSession>> {
        let updated = sqlx::query(
            r#"
            UPDATE practice_sessions
            SET remaining_seconds = $2, updated_at = NOW()
            WHERE session_id = $1 AND session_status = 'in_progress'
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(seconds as i32)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return self.reject_unmodified(session_id).await;
        }

        self.get(session_id).await
    }

    async fn record_question_progress(
        &self,
        session_id: SessionId,
        question_id: &str,
        selected_answers: &[u32],
        time_spent_seconds: Option<u32>,
    ) -> PracticeResult<Option<PracticeSession>> {
        let selected: Vec<i32> = selected_answers.iter().map(|&c| c as i32).collect();

        let mut tx = self.pool.begin().await?;

        // Touching the session row first takes the row lock, serializing
        // concurrent writers, and enforces the in-progress guard.
        let touched = sqlx::query(
            r#"
            UPDATE practice_sessions
            SET updated_at = NOW()
            WHERE session_id = $1 AND session_status = 'in_progress'
            "#,
        )
        .bind(session_id.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if touched == 0 {
            tx.rollback().await?;
            return self.reject_unmodified(session_id).await;
        }

        let recorded = sqlx::query(
            r#"
            UPDATE practice_question_progress
            SET selected_answers = $3,
                is_submitted = TRUE,
                time_spent_seconds = $4
            WHERE session_id = $1 AND question_id = $2
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(question_id)
        .bind(&selected)
        .bind(time_spent_seconds.map(|s| s as i32))
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if recorded == 0 {
            tx.rollback().await?;
            return Err(PracticeError::UnknownQuestion(question_id.to_string()));
        }

        tx.commit().await?;

        self.get(session_id).await
    }
}

/// PostgreSQL-backed exam definition catalog
#[derive(Clone)]
pub struct PgExamCatalog {
    pool: PgPool,
}

impl PgExamCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ExamCatalog for PgExamCatalog {
    async fn answer_key(&self, exam_slug: &str) -> PracticeResult<Option<AnswerKey>> {
        let rows: Vec<(String, Vec<i32>)> = sqlx::query_as(
            r#"
            SELECT question_id, correct_choice_indices
            FROM exam_questions
            WHERE exam_slug = $1
            "#,
        )
        .bind(exam_slug)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            rows.into_iter()
                .map(|(question_id, indices)| {
                    (
                        question_id,
                        indices.into_iter().map(|i| i as u32).collect(),
                    )
                })
                .collect(),
        ))
    }
}

// ============================================================================
// Row mappings
// ============================================================================

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    exam_slug: String,
    owner_id: String,
    session_status: String,
    current_question_index: i32,
    remaining_seconds: i32,
    flagged_question_ids: Vec<String>,
    bookmarked_question_ids: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self, questions: Vec<QuestionProgress>) -> PracticeResult<PracticeSession> {
        let status = SessionStatus::parse(&self.session_status).ok_or_else(|| {
            PracticeError::InvariantViolation(format!(
                "unknown session status {}",
                self.session_status
            ))
        })?;

        Ok(PracticeSession {
            session_id: SessionId::from_uuid(self.session_id),
            exam_slug: self.exam_slug,
            owner_id: self.owner_id,
            status,
            current_question_index: self.current_question_index.max(0) as usize,
            remaining_seconds: self.remaining_seconds.max(0) as u32,
            flagged_question_ids: self.flagged_question_ids.into_iter().collect(),
            bookmarked_question_ids: self.bookmarked_question_ids.into_iter().collect(),
            questions,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct QuestionProgressRow {
    question_id: String,
    selected_answers: Vec<i32>,
    is_submitted: bool,
    time_spent_seconds: Option<i32>,
}

impl QuestionProgressRow {
    fn into_progress(self) -> QuestionProgress {
        QuestionProgress {
            question_id: self.question_id,
            selected_answers: self
                .selected_answers
                .into_iter()
                .map(|c| c.max(0) as u32)
                .collect(),
            is_submitted: self.is_submitted,
            time_spent_seconds: self.time_spent_seconds.map(|s| s.max(0) as u32),
        }
    }
}
