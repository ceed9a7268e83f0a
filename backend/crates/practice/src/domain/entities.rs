//! Domain Entities
//!
//! Core business entities for the practice session domain.

use chrono::{DateTime, Utc};
use kernel::id::SessionId;
use std::collections::BTreeSet;

use crate::domain::value_objects::SessionStatus;

/// PracticeSession entity - one student's attempt at one exam
///
/// Invariants (hold after every accepted mutation):
/// - `current_question_index < questions.len()`
/// - every flagged/bookmarked ID names a question in `questions`
/// - no mutation once `status` is `Completed`
#[derive(Debug, Clone)]
pub struct PracticeSession {
    pub session_id: SessionId,
    /// Immutable pointer to the externally-owned exam definition
    pub exam_slug: String,
    /// Owner identity, resolved by the caller; never mutated here
    pub owner_id: String,
    pub status: SessionStatus,
    pub current_question_index: usize,
    /// Last client-reported countdown value; the server runs no clock
    pub remaining_seconds: u32,
    pub flagged_question_ids: BTreeSet<String>,
    pub bookmarked_question_ids: BTreeSet<String>,
    /// One record per exam question, in exam order
    pub questions: Vec<QuestionProgress>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PracticeSession {
    /// Create a fresh in-progress session with empty per-question state
    ///
    /// Session creation policy lives in the collaborating exam service;
    /// this constructor only guarantees a well-formed starting state.
    pub fn new(
        session_id: SessionId,
        exam_slug: impl Into<String>,
        owner_id: impl Into<String>,
        question_ids: impl IntoIterator<Item = String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            exam_slug: exam_slug.into(),
            owner_id: owner_id.into(),
            status: SessionStatus::InProgress,
            current_question_index: 0,
            remaining_seconds: 0,
            flagged_question_ids: BTreeSet::new(),
            bookmarked_question_ids: BTreeSet::new(),
            questions: question_ids
                .into_iter()
                .map(QuestionProgress::empty)
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Whether `question_id` belongs to this session's exam
    pub fn contains_question(&self, question_id: &str) -> bool {
        self.questions.iter().any(|q| q.question_id == question_id)
    }

    /// Look up per-question progress by question ID
    pub fn question(&self, question_id: &str) -> Option<&QuestionProgress> {
        self.questions.iter().find(|q| q.question_id == question_id)
    }

    /// Refresh `updated_at` after an accepted mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Move the cursor; the caller has already clamped `index` into range
    pub fn advance_to(&mut self, index: usize) {
        self.current_question_index = index;
    }

    /// Set flag membership for a question; idempotent
    pub fn set_flag(&mut self, question_id: &str, flagged: bool) {
        if flagged {
            self.flagged_question_ids.insert(question_id.to_string());
        } else {
            self.flagged_question_ids.remove(question_id);
        }
    }

    /// Set bookmark membership for a question; idempotent
    pub fn set_bookmark(&mut self, question_id: &str, bookmarked: bool) {
        if bookmarked {
            self.bookmarked_question_ids.insert(question_id.to_string());
        } else {
            self.bookmarked_question_ids.remove(question_id);
        }
    }

    /// Store the client-reported countdown; overwrite, not decrement
    pub fn set_remaining_seconds(&mut self, seconds: u32) {
        self.remaining_seconds = seconds;
    }

    /// Overwrite one question's answer state
    ///
    /// Returns false when `question_id` is not part of this session.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        selected_answers: Vec<u32>,
        time_spent_seconds: Option<u32>,
    ) -> bool {
        match self
            .questions
            .iter_mut()
            .find(|q| q.question_id == question_id)
        {
            Some(progress) => {
                progress.record(selected_answers, time_spent_seconds);
                true
            }
            None => false,
        }
    }

    /// Explicit terminal transition, triggered by a collaborator
    ///
    /// Returns false when the session was already completed.
    pub fn complete(&mut self) -> bool {
        if self.status.is_completed() {
            return false;
        }
        self.status = SessionStatus::Completed;
        true
    }
}

/// QuestionProgress entity - answer state for one question
///
/// Owned exclusively by its parent session; correctness is derived on read
/// and never stored here.
#[derive(Debug, Clone)]
pub struct QuestionProgress {
    pub question_id: String,
    /// Unique choice indices in selection order; empty means unanswered
    pub selected_answers: Vec<u32>,
    /// True once the question has been answered at least once; resubmission
    /// keeps it true
    pub is_submitted: bool,
    /// Last reported value, overwritten per submission (the client supplies
    /// a cumulative value if accumulation is desired)
    pub time_spent_seconds: Option<u32>,
}

impl QuestionProgress {
    /// Fresh unanswered state for one question
    pub fn empty(question_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            selected_answers: Vec::new(),
            is_submitted: false,
            time_spent_seconds: None,
        }
    }

    /// Overwrite the answer; the previous selection is fully replaced
    pub fn record(&mut self, selected_answers: Vec<u32>, time_spent_seconds: Option<u32>) {
        self.selected_answers = selected_answers;
        self.is_submitted = true;
        self.time_spent_seconds = time_spent_seconds;
    }

    pub fn is_answered(&self) -> bool {
        self.is_submitted
    }
}
