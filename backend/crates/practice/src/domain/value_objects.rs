//! Domain Value Objects
//!
//! Immutable value types for the practice session domain.

use std::collections::HashMap;

/// Session lifecycle status
///
/// Monotonic: `InProgress` -> `Completed`, no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl SessionStatus {
    /// Stable code used on the wire and in the database
    pub const fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
        }
    }

    /// Parse a stored status code
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "in_progress" => Some(SessionStatus::InProgress),
            "completed" => Some(SessionStatus::Completed),
            _ => None,
        }
    }

    pub const fn is_completed(&self) -> bool {
        matches!(self, SessionStatus::Completed)
    }
}

/// One validated, sanitized mutation request against a session
///
/// Numeric sanitation (finite, truncated, non-negative) happens in the wire
/// mapper before one of these is constructed; the controller and stores can
/// rely on the values being in-domain already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOperation {
    Advance {
        current_question_index: usize,
    },
    ToggleFlag {
        question_id: String,
        flagged: bool,
    },
    ToggleBookmark {
        question_id: String,
        bookmarked: bool,
    },
    UpdateTimer {
        remaining_seconds: u32,
    },
    RecordAnswer {
        question_id: String,
        selected_answers: Vec<u32>,
        time_spent_seconds: Option<u32>,
    },
}

impl SessionOperation {
    /// Wire discriminant, used for logging
    pub const fn tag(&self) -> &'static str {
        match self {
            SessionOperation::Advance { .. } => "advance",
            SessionOperation::ToggleFlag { .. } => "toggle-flag",
            SessionOperation::ToggleBookmark { .. } => "toggle-bookmark",
            SessionOperation::UpdateTimer { .. } => "update-timer",
            SessionOperation::RecordAnswer { .. } => "record-answer",
        }
    }
}

/// Accepted-answer sets for one exam, keyed by question ID
///
/// Owned by the exam-definition collaborator; the engine only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct AnswerKey {
    accepted: HashMap<String, Vec<u32>>,
}

impl AnswerKey {
    pub fn new(accepted: HashMap<String, Vec<u32>>) -> Self {
        Self { accepted }
    }

    /// Accepted choice indices for a question, or None when the exam
    /// definition does not cover it
    pub fn accepted(&self, question_id: &str) -> Option<&[u32]> {
        self.accepted.get(question_id).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

impl FromIterator<(String, Vec<u32>)> for AnswerKey {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u32>)>>(iter: I) -> Self {
        Self {
            accepted: iter.into_iter().collect(),
        }
    }
}
