//! API DTOs (Data Transfer Objects)
//!
//! The wire mapper: decodes the discriminated-union PATCH payload into a
//! sanitized domain operation, and encodes the session read model into the
//! external JSON contract. All numeric sanitation lives here (coerce,
//! reject non-finite, truncate, clamp negatives to zero) so operation
//! handlers can assume in-domain values.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{PracticeSession, QuestionProgress};
use crate::domain::services::{
    CorrectnessRule, SessionStatistics, question_correctness, summarize,
};
use crate::domain::value_objects::{AnswerKey, SessionOperation};
use crate::error::{PracticeError, PracticeResult};

// ============================================================================
// PATCH payload
// ============================================================================

/// One mutation request, discriminated by the `operation` tag
///
/// Unrecognized tags and wrong field types fail deserialization, which the
/// handler surfaces as `INVALID_PAYLOAD` before any store access.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SessionOperationRequest {
    Advance {
        current_question_index: f64,
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
        remaining_seconds: f64,
    },
    RecordAnswer {
        question_id: String,
        selected_answers: Vec<f64>,
        #[serde(default)]
        time_spent_seconds: Option<f64>,
    },
}

impl SessionOperationRequest {
    /// Sanitize the wire payload into a domain operation
    pub fn into_operation(self) -> PracticeResult<SessionOperation> {
        match self {
            SessionOperationRequest::Advance {
                current_question_index,
            } => Ok(SessionOperation::Advance {
                current_question_index: sanitize_index(
                    current_question_index,
                    "currentQuestionIndex",
                )?,
            }),
            SessionOperationRequest::ToggleFlag {
                question_id,
                flagged,
            } => Ok(SessionOperation::ToggleFlag {
                question_id,
                flagged,
            }),
            SessionOperationRequest::ToggleBookmark {
                question_id,
                bookmarked,
            } => Ok(SessionOperation::ToggleBookmark {
                question_id,
                bookmarked,
            }),
            SessionOperationRequest::UpdateTimer { remaining_seconds } => {
                Ok(SessionOperation::UpdateTimer {
                    remaining_seconds: sanitize_seconds(remaining_seconds, "remainingSeconds")?,
                })
            }
            SessionOperationRequest::RecordAnswer {
                question_id,
                selected_answers,
                time_spent_seconds,
            } => Ok(SessionOperation::RecordAnswer {
                question_id,
                selected_answers: sanitize_selection(&selected_answers)?,
                time_spent_seconds: time_spent_seconds
                    .map(|v| sanitize_seconds(v, "timeSpentSeconds"))
                    .transpose()?,
            }),
        }
    }
}

/// Truncate toward zero, clamp negatives to zero; reject non-finite
fn sanitize_seconds(value: f64, field: &str) -> PracticeResult<u32> {
    if !value.is_finite() {
        return Err(PracticeError::InvalidPayload(format!(
            "{field} must be a finite number"
        )));
    }
    // Float-to-int casts truncate toward zero and saturate at the bounds
    Ok(value as u32)
}

fn sanitize_index(value: f64, field: &str) -> PracticeResult<usize> {
    if !value.is_finite() {
        return Err(PracticeError::InvalidPayload(format!(
            "{field} must be a finite number"
        )));
    }
    Ok(value as u32 as usize)
}

/// Normalize a selection: sanitize each entry, then de-duplicate keeping
/// first-occurrence order
fn sanitize_selection(values: &[f64]) -> PracticeResult<Vec<u32>> {
    let mut normalized = Vec::with_capacity(values.len());
    for &value in values {
        let choice = sanitize_seconds(value, "selectedAnswers")?;
        if !normalized.contains(&choice) {
            normalized.push(choice);
        }
    }
    Ok(normalized)
}

// ============================================================================
// Session view
// ============================================================================

/// Full session view returned by every successful GET and PATCH
///
/// Always the whole session, never a delta; derived fields are recomputed
/// for each response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionViewResponse {
    pub session_id: String,
    pub exam_slug: String,
    pub owner_id: String,
    pub status: &'static str,
    pub current_question_index: u32,
    pub remaining_seconds: u32,
    pub flagged_question_ids: Vec<String>,
    pub bookmarked_question_ids: Vec<String>,
    pub questions: Vec<QuestionProgressView>,
    pub statistics: SessionStatisticsView,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// Per-question progress with derived correctness
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionProgressView {
    pub question_id: String,
    pub selected_answers: Vec<u32>,
    pub is_submitted: bool,
    /// Null until submitted (or ungradable); derived, never stored
    pub is_correct: Option<bool>,
    pub time_spent_seconds: Option<u32>,
}

/// Aggregated summary statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatisticsView {
    pub answered: usize,
    pub unanswered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub flagged: usize,
    pub bookmarked: usize,
    pub total_time_spent_seconds: u64,
    pub accuracy: f64,
}

impl From<SessionStatistics> for SessionStatisticsView {
    fn from(stats: SessionStatistics) -> Self {
        Self {
            answered: stats.answered,
            unanswered: stats.unanswered,
            correct: stats.correct,
            incorrect: stats.incorrect,
            flagged: stats.flagged,
            bookmarked: stats.bookmarked,
            total_time_spent_seconds: stats.total_time_spent_seconds,
            accuracy: stats.accuracy,
        }
    }
}

impl SessionViewResponse {
    /// Assemble the view from the stored session and its answer key
    pub fn build(session: &PracticeSession, key: &AnswerKey, rule: CorrectnessRule) -> Self {
        let statistics = summarize(session, key, rule);

        Self {
            session_id: session.session_id.to_string(),
            exam_slug: session.exam_slug.clone(),
            owner_id: session.owner_id.clone(),
            status: session.status.as_str(),
            current_question_index: session.current_question_index as u32,
            remaining_seconds: session.remaining_seconds,
            flagged_question_ids: session.flagged_question_ids.iter().cloned().collect(),
            bookmarked_question_ids: session.bookmarked_question_ids.iter().cloned().collect(),
            questions: session
                .questions
                .iter()
                .map(|progress| QuestionProgressView::build(progress, key, rule))
                .collect(),
            statistics: statistics.into(),
            created_at_ms: session.created_at.timestamp_millis(),
            updated_at_ms: session.updated_at.timestamp_millis(),
        }
    }
}

impl QuestionProgressView {
    fn build(progress: &QuestionProgress, key: &AnswerKey, rule: CorrectnessRule) -> Self {
        Self {
            question_id: progress.question_id.clone(),
            selected_answers: progress.selected_answers.clone(),
            is_submitted: progress.is_submitted,
            is_correct: question_correctness(progress, key, rule),
            time_spent_seconds: progress.time_spent_seconds,
        }
    }
}
