//! Domain Services - Progress Aggregation
//!
//! Pure functions deriving correctness and summary statistics from stored
//! per-question state plus the exam's answer key. Called fresh on every
//! read; nothing here is ever persisted.

use crate::domain::entities::{PracticeSession, QuestionProgress};
use crate::domain::value_objects::AnswerKey;

/// Named correctness policy
///
/// `AnyOverlap` grades a submission correct when the selection and the
/// accepted set intersect at all, which treats partial overlap on
/// multi-select questions as fully correct. `ExactMatch` requires the
/// selection to equal the accepted set. The policy is a value passed down
/// from configuration so alternates can be substituted without touching the
/// controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrectnessRule {
    #[default]
    AnyOverlap,
    ExactMatch,
}

impl CorrectnessRule {
    /// Grade one selection against one accepted set
    pub fn is_correct(&self, selected: &[u32], accepted: &[u32]) -> bool {
        match self {
            CorrectnessRule::AnyOverlap => {
                selected.iter().any(|choice| accepted.contains(choice))
            }
            CorrectnessRule::ExactMatch => {
                selected.len() == accepted.len()
                    && selected.iter().all(|choice| accepted.contains(choice))
            }
        }
    }
}

/// Derived correctness for one question
///
/// None until the question has been submitted, and None when the exam
/// definition carries no accepted set for it (nothing to grade against).
pub fn question_correctness(
    progress: &QuestionProgress,
    key: &AnswerKey,
    rule: CorrectnessRule,
) -> Option<bool> {
    if !progress.is_submitted {
        return None;
    }
    let accepted = key.accepted(&progress.question_id)?;
    Some(rule.is_correct(&progress.selected_answers, accepted))
}

/// Summary statistics over one session, derived on read
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatistics {
    pub answered: usize,
    pub unanswered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub flagged: usize,
    pub bookmarked: usize,
    /// Sum of the non-null per-question values
    pub total_time_spent_seconds: u64,
    /// correct / answered; 0.0 when nothing has been submitted yet
    pub accuracy: f64,
}

/// Aggregate a session against its exam's answer key
pub fn summarize(
    session: &PracticeSession,
    key: &AnswerKey,
    rule: CorrectnessRule,
) -> SessionStatistics {
    let mut answered = 0usize;
    let mut correct = 0usize;
    let mut incorrect = 0usize;
    let mut total_time_spent_seconds = 0u64;

    for progress in &session.questions {
        if progress.is_submitted {
            answered += 1;
        }
        match question_correctness(progress, key, rule) {
            Some(true) => correct += 1,
            Some(false) => incorrect += 1,
            None => {}
        }
        if let Some(seconds) = progress.time_spent_seconds {
            total_time_spent_seconds += u64::from(seconds);
        }
    }

    let accuracy = if answered == 0 {
        0.0
    } else {
        correct as f64 / answered as f64
    };

    SessionStatistics {
        answered,
        unanswered: session.questions.len() - answered,
        correct,
        incorrect,
        flagged: session.flagged_question_ids.len(),
        bookmarked: session.bookmarked_question_ids.len(),
        total_time_spent_seconds,
        accuracy,
    }
}
