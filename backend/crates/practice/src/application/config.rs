//! Practice Engine Configuration

use crate::domain::services::CorrectnessRule;

/// Configuration for the practice session engine
#[derive(Debug, Clone)]
pub struct PracticeConfig {
    /// Grading policy applied when deriving correctness on read
    pub correctness_rule: CorrectnessRule,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            correctness_rule: CorrectnessRule::AnyOverlap,
        }
    }
}

impl PracticeConfig {
    /// Strict grading variant: a multi-select answer must match the
    /// accepted set exactly
    pub fn exact_match() -> Self {
        Self {
            correctness_rule: CorrectnessRule::ExactMatch,
        }
    }
}
