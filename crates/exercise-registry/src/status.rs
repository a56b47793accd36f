//! Score bands shared by form results and confidence display

use serde::{Deserialize, Serialize};

/// Scores at or above this are good
pub const GOOD_THRESHOLD: f64 = 80.0;

/// Scores at or above this (and below good) need attention
pub const WARNING_THRESHOLD: f64 = 60.0;

/// Form quality band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Good,
    Warning,
    Bad,
}

impl FormStatus {
    /// Bucket a 0-100 score
    pub fn from_score(score: f64) -> Self {
        if score >= GOOD_THRESHOLD {
            FormStatus::Good
        } else if score >= WARNING_THRESHOLD {
            FormStatus::Warning
        } else {
            FormStatus::Bad
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::Good => "good",
            FormStatus::Warning => "warning",
            FormStatus::Bad => "bad",
        }
    }
}
