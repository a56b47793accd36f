//! Learning store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Learning store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Directory for persisted corrections; `None` keeps them in memory only
    pub storage_dir: Option<PathBuf>,

    /// Key the correction list is stored under
    pub storage_key: String,

    /// Oldest corrections are dropped beyond this count
    pub max_entries: usize,

    /// Snapshot distance (degree units) below which a correction applies
    pub similarity_threshold: f64,

    /// Boost awarded to the corrected label at distance zero
    pub boost_scale: f64,

    /// Penalty on the wrong guess, as a fraction of the boost
    pub penalty_ratio: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            storage_key: "formcheck_corrections".to_string(),
            max_entries: 500,
            similarity_threshold: 25.0,
            boost_scale: 30.0,
            penalty_ratio: 0.5,
        }
    }
}

impl LearningConfig {
    /// Only near-identical poses reuse a correction
    pub fn strict() -> Self {
        Self {
            similarity_threshold: 15.0,
            ..Default::default()
        }
    }

    /// Corrections generalize to looser matches
    pub fn lenient() -> Self {
        Self {
            similarity_threshold: 35.0,
            ..Default::default()
        }
    }
}
