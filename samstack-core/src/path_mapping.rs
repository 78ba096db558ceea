//! Local to in-container path translation

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where Lambda code lives inside the execution container
pub const TASK_PATH: &str = "/var/task";

/// Maps a local directory onto its path inside the Lambda sandbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMapping {
    pub local_root: PathBuf,
    pub remote_root: String,
}

impl PathMapping {
    pub fn new(local_root: impl Into<PathBuf>, remote_root: impl Into<String>) -> Self {
        Self {
            local_root: local_root.into(),
            remote_root: remote_root.into(),
        }
    }

    /// Mapping onto `/var/task`
    pub fn to_task(local_root: impl Into<PathBuf>) -> Self {
        Self::new(local_root, TASK_PATH)
    }
}
