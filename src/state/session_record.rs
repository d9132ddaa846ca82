//! Completed focus session records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label attached to every logged focus interval
pub const FOCUS_SESSION_LABEL: &str = "Focus Session";

/// Summary of one completed focus interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSessionRecord {
    pub id: Uuid,
    pub duration_minutes: u64,
    pub timestamp: DateTime<Utc>,
    pub label: String,
}

impl FocusSessionRecord {
    /// Build the record for a focus interval of `total_seconds` that just finished
    pub fn completed(total_seconds: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            duration_minutes: total_seconds / 60,
            timestamp: Utc::now(),
            label: FOCUS_SESSION_LABEL.to_string(),
        }
    }
}
