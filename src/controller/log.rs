//! In-memory collector for completed focus sessions

use std::collections::VecDeque;

use super::SessionSink;
use crate::state::FocusSessionRecord;

/// Completed sessions, newest first. Lives as long as the process.
#[derive(Debug, Default, Clone)]
pub struct SessionLog {
    records: VecDeque<FocusSessionRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Up to `limit` records, newest first
    pub fn recent(&self, limit: usize) -> Vec<FocusSessionRecord> {
        self.records.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of logged focus minutes
    pub fn total_minutes(&self) -> u64 {
        self.records.iter().map(|r| r.duration_minutes).sum()
    }
}

impl SessionSink for SessionLog {
    fn on_session_complete(&mut self, record: FocusSessionRecord) {
        self.records.push_front(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_first_and_totals_minutes() {
        let mut log = SessionLog::new();
        log.on_session_complete(FocusSessionRecord::completed(25 * 60));
        log.on_session_complete(FocusSessionRecord::completed(60 * 60 + 59));

        assert_eq!(log.len(), 2);
        assert_eq!(log.total_minutes(), 85);

        let recent = log.recent(10);
        assert_eq!(recent[0].duration_minutes, 60);
        assert_eq!(recent[1].duration_minutes, 25);
        assert_eq!(log.recent(1).len(), 1);
    }
}
