use std::sync::Mutex;

use crate::score::{ScoreRecord, ScoreStore, ScoreStoreError};

/// Process-local store, used when running offline.
#[derive(Default)]
pub struct MemoryScoreStore {
    records: Mutex<Vec<ScoreRecord>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn fetch_scores(&self, user_id: &str) -> Result<Vec<ScoreRecord>, ScoreStoreError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    fn submit_score(&self, record: &ScoreRecord) -> Result<ScoreRecord, ScoreStoreError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let mut stored = record.clone();
        stored.id = Some((records.len() + 1).to_string());
        records.push(stored.clone());
        Ok(stored)
    }
}
