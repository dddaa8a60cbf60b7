use std::sync::{Mutex, MutexGuard};

use super::{AnalysisRecord, AnalysisStore};
use crate::error::{Result, UxaError};

/// Process-local store for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AnalysisRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<AnalysisRecord>>> {
        self.records
            .lock()
            .map_err(|_| UxaError::Unknown("analysis store lock poisoned".to_string()))
    }
}

impl AnalysisStore for MemoryStore {
    fn insert(&self, record: &AnalysisRecord) -> Result<()> {
        self.lock()?.push(record.clone());
        Ok(())
    }

    fn latest(&self, project_id: i64) -> Result<Option<AnalysisRecord>> {
        let records = self.lock()?;
        // max_by_key keeps the last maximum, so ties go to the later insert.
        Ok(records
            .iter()
            .filter(|r| r.project_id == project_id)
            .max_by_key(|r| r.created_at)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::{exercise_store, record};
    use std::sync::Arc;

    #[test]
    fn satisfies_store_contract() {
        exercise_store(&MemoryStore::new());
    }

    #[test]
    fn concurrent_inserts_are_all_kept() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .insert(&record(1, 1_000 + i, "run"))
                        .expect("insert");
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("join");
        }

        assert_eq!(store.len().expect("len"), 8);
        let latest = store.latest(1).expect("latest").expect("record");
        assert_eq!(latest.analysis_id, "A-1-1007");
    }
}
