use thiserror::Error;

use crate::records::{RecordDraft, UserRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no record at index {index}, store holds {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

// the in-memory collection backing the table; the session loop is its only
// mutator, and nothing here survives a new fetch or process exit
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<UserRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn replace(&mut self, records: Vec<UserRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, index: usize) -> Result<&UserRecord, StoreError> {
        self.records.get(index).ok_or(StoreError::IndexOutOfBounds {
            index,
            len: self.records.len(),
        })
    }

    pub fn delete(&mut self, index: usize) -> Result<UserRecord, StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    pub fn apply(&mut self, index: usize, draft: &RecordDraft) -> Result<&UserRecord, StoreError> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })?;
        record.apply_draft(draft);
        Ok(&self.records[index])
    }
}
