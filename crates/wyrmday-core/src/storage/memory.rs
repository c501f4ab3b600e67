use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use super::{ActivityLog, KvStore};
use crate::error::Result;

/// In-process store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    kv: RefCell<HashMap<String, String>>,
    days: RefCell<BTreeSet<NaiveDate>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with active days.
    pub fn with_activity(days: impl IntoIterator<Item = NaiveDate>) -> Self {
        let store = Self::new();
        store.days.borrow_mut().extend(days);
        store
    }
}

impl KvStore for MemoryStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.kv.borrow().get(key).cloned())
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.kv
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl ActivityLog for MemoryStore {
    fn record_activity(&self, day: NaiveDate) -> Result<()> {
        self.days.borrow_mut().insert(day);
        Ok(())
    }

    fn activity_since(&self, since: NaiveDate) -> Result<BTreeSet<NaiveDate>> {
        Ok(self.days.borrow().range(since..).copied().collect())
    }
}
