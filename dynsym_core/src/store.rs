//! Storage for named pattern sets.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::pattern::NamedPatternSet;

/// Whole-list access to persisted pattern sets.
///
/// Callers read the full list, compute the new list and write it back;
/// serializing concurrent writers is the caller's job.
#[async_trait]
pub trait NamedSetStore: Send + Sync {
    /// All saved sets in order. An absent list reads as empty.
    async fn get(&self) -> anyhow::Result<Vec<NamedPatternSet>>;

    /// Replace the saved list.
    async fn set(&self, sets: Vec<NamedPatternSet>) -> anyhow::Result<()>;
}

/// Store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySetStore {
    sets: Mutex<Vec<NamedPatternSet>>,
}

impl MemorySetStore {
    #[must_use]
    pub fn new(sets: Vec<NamedPatternSet>) -> Self {
        Self {
            sets: Mutex::new(sets),
        }
    }
}

#[async_trait]
impl NamedSetStore for MemorySetStore {
    async fn get(&self) -> anyhow::Result<Vec<NamedPatternSet>> {
        Ok(self.sets.lock().await.clone())
    }

    async fn set(&self, sets: Vec<NamedPatternSet>) -> anyhow::Result<()> {
        *self.sets.lock().await = sets;
        Ok(())
    }
}
