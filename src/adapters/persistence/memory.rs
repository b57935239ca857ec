use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    app_error::AppResult, domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::waitlist::EntryStore,
};

/// Process-volatile entry store.
///
/// The collection lives for the lifetime of the process and is lost on
/// restart. Also embedded as the secondary store of the volatile-fallback
/// wrapper.
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<Vec<WaitlistEntry>>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn get_all(&self) -> AppResult<Vec<WaitlistEntry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn save_all(&self, entries: Vec<WaitlistEntry>) -> AppResult<()> {
        *self.entries.write().await = entries;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
