use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    adapters::persistence::memory::InMemoryEntryStore,
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::waitlist::EntryStore,
};

/// Wraps a primary store with a volatile in-process secondary.
///
/// When the primary fails, reads and writes are served by the secondary
/// instead of surfacing a 500. Data handled while degraded is lost on
/// restart; this wrapper is only installed when
/// `ON_STORE_FAILURE=fallback_volatile` is configured. Domain errors such
/// as a duplicate email still propagate.
pub struct VolatileFallbackStore {
    primary: Arc<dyn EntryStore>,
    fallback: InMemoryEntryStore,
}

impl VolatileFallbackStore {
    pub fn new(primary: Arc<dyn EntryStore>) -> Self {
        Self {
            primary,
            fallback: InMemoryEntryStore::new(),
        }
    }
}

fn is_store_failure(err: &AppError) -> bool {
    matches!(
        err,
        AppError::StoreUnavailable(_) | AppError::Internal(_)
    )
}

#[async_trait]
impl EntryStore for VolatileFallbackStore {
    async fn get_all(&self) -> AppResult<Vec<WaitlistEntry>> {
        match self.primary.get_all().await {
            Ok(entries) => Ok(entries),
            Err(err) if is_store_failure(&err) => {
                tracing::warn!(
                    error = ?err,
                    backend = self.primary.backend_name(),
                    "Primary store read failed, serving volatile fallback"
                );
                self.fallback.get_all().await
            }
            Err(err) => Err(err),
        }
    }

    async fn save_all(&self, entries: Vec<WaitlistEntry>) -> AppResult<()> {
        match self.primary.save_all(entries.clone()).await {
            Ok(()) => Ok(()),
            Err(err) if is_store_failure(&err) => {
                tracing::warn!(
                    error = ?err,
                    backend = self.primary.backend_name(),
                    "Primary store write failed, absorbing into volatile fallback"
                );
                self.fallback.save_all(entries).await
            }
            Err(err) => Err(err),
        }
    }

    fn backend_name(&self) -> &'static str {
        // Degradation shows up in logs; the response label keeps naming
        // the configured primary.
        self.primary.backend_name()
    }
}
