use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::waitlist::EntryStore,
};

const WAITLIST_KEY: &str = "waitlist";

/// Redis-backed entry store.
///
/// The whole collection is one JSON array under a single key, replaced
/// wholesale on every write.
#[derive(Clone)]
pub struct RedisEntryStore {
    manager: ConnectionManager,
}

impl RedisEntryStore {
    pub async fn new(redis_url: &str) -> AppResult<Self> {
        let client = redis::Client::open(redis_url).map_err(|e| {
            AppError::StoreUnavailable(format!(
                "Redis connection failed (check redis password/URL): {e}"
            ))
        })?;
        let manager = ConnectionManager::new(client).await.map_err(|e| {
            AppError::StoreUnavailable(format!(
                "Redis auth/connection failed (check redis password/URL): {e}"
            ))
        })?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl EntryStore for RedisEntryStore {
    async fn get_all(&self) -> AppResult<Vec<WaitlistEntry>> {
        let mut conn = self.manager.clone();

        let raw: Option<String> = conn
            .get(WAITLIST_KEY)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        // A non-array or corrupt value is read as empty instead of failing
        // every request; the next save overwrites it.
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Waitlist key holds non-array data, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, entries: Vec<WaitlistEntry>) -> AppResult<()> {
        let raw = serde_json::to_string(&entries)
            .map_err(|e| AppError::Internal(format!("failed to serialize waitlist: {e}")))?;

        let mut conn = self.manager.clone();
        let _: () = conn
            .set(WAITLIST_KEY, raw)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
