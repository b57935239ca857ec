use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistEntry,
    validators::is_valid_email,
};

/// Persistence port for the waitlist collection.
///
/// Implementations hold the full collection and replace it wholesale; the
/// use-case layer never issues per-record queries. Every implementation
/// returns entries in ascending-id (insertion) order.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Returns the current full collection. An empty store yields an empty
    /// vec, never an error.
    async fn get_all(&self) -> AppResult<Vec<WaitlistEntry>>;

    /// Replaces the entire stored collection with `entries`.
    async fn save_all(&self, entries: Vec<WaitlistEntry>) -> AppResult<()>;

    /// Short backend tag reported in the `storage` field of responses.
    fn backend_name(&self) -> &'static str;
}

/// A signup submission as received from the client, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub category_label: Option<String>,
    pub category_specific: Option<String>,
    pub linkedin_id: Option<String>,
}

pub struct WaitlistUseCases {
    store: Arc<dyn EntryStore>,
    // Serializes the create path's read-modify-write against the store.
    // Two creates that read the same snapshot would assign the same id and
    // the second save_all would overwrite the first record.
    create_lock: Mutex<()>,
}

impl WaitlistUseCases {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            create_lock: Mutex::new(()),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    #[instrument(skip(self))]
    pub async fn list_entries(&self) -> AppResult<Vec<WaitlistEntry>> {
        self.store.get_all().await
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> AppResult<usize> {
        Ok(self.store.get_all().await?.len())
    }

    /// Validates a submission and appends it to the waitlist.
    ///
    /// Checks run in order: required-field presence, email format,
    /// duplicate email (case-sensitive exact match). Nothing is written
    /// unless all of them pass.
    #[instrument(skip(self, submission), fields(email = ?submission.email))]
    pub async fn submit(&self, submission: Submission) -> AppResult<WaitlistEntry> {
        let name = required_field(submission.name)?;
        let email = required_field(submission.email)?;
        let category = required_field(submission.category)?;
        let category_label = required_field(submission.category_label)?;

        if !is_valid_email(&email) {
            return Err(AppError::InvalidEmailFormat);
        }

        let _guard = self.create_lock.lock().await;

        let mut entries = self.store.get_all().await?;
        if entries.iter().any(|entry| entry.email == email) {
            return Err(AppError::DuplicateEmail);
        }

        let entry = WaitlistEntry {
            id: entries.len() as i64 + 1,
            name,
            email,
            category,
            category_label,
            category_specific: submission.category_specific,
            linkedin_id: submission.linkedin_id,
            created_at: Utc::now(),
        };

        entries.push(entry.clone());
        self.store.save_all(entries).await?;

        tracing::info!(id = entry.id, "Added waitlist entry");
        Ok(entry)
    }
}

fn required_field(value: Option<String>) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::MissingFields),
    }
}
