use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::waitlist::EntryStore,
};

/// Document layout written to disk.
#[derive(Serialize, Deserialize)]
struct FileDocument {
    waitlist: Vec<WaitlistEntry>,
}

// Earlier deployments wrote the bare array; reads accept both layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLayout {
    Document(FileDocument),
    Legacy(Vec<WaitlistEntry>),
}

/// Flat-file entry store: one JSON document at a fixed path, rewritten
/// wholesale on every save. A missing file reads as an empty collection.
pub struct JsonFileEntryStore {
    path: PathBuf,
}

impl JsonFileEntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EntryStore for JsonFileEntryStore {
    async fn get_all(&self) -> AppResult<Vec<WaitlistEntry>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(AppError::StoreUnavailable(format!(
                    "failed to read {}: {err}",
                    self.path.display()
                )));
            }
        };

        let layout: StoredLayout = serde_json::from_slice(&raw).map_err(|err| {
            AppError::StoreUnavailable(format!(
                "failed to parse {}: {err}",
                self.path.display()
            ))
        })?;

        Ok(match layout {
            StoredLayout::Document(doc) => doc.waitlist,
            StoredLayout::Legacy(entries) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Read legacy bare-array waitlist file"
                );
                entries
            }
        })
    }

    async fn save_all(&self, entries: Vec<WaitlistEntry>) -> AppResult<()> {
        let doc = FileDocument { waitlist: entries };
        let raw = serde_json::to_vec_pretty(&doc)
            .map_err(|err| AppError::Internal(format!("failed to serialize waitlist: {err}")))?;

        tokio::fs::write(&self.path, raw).await.map_err(|err| {
            AppError::StoreUnavailable(format!(
                "failed to write {}: {err}",
                self.path.display()
            ))
        })
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
