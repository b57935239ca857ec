use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One waitlist signup record.
///
/// Wire names are camelCase. The optional fields serialize as `null`
/// rather than being omitted, so every stored record carries the full
/// field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    /// Assigned at creation as `count_at_insert + 1`, 1-based.
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Role tag chosen in the signup form (founder, investor, ...).
    pub category: String,
    pub category_label: String,
    #[serde(default)]
    pub category_specific: Option<String>,
    #[serde(default)]
    pub linkedin_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
