//! Soft-deleted object DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A soft-deleted entity awaiting restore or purge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedObject {
    pub id: i64,
    /// Backend entity type name, e.g. `circle` or `student`.
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_by: Option<String>,
}
