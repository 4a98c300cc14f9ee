//! Document database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the documents table
#[derive(Debug, Clone, FromRow)]
pub struct DocumentModel {
    pub collection: String,
    pub id: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentModel {
    /// Whether the stored payload is a JSON object
    #[inline]
    pub fn has_object_data(&self) -> bool {
        self.data.is_object()
    }
}
