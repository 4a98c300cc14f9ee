//! Document model -> document mapper

use regret_core::{Document, Fields};
use serde_json::Value;
use tracing::warn;

use crate::models::DocumentModel;

/// Convert DocumentModel to the domain Document
///
/// A payload that is not a JSON object maps to an empty field set.
impl From<DocumentModel> for Document {
    fn from(model: DocumentModel) -> Self {
        let fields = match model.data {
            Value::Object(fields) => fields,
            other => {
                warn!(
                    collection = %model.collection,
                    id = %model.id,
                    payload = ?other,
                    "Document payload is not an object"
                );
                Fields::new()
            }
        };

        Document {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            fields,
        }
    }
}
