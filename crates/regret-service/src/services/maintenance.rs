//! Maintenance service
//!
//! One-off repair pass that rewrites malformed stored reaction bundles and
//! sliding doors records in canonical form.

use regret_core::{
    field, lenient, Collection, Document, Fields, ListQuery, ReactionBundle, SlidingDoors,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Documents read per list call
const REPAIR_BATCH_SIZE: usize = 200;

/// Outcome of a repair pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    /// Documents examined
    pub scanned: u64,
    /// Documents rewritten
    pub updated: u64,
    /// Documents whose rewrite failed
    pub failed: u64,
}

impl RepairReport {
    fn merge(&mut self, other: RepairReport) {
        self.scanned += other.scanned;
        self.updated += other.updated;
        self.failed += other.failed;
    }
}

/// Maintenance service
pub struct MaintenanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MaintenanceService<'a> {
    /// Create a new MaintenanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Re-serialize every stored reaction bundle and sliding doors record
    ///
    /// A field is only written when its canonical text differs from what is
    /// stored. Values that cannot be recovered are left untouched. A failed
    /// update is logged and counted, and the pass moves on.
    #[instrument(skip(self))]
    pub async fn repair_stored_json(&self) -> ServiceResult<RepairReport> {
        let mut report = self.repair_collection(Collection::Regrets).await?;
        report.merge(self.repair_collection(Collection::Comments).await?);

        info!(
            scanned = report.scanned,
            updated = report.updated,
            failed = report.failed,
            "Stored JSON repair finished"
        );

        Ok(report)
    }

    async fn repair_collection(&self, collection: Collection) -> ServiceResult<RepairReport> {
        let store = self.ctx.store();
        let mut report = RepairReport::default();
        let mut offset = 0;

        loop {
            let query = ListQuery::new().limit(REPAIR_BATCH_SIZE).offset(offset);
            let page = store.list(collection, &query).await?;
            if page.documents.is_empty() {
                break;
            }
            offset += page.documents.len();

            for document in &page.documents {
                report.scanned += 1;
                let patch = repair_patch(collection, document);
                if patch.is_empty() {
                    continue;
                }

                match store.update(collection, &document.id, patch).await {
                    Ok(_) => report.updated += 1,
                    Err(e) => {
                        warn!(
                            collection = %collection,
                            id = %document.id,
                            error = %e,
                            "Failed to repair document"
                        );
                        report.failed += 1;
                    }
                }
            }

            if offset as u64 >= page.total {
                break;
            }
        }

        Ok(report)
    }
}

/// Fields of `document` whose canonical text differs from the stored value
fn repair_patch(collection: Collection, document: &Document) -> Fields {
    let mut patch = Fields::new();

    let default = match collection {
        Collection::Regrets => ReactionBundle::story_default(),
        Collection::Comments => ReactionBundle::comment_default(),
    };
    if let Some(text) = repaired_reactions(document, &default) {
        patch.insert(field::REACTIONS.into(), Value::from(text));
    }

    if collection == Collection::Regrets {
        if let Some(text) = repaired_sliding_doors(document) {
            patch.insert(field::SLIDING_DOORS.into(), Value::from(text));
        }
    }

    patch
}

/// Canonical bundle text, when the stored one is readable but not canonical
fn repaired_reactions(document: &Document, default: &ReactionBundle) -> Option<String> {
    let stored = document.field(field::REACTIONS)?;
    let text = match stored {
        Value::String(text) => text.clone(),
        Value::Null => return None,
        // Raw objects are re-encoded as text
        other => other.to_string(),
    };
    lenient::parse_object(Some(&text))?;

    let canonical = ReactionBundle::parse(Some(&text), default).serialize();
    (stored.as_str() != Some(canonical.as_str())).then_some(canonical)
}

fn repaired_sliding_doors(document: &Document) -> Option<String> {
    let stored = document.field(field::SLIDING_DOORS)?;
    let text = match stored {
        Value::String(text) => text.clone(),
        Value::Null => return None,
        other => other.to_string(),
    };

    let canonical = SlidingDoors::parse(Some(&text))?.serialize();

    // Key order is not significant, so compare parsed values
    let current = stored
        .as_str()
        .and_then(|s| serde_json::from_str::<Value>(s).ok());
    let unchanged = current.is_some() && current == serde_json::from_str(&canonical).ok();
    (!unchanged).then_some(canonical)
}
