//! Shared fixtures for service tests

use std::sync::Arc;

use chrono::{Duration, Utc};
use regret_cache::MemoryVoteLedgerProvider;
use regret_core::{Collection, Document, Fields};
use regret_db::MemoryDocumentStore;
use serde_json::{json, Value};

use super::context::{ServiceContext, ServiceContextBuilder};

/// Context over fresh in-memory backends, plus a handle to the store
pub fn memory_context() -> (ServiceContext, Arc<MemoryDocumentStore>) {
    let store = Arc::new(MemoryDocumentStore::new());
    let ctx = ServiceContextBuilder::new()
        .store(store.clone())
        .vote_ledgers(Arc::new(MemoryVoteLedgerProvider::new()))
        .build()
        .unwrap();
    (ctx, store)
}

pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(fields) => fields,
        other => panic!("expected an object, got {other}"),
    }
}

/// Store a story document created `days_ago` days in the past
pub fn seed_story(store: &MemoryDocumentStore, id: &str, days_ago: i64, extra: Value) -> Document {
    let mut data = fields(json!({
        "title": format!("Story {id} title"),
        "story": "I kept putting it off until the chance was gone for good.",
        "lesson": "Do the thing while you still can.",
        "category": "career",
        "anonymous_id": "anon_seed",
        "reactions": r#"{"me_too":0,"hugs":0,"wisdom":0}"#,
        "comment_count": 0,
        "is_featured": false,
    }));
    data.extend(fields(extra));

    let mut doc = Document::new(id, data);
    doc.created_at = Utc::now() - Duration::days(days_ago);
    doc.updated_at = doc.created_at;
    store.insert(Collection::Regrets, doc.clone());
    doc
}

/// Store a comment document on `story_id`
pub fn seed_comment(store: &MemoryDocumentStore, id: &str, story_id: &str, minutes_ago: i64) -> Document {
    let mut doc = Document::new(
        id,
        fields(json!({
            "regret_id": story_id,
            "content": format!("Comment {id} on the story"),
            "anonymous_id": "anon_seed",
            "comment_type": "support",
            "reactions": r#"{"helpful":0,"heart":0}"#,
        })),
    );
    doc.created_at = Utc::now() - Duration::minutes(minutes_ago);
    doc.updated_at = doc.created_at;
    store.insert(Collection::Comments, doc.clone());
    doc
}
