//! Notes store integration tests against a real PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p notesctl-core -- --ignored
//!
//! Each test gets its own schema so table contents never leak between tests.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use notesctl_core::db::{create_pool, ensure_schema};
use notesctl_core::{
    Clock, FixedClock, IdGenerator, NanoIdGenerator, NotesError, NotesStore, NOTE_ID_LEN,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

struct TestDb {
    admin: PgPool,
    schema: String,
    store: NotesStore,
    clock: Arc<FixedClock>,
}

impl TestDb {
    async fn new() -> Self {
        Self::with_ids(Arc::new(NanoIdGenerator::new())).await
    }

    async fn with_ids(ids: Arc<dyn IdGenerator>) -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let admin = create_pool(&url).await.expect("pool creation failed");

        let suffix: String = NanoIdGenerator::new()
            .generate()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        let schema = format!("notesctl_test_{}", suffix);

        admin
            .execute(format!("CREATE SCHEMA {}", schema).as_str())
            .await
            .expect("create schema failed");

        let search_path = format!("SET search_path TO {}", schema);
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .after_connect(move |conn, _meta| {
                let sql = search_path.clone();
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect(&url)
            .await
            .expect("scoped pool creation failed");

        ensure_schema(&pool).await.expect("schema setup failed");

        let start = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let store = NotesStore::with_collaborators(pool, ids, clock.clone());

        Self {
            admin,
            schema,
            store,
            clock,
        }
    }

    async fn teardown(self) {
        self.store.pool().close().await;
        self.admin
            .execute(format!("DROP SCHEMA {} CASCADE", self.schema).as_str())
            .await
            .expect("drop schema failed");
    }
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_then_get_round_trips() {
    let db = TestDb::new().await;

    let id = db
        .store
        .create("Title", "Body text", &tags(&["a", "b", "c"]))
        .await
        .expect("create failed");
    let note = db.store.get_by_id(&id).await.expect("get failed");

    assert_eq!(note.id, id);
    assert_eq!(note.title, "Title");
    assert_eq!(note.body, "Body text");
    assert_eq!(note.tags, tags(&["a", "b", "c"]));
    assert_eq!(note.created_at, note.updated_at);
    assert_eq!(note.created_at, db.clock.now());

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_tags_are_preserved() {
    let db = TestDb::new().await;

    let id = db.store.create("", "", &[]).await.expect("create failed");
    let note = db.store.get_by_id(&id).await.expect("get failed");

    assert!(note.tags.is_empty());
    assert_eq!(note.title, "");

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_ids_are_not_found() {
    let db = TestDb::new().await;
    let missing = "doesnotexist0000";

    let err = db.store.get_by_id(missing).await.unwrap_err();
    assert!(err.is_not_found(), "get: {err}");

    let err = db
        .store
        .update_by_id(missing, "t", "b", &tags(&["x"]))
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "update: {err}");

    let err = db.store.delete_by_id(missing).await.unwrap_err();
    assert!(err.is_not_found(), "delete: {err}");

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_keeps_created_at() {
    let db = TestDb::new().await;

    let id = db
        .store
        .create("t1", "b1", &tags(&["one"]))
        .await
        .expect("create failed");
    let before = db.store.get_by_id(&id).await.expect("get failed");

    db.clock.advance(Duration::minutes(5));
    db.store
        .update_by_id(&id, "t2", "b2", &tags(&["two", "three"]))
        .await
        .expect("update failed");
    let after = db.store.get_by_id(&id).await.expect("get failed");

    assert_eq!(after.title, "t2");
    assert_eq!(after.body, "b2");
    assert_eq!(after.tags, tags(&["two", "three"]));
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.updated_at, before.updated_at + Duration::minutes(5));

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_without_clock_advance_is_not_earlier() {
    let db = TestDb::new().await;

    let id = db.store.create("t", "b", &[]).await.expect("create failed");
    let before = db.store.get_by_id(&id).await.expect("get failed");

    db.store
        .update_by_id(&id, "t", "b", &[])
        .await
        .expect("update failed");
    let after = db.store.get_by_id(&id).await.expect("get failed");

    assert!(after.updated_at >= before.updated_at);
    assert!(after.updated_at >= after.created_at);

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleted_note_is_gone() {
    let db = TestDb::new().await;

    let id = db.store.create("t", "b", &[]).await.expect("create failed");
    db.store.delete_by_id(&id).await.expect("delete failed");

    let err = db.store.get_by_id(&id).await.unwrap_err();
    assert!(err.is_not_found());

    let err = db.store.delete_by_id(&id).await.unwrap_err();
    assert!(err.is_not_found());

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_all_returns_every_created_note() {
    let db = TestDb::new().await;

    assert!(db.store.list_all().await.expect("list failed").is_empty());

    let mut created = HashSet::new();
    for i in 0..5 {
        let id = db
            .store
            .create(&format!("note {}", i), "body", &tags(&["bulk"]))
            .await
            .expect("create failed");
        created.insert(id);
    }

    let listed = db.store.list_all().await.expect("list failed");
    assert_eq!(listed.len(), 5);

    let listed_ids: HashSet<String> = listed.into_iter().map(|n| n.id).collect();
    assert_eq!(listed_ids, created);

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn shopping_scenario() {
    let db = TestDb::new().await;

    let id = db
        .store
        .create("Shopping", "Buy milk", &tags(&["errand"]))
        .await
        .expect("create failed");
    assert_eq!(id.len(), NOTE_ID_LEN);

    let note = db.store.get_by_id(&id).await.expect("get failed");
    let t = note.created_at;
    assert_eq!(note.title, "Shopping");
    assert_eq!(note.body, "Buy milk");
    assert_eq!(note.tags, tags(&["errand"]));
    assert_eq!(note.updated_at, t);

    db.clock.advance(Duration::seconds(1));
    db.store
        .update_by_id(&id, "Shopping v2", "Buy milk and eggs", &tags(&["errand", "food"]))
        .await
        .expect("update failed");

    let note = db.store.get_by_id(&id).await.expect("get failed");
    assert_eq!(note.title, "Shopping v2");
    assert_eq!(note.body, "Buy milk and eggs");
    assert_eq!(note.tags, tags(&["errand", "food"]));
    assert!(note.updated_at > t);
    assert_eq!(note.created_at, t);

    db.store.delete_by_id(&id).await.expect("delete failed");
    let err = db.store.get_by_id(&id).await.unwrap_err();
    assert!(matches!(err, NotesError::NotFound { .. }));

    db.teardown().await;
}

/// Always hands out the same id
struct ConstantIds;

impl IdGenerator for ConstantIds {
    fn generate(&self) -> String {
        "AAAAAAAAAAAAAAAA".to_string()
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_id_surfaces_driver_error() {
    let db = TestDb::with_ids(Arc::new(ConstantIds)).await;

    let id = db.store.create("first", "b", &[]).await.expect("create failed");
    assert_eq!(id, "AAAAAAAAAAAAAAAA");

    let err = db.store.create("second", "b", &[]).await.unwrap_err();
    assert!(matches!(err, NotesError::Database(_)), "{err}");
    assert!(!err.is_not_found());
    assert!(!err.is_invariant());

    db.teardown().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn concurrent_creates_share_the_pool() {
    let db = TestDb::new().await;

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let store = db.store.clone();
            tokio::spawn(async move {
                store
                    .create(&format!("concurrent {}", i), "body", &[])
                    .await
                    .expect("concurrent create failed")
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.expect("task panicked"));
    }

    assert_eq!(ids.len(), 10);
    assert_eq!(db.store.list_all().await.expect("list failed").len(), 10);

    db.teardown().await;
}

/// Hands out an empty id, which the insert echoes back as nothing usable
struct EmptyIds;

impl IdGenerator for EmptyIds {
    fn generate(&self) -> String {
        String::new()
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn unconfirmed_insert_is_an_invariant_violation() {
    let db = TestDb::with_ids(Arc::new(EmptyIds)).await;

    let err = db.store.create("t", "b", &tags(&["x"])).await.unwrap_err();

    assert!(err.is_invariant(), "{err}");
    assert!(!err.is_not_found());
    assert_eq!(err.to_string(), "invariant violation: note could not be added");

    db.teardown().await;
}
