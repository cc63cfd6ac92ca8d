use std::sync::atomic::{AtomicI64, Ordering};

use tablet::DefaultPolicy;
use tests::{models, tests, DbTest};

#[derive(Debug, Clone, PartialEq, tablet::Model)]
struct Counter {
    #[key]
    #[default_with(next_id)]
    id: Option<i64>,

    label: String,

    #[default(7)]
    hits: i64,

    #[default("guest")]
    owner: Option<String>,
}

static NEXT_ID: AtomicI64 = AtomicI64::new(100);

fn next_id() -> i64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

fn counter(label: &str) -> Counter {
    Counter {
        id: None,
        label: label.to_string(),
        hits: 3,
        owner: None,
    }
}

async fn unassigned_fields_use_defaults(test: &mut DbTest) {
    let db = test.setup_db(models!(Counter)).await;

    let mut c = counter("a");
    c.save(&db).await.unwrap();

    // Substituted values are written back onto the instance
    let id = c.id.expect("key default was not written back");
    assert!(id >= 100);
    assert_eq!(c.owner.as_deref(), Some("guest"));
    assert_eq!(c.hits, 3);

    let found = Counter::find(&db, id).await.unwrap().unwrap();
    assert_eq!(found, c);
}

async fn factory_runs_for_every_save(test: &mut DbTest) {
    let db = test.setup_db(models!(Counter)).await;

    let mut a = counter("a");
    let mut b = counter("b");
    a.save(&db).await.unwrap();
    b.save(&db).await.unwrap();

    assert_ne!(a.id, b.id);
}

/// The default policy treats an explicit zero like an unassigned field, so
/// the declared default overwrites it. This is the established behavior, not
/// a decision that zero is never a legitimate value.
async fn falsy_policy_replaces_explicit_zero(test: &mut DbTest) {
    let db = test.setup_db(models!(Counter)).await;
    assert_eq!(db.default_policy(), DefaultPolicy::Falsy);

    let mut c = counter("a");
    c.hits = 0;
    c.save(&db).await.unwrap();

    assert_eq!(c.hits, 7);

    let found = Counter::find(&db, c.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(found.hits, 7);
}

async fn unassigned_policy_keeps_explicit_zero(test: &mut DbTest) {
    let mut builder = models!(Counter);
    builder.default_policy(DefaultPolicy::Unassigned);
    let db = test.setup_db(builder).await;

    let mut c = counter("a");
    c.hits = 0;
    c.save(&db).await.unwrap();

    assert_eq!(c.hits, 0);

    // Fields that were never assigned still get their default
    assert!(c.id.is_some());
    assert_eq!(c.owner.as_deref(), Some("guest"));

    let found = Counter::find(&db, c.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(found.hits, 0);
}

async fn update_applies_defaults(test: &mut DbTest) {
    let db = test.setup_db(models!(Counter)).await;

    let mut c = counter("a");
    c.save(&db).await.unwrap();

    c.hits = 0;
    c.owner = None;
    c.update(&db).await.unwrap();

    let found = Counter::find(&db, c.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(found.hits, 7);
    assert_eq!(found.owner.as_deref(), Some("guest"));
}

async fn remove_without_key_uses_default(test: &mut DbTest) {
    let db = test.setup_db(models!(Counter)).await;

    let mut saved = counter("a");
    saved.save(&db).await.unwrap();

    // With no key assigned, remove targets a fresh factory key and deletes
    // nothing
    let mut unsaved = counter("b");
    unsaved.remove(&db).await.unwrap();
    assert!(unsaved.id.is_some());
    assert_ne!(unsaved.id, saved.id);

    assert!(Counter::find(&db, saved.id.unwrap())
        .await
        .unwrap()
        .is_some());
}

tests!(
    unassigned_fields_use_defaults,
    factory_runs_for_every_save,
    falsy_policy_replaces_explicit_zero,
    unassigned_policy_keeps_explicit_zero,
    update_applies_defaults,
    remove_without_key_uses_default,
);
