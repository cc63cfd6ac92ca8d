use std::sync::OnceLock;

use tablet::{stmt::Primitive, Field, Model, Record, Schema};
use tests::{models, tests, DbTest};

#[derive(Debug, tablet::Model)]
#[table = "posts"]
struct Post {
    #[key]
    id: i64,

    title: String,
}

#[derive(Debug, tablet::Model)]
struct Tag {
    #[key]
    name: String,
}

/// Registered by hand, without the derive. It declares no key.
#[derive(Debug)]
struct Orphan {
    name: String,
}

impl Model for Orphan {
    fn schema() -> tablet::Result<&'static Schema> {
        static SCHEMA: OnceLock<tablet::Result<Schema>> = OnceLock::new();

        SCHEMA
            .get_or_init(|| {
                Schema::builder("Orphan")
                    .field("name", Field::string())
                    .build()
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn load(mut record: Record) -> tablet::Result<Self> {
        Ok(Self {
            name: String::load(record.take("name").unwrap_or_default())?,
        })
    }

    fn record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name", self.name.as_str());
        record
    }
}

async fn push_schema_creates_tables(test: &mut DbTest) {
    let db = test.setup_db(models!(Post, Tag)).await;

    assert_eq!(
        db.schemas()
            .iter()
            .map(|schema| schema.table_name.as_str())
            .collect::<Vec<_>>(),
        ["posts", "tag"]
    );

    Post {
        id: 1,
        title: "hello".to_string(),
    }
    .save(&db)
    .await
    .unwrap();
    Tag {
        name: "rust".to_string(),
    }
    .save(&db)
    .await
    .unwrap();

    // Pushing again leaves existing tables alone
    db.push_schema().await.unwrap();

    let post = Post::find(&db, 1).await.unwrap().unwrap();
    assert_eq!(post.title, "hello");
    assert!(Tag::find(&db, "rust").await.unwrap().is_some());
}

async fn builder_reports_invalid_model(test: &mut DbTest) {
    let err = test
        .try_setup_db(models!(Post, Orphan))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("invalid model `"), "{message}");
    assert!(message.contains("Orphan"), "{message}");
    assert!(
        message.ends_with("table `orphan` has no primary key"),
        "{message}"
    );
}

async fn unregistered_model_fails_on_use(test: &mut DbTest) {
    let db = test.setup_db(models!(Post)).await;

    let err = db.find::<Orphan>("x").await.unwrap_err();
    assert!(err.is_missing_primary_key());
}

tests!(
    push_schema_creates_tables,
    builder_reports_invalid_model,
    unregistered_model_fails_on_use,
);

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn connect_with_sqlite_config() {
    tests::init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.db");

    let mut config = tablet::db::Config::new(path.display().to_string(), "", "");
    config.scheme = "sqlite".to_string();
    config.min_size = 2;

    let db = tablet::Db::builder()
        .register::<Post>()
        .config(config)
        .connect_with_config()
        .await
        .unwrap();

    assert_eq!(db.pool_status().size, 2);

    db.push_schema().await.unwrap();
    Post {
        id: 7,
        title: "configured".to_string(),
    }
    .save(&db)
    .await
    .unwrap();

    assert!(path.exists());
    assert_eq!(Post::find(&db, 7).await.unwrap().unwrap().title, "configured");
}

#[tokio::test]
async fn connect_without_config_fails() {
    let err = tablet::Db::builder().connect_with_config().await.unwrap_err();
    assert!(err.is_invalid_connection_url());
}
