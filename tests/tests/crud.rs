use pretty_assertions::assert_eq;
use tablet::FindAll;
use tablet_core::stmt::Value;
use tests::{models, tests, DbTest};

#[derive(Debug, Clone, PartialEq, tablet::Model)]
#[table = "users"]
struct User {
    #[key]
    #[column(type = "varchar(50)")]
    id: String,

    name: String,
    age: i64,
    admin: bool,
    score: f64,

    #[column(text)]
    bio: Option<String>,
}

fn user(id: &str, name: &str, age: i64) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        age,
        admin: true,
        score: 1.5,
        bio: Some(format!("{name} likes tests")),
    }
}

async fn save_then_find(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;

    let mut alice = user("u1", "Alice", 30);
    alice.save(&db).await.unwrap();

    let found = User::find(&db, "u1").await.unwrap().unwrap();
    assert_eq!(found, alice);
}

async fn find_missing_key(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;

    assert!(User::find(&db, "nobody").await.unwrap().is_none());
}

async fn save_logs_insert(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;
    test.log().clear();

    let mut alice = user("u1", "Alice", 30);
    alice.save(&db).await.unwrap();

    let mut log = test.log();
    let op = log.pop();
    assert_eq!(
        op.operation.sql(),
        Some("insert into `users` (`name`, `age`, `admin`, `score`, `bio`, `id`) values (?, ?, ?, ?, ?, ?)")
    );
    assert_eq!(op.response.unwrap().into_count().unwrap(), 1);
    assert!(log.is_empty());
}

async fn update_row(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;

    let mut alice = user("u1", "Alice", 30);
    alice.save(&db).await.unwrap();

    alice.name = "Alicia".to_string();
    alice.age = 31;
    alice.update(&db).await.unwrap();

    let found = User::find(&db, "u1").await.unwrap().unwrap();
    assert_eq!(found.name, "Alicia");
    assert_eq!(found.age, 31);
}

async fn remove_row(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;

    let mut alice = user("u1", "Alice", 30);
    alice.save(&db).await.unwrap();
    alice.remove(&db).await.unwrap();

    assert!(User::find(&db, "u1").await.unwrap().is_none());

    // Removing again affects no rows, which is only a warning
    alice.remove(&db).await.unwrap();
}

async fn optional_field_round_trips_none(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;

    let mut bob = user("u2", "Bob", 40);
    bob.bio = None;
    bob.save(&db).await.unwrap();

    let found = User::find(&db, "u2").await.unwrap().unwrap();
    assert_eq!(found.bio, None);
}

async fn find_all_filter_order_limit(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;

    for (id, name, age) in [("a", "Ann", 20), ("b", "Ben", 35), ("c", "Cat", 50), ("d", "Dan", 65)] {
        user(id, name, age).save(&db).await.unwrap();
    }

    let everyone = User::find_all(&db, FindAll::new().order_by("`id`"))
        .await
        .unwrap();
    assert_eq!(
        everyone.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(),
        ["a", "b", "c", "d"]
    );

    let older = User::find_all(
        &db,
        FindAll::new()
            .filter("`age` > ?", vec![Value::from(30)])
            .order_by("`age` desc")
            .limit(2),
    )
    .await
    .unwrap();
    assert_eq!(
        older.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        ["Dan", "Cat"]
    );

    let page = User::find_all(&db, FindAll::new().order_by("`id`").limit((1, 2)))
        .await
        .unwrap();
    assert_eq!(
        page.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(),
        ["b", "c"]
    );

    // A zero limit is no limit at all
    let all = User::find_all(&db, FindAll::new().limit(0)).await.unwrap();
    assert_eq!(all.len(), 4);
}

async fn find_all_limit_binds_args(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;
    test.log().clear();

    User::find_all(&db, FindAll::new().limit(5)).await.unwrap();
    User::find_all(&db, FindAll::new().limit((10, 5))).await.unwrap();

    let mut log = test.log();

    let tablet_core::driver::Operation::Query(query) = log.pop().operation else {
        panic!("expected a query")
    };
    assert_eq!(
        query.sql,
        "select `name`, `age`, `admin`, `score`, `bio`, `id` from `users` limit ?"
    );
    assert_eq!(query.params, [Value::I64(5)]);

    let tablet_core::driver::Operation::Query(query) = log.pop().operation else {
        panic!("expected a query")
    };
    assert!(query.sql.ends_with(" limit ?, ?"));
    assert_eq!(query.params, [Value::I64(10), Value::I64(5)]);
}

async fn find_all_rejects_bad_limit(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;
    test.log().clear();

    let err = User::find_all(&db, FindAll::new().limit("x"))
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());

    // Nothing reached the database
    assert!(test.log().is_empty());
}

async fn find_number_counts(test: &mut DbTest) {
    let db = test.setup_db(models!(User)).await;

    for (id, name, age) in [("a", "Ann", 20), ("b", "Ben", 35), ("c", "Cat", 50)] {
        user(id, name, age).save(&db).await.unwrap();
    }

    let count = User::find_number(&db, "count(`id`)", None, vec![])
        .await
        .unwrap();
    assert_eq!(count.map(|v| v.into_i64().unwrap()), Some(3));

    let count = User::find_number(&db, "count(`id`)", Some("`age` >= ?"), vec![35.into()])
        .await
        .unwrap();
    assert_eq!(count.map(|v| v.into_i64().unwrap()), Some(2));
}

tests!(
    save_then_find,
    find_missing_key,
    save_logs_insert,
    update_row,
    remove_row,
    optional_field_round_trips_none,
    find_all_filter_order_limit,
    find_all_limit_binds_args,
    find_all_rejects_bad_limit,
    find_number_counts,
);
