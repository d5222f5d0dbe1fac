//! Integration tests for schema recreation and seeding


use test_helpers::*;
use users_storage::{seed, StorageError};

#[tokio::test]
async fn test_recreate_schema_empties_users() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "abel", "abel.huanca@upeu.edu.pe").await;
    create_test_user(pool, "fredy", "abelthf@gmail.com").await;

    users_storage::recreate_schema(pool).await.unwrap();

    assert_eq!(users_storage::users::count(pool).await.unwrap(), 0);

    // Schema is usable again, and the old emails are free
    create_test_user(pool, "abel", "abel.huanca@upeu.edu.pe").await;
    assert_eq!(users_storage::users::count(pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_recreate_schema_on_empty_database() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("fresh.db").display());
    let pool = users_storage::create_pool(&db_url, 1).await.unwrap();

    users_storage::recreate_schema(&pool).await.unwrap();

    assert_eq!(users_storage::users::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_seed_inserts_fixed_users() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let created = seed::seed(pool).await.unwrap();

    assert_eq!(created.len(), seed::SEED_USERS.len());
    let users = users_storage::users::get_all(pool).await.unwrap();
    assert_eq!(users[0].username, "fredy");
    assert_eq!(users[0].email, "abelthf@gmail.com");
    assert_eq!(users[1].username, "abel");
    assert_eq!(users[1].email, "abel.huanca@upeu.edu.pe");
}

#[tokio::test]
async fn test_second_seed_fails_without_partial_writes() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    seed::seed(pool).await.unwrap();
    let err = seed::seed(pool).await.unwrap_err();

    assert!(matches!(err, StorageError::Duplicate { .. }));
    assert_eq!(users_storage::users::count(pool).await.unwrap(), 2);
}

#[tokio::test]
async fn test_create_pool_creates_missing_directories() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("data").join("nested").join("users.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let pool = users_storage::create_pool(&db_url, 1).await.unwrap();
    users_storage::run_migrations(&pool).await.unwrap();

    assert!(db_path.exists());
    assert_eq!(users_storage::users::count(&pool).await.unwrap(), 0);
}
