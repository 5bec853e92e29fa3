use bookdrop::models::EmailSettings;
use bookdrop::store::{JsonStore, SqlStore};
use uuid::Uuid;

/// JSON store backed by a unique file per test, for parallel execution
pub fn setup_json_store() -> (JsonStore, String) {
    let path = format!("test_{}.json", Uuid::new_v4());
    (JsonStore::new(&path), path)
}

pub async fn teardown_json_store(path: &str) {
    let _ = tokio::fs::remove_file(path).await;
}

/// SQLite-backed relational store with a unique file per test
pub async fn setup_sql_store() -> (SqlStore, String) {
    let file = format!("test_{}.db", Uuid::new_v4());
    let url = format!("sqlite://{}?mode=rwc", file);
    let store = SqlStore::connect(&url)
        .await
        .expect("Failed to connect to test database");
    (store, file)
}

pub async fn teardown_sql_store(file: &str) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = tokio::fs::remove_file(format!("{}{}", file, suffix)).await;
    }
}

pub fn test_settings() -> EmailSettings {
    EmailSettings {
        sender_name: "Bookshop".to_string(),
        sender_email: "shop@example.com".to_string(),
        smtp_host: "smtp.example.com".to_string(),
        smtp_port: 587,
        smtp_user: "shop@example.com".to_string(),
        smtp_password: "app-password".to_string(),
    }
}
