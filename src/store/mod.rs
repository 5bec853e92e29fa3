pub mod json;
pub mod sql;

pub use json::JsonStore;
pub use sql::SqlStore;

use crate::models::{EmailSettings, EmailTemplate, HistoryEntry, Product};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt store document: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence adapter over the four collections: products, settings,
/// email template, history. The JSON-document and relational backends are
/// interchangeable behind this trait; callers never branch on which one is
/// active, and schema differences stay inside the implementations.
#[async_trait]
pub trait Store: Send + Sync {
    /// Catalog, sorted by product name
    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    async fn insert_product(&self, product: &Product) -> StoreResult<()>;

    /// Overwrites all fields of the product with the given id; no-op when
    /// the id is unknown
    async fn update_product(&self, product: &Product) -> StoreResult<()>;

    async fn delete_product(&self, id: &str) -> StoreResult<()>;

    async fn get_settings(&self) -> StoreResult<Option<EmailSettings>>;

    /// Wholesale overwrite of the settings singleton
    async fn save_settings(&self, settings: &EmailSettings) -> StoreResult<()>;

    async fn get_template(&self) -> StoreResult<Option<EmailTemplate>>;

    async fn save_template(&self, template: &EmailTemplate) -> StoreResult<()>;

    /// Newest entries first
    async fn list_history(&self, limit: i64) -> StoreResult<Vec<HistoryEntry>>;

    /// Prepends the batch entry by entry, keeping prior entries intact, so
    /// the most recently appended entry displays first
    async fn append_history(&self, entries: &[HistoryEntry]) -> StoreResult<()>;
}
