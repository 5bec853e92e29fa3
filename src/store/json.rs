use crate::models::{EmailSettings, EmailTemplate, HistoryEntry, Product};
use crate::store::{Store, StoreResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;

/// The whole on-disk document. Missing keys default, so a hand-edited or
/// partial file still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Document {
    products: Vec<Product>,
    settings: Option<EmailSettings>,
    email_template: Option<EmailTemplate>,
    history: Vec<HistoryEntry>,
}

/// Document-store backend: one JSON file holding all four collections.
///
/// Every operation is a read-modify-write of the full document. The mutex
/// serializes those sequences so concurrent webhook and admin requests
/// cannot lose each other's writes.
pub struct JsonStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Reads the document; a missing file is not an error — the empty
    /// document is written out so later reads see a consistent store.
    async fn read_document(&self) -> StoreResult<Document> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let empty = Document::default();
                self.write_document(&empty).await?;
                tracing::info!("Initialized empty store document at {}", self.path.display());
                Ok(empty)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn write_document(&self, doc: &Document) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, raw).await?;
        Ok(())
    }

    async fn read(&self) -> StoreResult<Document> {
        let _guard = self.lock.lock().await;
        self.read_document().await
    }

    async fn update<F>(&self, mutate: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Document) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        mutate(&mut doc);
        self.write_document(&doc).await
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let mut products = self.read().await?.products;
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        let product = product.clone();
        self.update(move |doc| doc.products.push(product)).await
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        let product = product.clone();
        self.update(move |doc| {
            if let Some(existing) = doc.products.iter_mut().find(|p| p.id == product.id) {
                *existing = product;
            }
        })
        .await
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();
        self.update(move |doc| doc.products.retain(|p| p.id != id))
            .await
    }

    async fn get_settings(&self) -> StoreResult<Option<EmailSettings>> {
        Ok(self.read().await?.settings)
    }

    async fn save_settings(&self, settings: &EmailSettings) -> StoreResult<()> {
        let settings = settings.clone();
        self.update(move |doc| doc.settings = Some(settings)).await
    }

    async fn get_template(&self) -> StoreResult<Option<EmailTemplate>> {
        Ok(self.read().await?.email_template)
    }

    async fn save_template(&self, template: &EmailTemplate) -> StoreResult<()> {
        let template = template.clone();
        self.update(move |doc| doc.email_template = Some(template))
            .await
    }

    async fn list_history(&self, limit: i64) -> StoreResult<Vec<HistoryEntry>> {
        let history = self.read().await?.history;
        Ok(history.into_iter().take(limit.max(0) as usize).collect())
    }

    async fn append_history(&self, entries: &[HistoryEntry]) -> StoreResult<()> {
        let entries = entries.to_vec();
        self.update(move |doc| {
            for entry in entries {
                doc.history.insert(0, entry);
            }
        })
        .await
    }
}
