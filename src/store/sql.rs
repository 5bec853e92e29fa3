use crate::models::{EmailSettings, EmailTemplate, HistoryEntry, Product, SendStatus};
use crate::store::{Store, StoreResult};
use async_trait::async_trait;
use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, Row};

/// Relational backend over sqlx `AnyPool` (SQLite or PostgreSQL by URL).
///
/// Columns are snake_case; the adapter maps them onto the camelCase wire
/// models so callers see no difference from the document store. Settings
/// and template live in singleton rows keyed `id = 1`.
pub struct SqlStore {
    pool: AnyPool,
}

impl SqlStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Idempotent DDL run at startup
    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                link TEXT NOT NULL,
                description TEXT,
                external_id TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY,
                sender_name TEXT NOT NULL,
                sender_email TEXT NOT NULL,
                smtp_host TEXT NOT NULL,
                smtp_port INTEGER NOT NULL,
                smtp_user TEXT NOT NULL,
                smtp_password TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS email_template (
                id INTEGER PRIMARY KEY,
                subject TEXT NOT NULL,
                body TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        // seq orders entries within a batch; display reads it descending
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS history (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                customer_name TEXT NOT NULL,
                customer_email TEXT NOT NULL,
                order_number TEXT NOT NULL,
                total REAL NOT NULL,
                product_name TEXT NOT NULL,
                product_link TEXT,
                status TEXT NOT NULL,
                error_message TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn product_from_row(row: &sqlx::any::AnyRow) -> StoreResult<Product> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        link: row.try_get("link")?,
        description: row.try_get("description").ok(),
        external_id: row.try_get("external_id").ok(),
    })
}

#[async_trait]
impl Store for SqlStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, link, description, external_id
             FROM products
             ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut products = Vec::with_capacity(rows.len());
        for row in &rows {
            products.push(product_from_row(row)?);
        }
        Ok(products)
    }

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO products (id, name, link, description, external_id)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.link)
        .bind(product.description.as_deref())
        .bind(product.external_id.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        sqlx::query(
            "UPDATE products
             SET name = ?, link = ?, description = ?, external_id = ?
             WHERE id = ?",
        )
        .bind(&product.name)
        .bind(&product.link)
        .bind(product.description.as_deref())
        .bind(product.external_id.as_deref())
        .bind(&product.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_settings(&self) -> StoreResult<Option<EmailSettings>> {
        let row = sqlx::query(
            "SELECT sender_name, sender_email, smtp_host, smtp_port, smtp_user, smtp_password
             FROM settings
             WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(EmailSettings {
                sender_name: row.try_get("sender_name")?,
                sender_email: row.try_get("sender_email")?,
                smtp_host: row.try_get("smtp_host")?,
                smtp_port: row.try_get::<i64, _>("smtp_port")? as u16,
                smtp_user: row.try_get("smtp_user")?,
                smtp_password: row.try_get("smtp_password")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn save_settings(&self, settings: &EmailSettings) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO settings (id, sender_name, sender_email, smtp_host, smtp_port, smtp_user, smtp_password)
             VALUES (1, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 sender_name = excluded.sender_name,
                 sender_email = excluded.sender_email,
                 smtp_host = excluded.smtp_host,
                 smtp_port = excluded.smtp_port,
                 smtp_user = excluded.smtp_user,
                 smtp_password = excluded.smtp_password",
        )
        .bind(&settings.sender_name)
        .bind(&settings.sender_email)
        .bind(&settings.smtp_host)
        .bind(settings.smtp_port as i64)
        .bind(&settings.smtp_user)
        .bind(&settings.smtp_password)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_template(&self) -> StoreResult<Option<EmailTemplate>> {
        let row = sqlx::query("SELECT subject, body FROM email_template WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            Ok(Some(EmailTemplate {
                subject: row.try_get("subject")?,
                body: row.try_get("body")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn save_template(&self, template: &EmailTemplate) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO email_template (id, subject, body)
             VALUES (1, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 subject = excluded.subject,
                 body = excluded.body",
        )
        .bind(&template.subject)
        .bind(&template.body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_history(&self, limit: i64) -> StoreResult<Vec<HistoryEntry>> {
        let rows = sqlx::query(
            "SELECT id, created_at, customer_name, customer_email, order_number,
                    total, product_name, product_link, status, error_message
             FROM history
             ORDER BY seq DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(HistoryEntry {
                id: row.try_get("id")?,
                created_at: row.try_get("created_at")?,
                customer_name: row.try_get("customer_name")?,
                customer_email: row.try_get("customer_email")?,
                order_number: row.try_get("order_number")?,
                total: row.try_get("total")?,
                product_name: row.try_get("product_name")?,
                product_link: row.try_get("product_link").ok(),
                status: SendStatus::from(row.try_get::<String, _>("status")?),
                error_message: row.try_get("error_message").ok(),
            });
        }
        Ok(entries)
    }

    async fn append_history(&self, entries: &[HistoryEntry]) -> StoreResult<()> {
        for entry in entries {
            sqlx::query(
                "INSERT INTO history (
                     id, created_at, customer_name, customer_email, order_number,
                     total, product_name, product_link, status, error_message
                 ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&entry.id)
            .bind(&entry.created_at)
            .bind(&entry.customer_name)
            .bind(&entry.customer_email)
            .bind(&entry.order_number)
            .bind(entry.total)
            .bind(&entry.product_name)
            .bind(entry.product_link.as_deref())
            .bind(entry.status.as_str())
            .bind(entry.error_message.as_deref())
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
