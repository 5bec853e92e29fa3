use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product: an e-book with the access link emailed to buyers.
///
/// `external_id` is the commerce platform's own identifier for the item
/// and takes priority over the name when matching webhook line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl Product {
    /// Create a new product with a generated ID
    pub fn new(
        name: String,
        link: String,
        description: Option<String>,
        external_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            link,
            description: description.filter(|d| !d.is_empty()),
            external_id: external_id.filter(|e| !e.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() || self.link.trim().is_empty() {
            return Err("Product name and link are required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Product id is required".to_string());
        }
        if self.name.trim().is_empty() || self.link.trim().is_empty() {
            return Err("Product name and link are required".to_string());
        }
        Ok(())
    }

    /// The full product this update replaces the stored row with
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            link: self.link,
            description: self.description.filter(|d| !d.is_empty()),
            external_id: self.external_id.filter(|e| !e.is_empty()),
        }
    }
}
