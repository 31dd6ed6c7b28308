//! Product records stored in the catalog data file.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One uploaded model and its metadata.
///
/// Serialized field order is `id`, `name`, `description`, `model`, which is the
/// order records appear in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// 1-based position at creation time.
    pub id: ProductId,
    /// Display name supplied by the uploader.
    pub name: String,
    /// Free-text description supplied by the uploader.
    pub description: String,
    /// Filename of the model inside the upload directory.
    pub model: String,
}

/// The uploader-supplied part of a product, before an ID is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub model: String,
}

impl NewProduct {
    /// Assign the next ID given the number of records already stored.
    #[must_use]
    pub fn into_product(self, existing: usize) -> Product {
        Product {
            id: ProductId::after(existing),
            name: self.name,
            description: self.description,
            model: self.model,
        }
    }
}
