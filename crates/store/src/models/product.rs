//! Product domain type.

use clementine_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Surrogate ID assigned by the store on create; `None` until then.
    pub id: Option<ProductId>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Category code; a small non-negative integer.
    pub category: i32,
    /// Universal product code, unique across the catalog.
    pub upc: String,
}
