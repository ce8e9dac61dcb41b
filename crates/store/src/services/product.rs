//! Product persistence service.

use sqlx::SqlitePool;

use clementine_core::ProductId;

use crate::db::{StoreError, transaction};
use crate::models::Product;
use crate::tables::products;

/// Persistence service for catalog products.
///
/// Each operation wraps a single table call in its own transaction, so the
/// commit/rollback discipline is uniform across the store.
pub struct ProductService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductService<'a> {
    /// Create a new product service on the given pool.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new product, returning it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if the product already carries
    /// an ID, `StoreError::Conflict` if its UPC is taken, and
    /// `StoreError::Database` on storage failures.
    pub async fn create(&self, mut product: Product) -> Result<Product, StoreError> {
        if product.id.is_some() {
            return Err(StoreError::InvalidInput(
                "product id must be unassigned on create".to_owned(),
            ));
        }

        transaction(self.pool, move |conn| {
            Box::pin(async move {
                let id = products::insert(conn, &product).await?;
                tracing::debug!(product_id = id.as_i64(), "created product");
                product.id = Some(id);
                Ok(product)
            })
        })
        .await
    }

    /// Retrieve a product by ID; `Ok(None)` if no row matches.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on storage failures.
    pub async fn retrieve(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        transaction(self.pool, move |conn| {
            Box::pin(async move { products::fetch(conn, id).await })
        })
        .await
    }

    /// Update a product, returning the number of rows affected (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if the product has no ID,
    /// `StoreError::Conflict` if the new UPC is taken, and
    /// `StoreError::Database` on storage failures.
    pub async fn update(&self, product: Product) -> Result<u64, StoreError> {
        if product.id.is_none() {
            return Err(StoreError::InvalidInput(
                "product id must be assigned on update".to_owned(),
            ));
        }

        transaction(self.pool, move |conn| {
            Box::pin(async move { products::update(conn, &product).await })
        })
        .await
    }

    /// Delete a product, returning the number of rows affected (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on storage failures.
    pub async fn delete(&self, id: ProductId) -> Result<u64, StoreError> {
        transaction(self.pool, move |conn| {
            Box::pin(async move { products::delete(conn, id).await })
        })
        .await
    }

    /// Retrieve the product carrying the given UPC; `Ok(None)` if no row
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if `upc` is empty, and
    /// `StoreError::Database` on storage failures.
    pub async fn retrieve_by_upc(&self, upc: &str) -> Result<Option<Product>, StoreError> {
        if upc.is_empty() {
            return Err(StoreError::InvalidInput(
                "upc must not be empty".to_owned(),
            ));
        }
        let upc = upc.to_owned();

        transaction(self.pool, move |conn| {
            Box::pin(async move { products::fetch_by_upc(conn, &upc).await })
        })
        .await
    }

    /// Retrieve all products in a category, in result-set order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if `category` is negative
    /// (checked before storage is touched), and `StoreError::Database` on
    /// storage failures.
    pub async fn retrieve_by_category(&self, category: i32) -> Result<Vec<Product>, StoreError> {
        if category < 0 {
            return Err(StoreError::InvalidInput(
                "category must not be negative".to_owned(),
            ));
        }

        transaction(self.pool, move |conn| {
            Box::pin(async move { products::fetch_by_category(conn, category).await })
        })
        .await
    }
}
