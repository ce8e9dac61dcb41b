//! Product table access.

use sqlx::SqliteConnection;

use clementine_core::ProductId;

use crate::db::StoreError;
use crate::models::Product;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    category: i32,
    upc: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            category: row.category,
            upc: row.upc,
        }
    }
}

fn map_unique_violation(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return StoreError::Conflict("product upc already exists".to_owned());
    }
    StoreError::Database(e)
}

/// Insert a new product row and return its assigned ID.
///
/// # Errors
///
/// Returns `StoreError::InvalidInput` if the product already carries an
/// ID, `StoreError::Conflict` if its UPC is taken, or
/// `StoreError::Database` for other failures.
pub async fn insert(conn: &mut SqliteConnection, product: &Product) -> Result<ProductId, StoreError> {
    if product.id.is_some() {
        return Err(StoreError::InvalidInput(
            "product id must be unassigned on insert".to_owned(),
        ));
    }

    let result = sqlx::query(
        "INSERT INTO product (name, description, category, upc) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.category)
    .bind(&product.upc)
    .execute(&mut *conn)
    .await
    .map_err(map_unique_violation)?;

    Ok(ProductId::new(result.last_insert_rowid()))
}

/// Fetch a product row by ID.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub async fn fetch(
    conn: &mut SqliteConnection,
    id: ProductId,
) -> Result<Option<Product>, StoreError> {
    let row: Option<ProductRow> = sqlx::query_as(
        "SELECT id, name, description, category, upc FROM product WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(Product::from))
}

/// Update a product row, returning the number of rows affected (0 or 1).
///
/// # Errors
///
/// Returns `StoreError::InvalidInput` if the product has no ID,
/// `StoreError::Conflict` if the new UPC is taken, or
/// `StoreError::Database` for other failures.
pub async fn update(conn: &mut SqliteConnection, product: &Product) -> Result<u64, StoreError> {
    let Some(id) = product.id else {
        return Err(StoreError::InvalidInput(
            "product id must be assigned on update".to_owned(),
        ));
    };

    let result = sqlx::query(
        "UPDATE product SET name = ?1, description = ?2, category = ?3, upc = ?4 WHERE id = ?5",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.category)
    .bind(&product.upc)
    .bind(id)
    .execute(&mut *conn)
    .await
    .map_err(map_unique_violation)?;

    Ok(result.rows_affected())
}

/// Delete a product row, returning the number of rows affected (0 or 1).
///
/// # Errors
///
/// Returns `StoreError::Database` if the delete fails.
pub async fn delete(conn: &mut SqliteConnection, id: ProductId) -> Result<u64, StoreError> {
    let result = sqlx::query("DELETE FROM product WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

/// Fetch all products in a category, in ID order.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub async fn fetch_by_category(
    conn: &mut SqliteConnection,
    category: i32,
) -> Result<Vec<Product>, StoreError> {
    let rows: Vec<ProductRow> = sqlx::query_as(
        "SELECT id, name, description, category, upc FROM product
         WHERE category = ?1 ORDER BY id",
    )
    .bind(category)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(Product::from).collect())
}

/// Fetch the product with the given UPC, if any.
///
/// The UPC column is unique, so at most one row can match.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub async fn fetch_by_upc(
    conn: &mut SqliteConnection,
    upc: &str,
) -> Result<Option<Product>, StoreError> {
    let row: Option<ProductRow> = sqlx::query_as(
        "SELECT id, name, description, category, upc FROM product WHERE upc = ?1",
    )
    .bind(upc)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(Product::from))
}
