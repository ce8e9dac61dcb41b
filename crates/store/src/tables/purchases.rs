//! Purchase table access.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqliteConnection;

use clementine_core::{CustomerId, ProductId, PurchaseId};

use crate::db::StoreError;
use crate::models::Purchase;

#[derive(sqlx::FromRow)]
struct PurchaseRow {
    id: PurchaseId,
    purchase_date: NaiveDate,
    amount: String,
    customer_id: CustomerId,
    product_id: ProductId,
}

impl PurchaseRow {
    fn into_purchase(self) -> Result<Purchase, StoreError> {
        let amount = parse_amount(&self.amount)?;
        Ok(Purchase {
            id: Some(self.id),
            purchase_date: self.purchase_date,
            amount,
            customer_id: self.customer_id,
            product_id: self.product_id,
        })
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(raw)
        .map_err(|e| StoreError::DataCorruption(format!("invalid amount in database: {e}")))
}

/// Insert a new purchase row and return its assigned ID.
///
/// # Errors
///
/// Returns `StoreError::InvalidInput` if the purchase already carries an
/// ID, or `StoreError::Database` if the insert fails.
pub async fn insert(
    conn: &mut SqliteConnection,
    purchase: &Purchase,
) -> Result<PurchaseId, StoreError> {
    if purchase.id.is_some() {
        return Err(StoreError::InvalidInput(
            "purchase id must be unassigned on insert".to_owned(),
        ));
    }

    let result = sqlx::query(
        "INSERT INTO purchase (purchase_date, amount, customer_id, product_id)
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(purchase.purchase_date)
    .bind(purchase.amount.to_string())
    .bind(purchase.customer_id)
    .bind(purchase.product_id)
    .execute(&mut *conn)
    .await?;

    Ok(PurchaseId::new(result.last_insert_rowid()))
}

/// Fetch a purchase row by ID.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails, or
/// `StoreError::DataCorruption` if the stored amount no longer parses.
pub async fn fetch(
    conn: &mut SqliteConnection,
    id: PurchaseId,
) -> Result<Option<Purchase>, StoreError> {
    let row: Option<PurchaseRow> = sqlx::query_as(
        "SELECT id, purchase_date, amount, customer_id, product_id
         FROM purchase WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(PurchaseRow::into_purchase).transpose()
}

/// Update a purchase row, returning the number of rows affected (0 or 1).
///
/// # Errors
///
/// Returns `StoreError::InvalidInput` if the purchase has no ID, or
/// `StoreError::Database` if the update fails.
pub async fn update(conn: &mut SqliteConnection, purchase: &Purchase) -> Result<u64, StoreError> {
    let Some(id) = purchase.id else {
        return Err(StoreError::InvalidInput(
            "purchase id must be assigned on update".to_owned(),
        ));
    };

    let result = sqlx::query(
        "UPDATE purchase SET purchase_date = ?1, amount = ?2, customer_id = ?3, product_id = ?4
         WHERE id = ?5",
    )
    .bind(purchase.purchase_date)
    .bind(purchase.amount.to_string())
    .bind(purchase.customer_id)
    .bind(purchase.product_id)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Delete a purchase row, returning the number of rows affected (0 or 1).
///
/// # Errors
///
/// Returns `StoreError::Database` if the delete fails.
pub async fn delete(conn: &mut SqliteConnection, id: PurchaseId) -> Result<u64, StoreError> {
    let result = sqlx::query("DELETE FROM purchase WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

/// Fetch all purchases made by a customer, in ID order.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails, or
/// `StoreError::DataCorruption` if a stored amount no longer parses.
pub async fn fetch_for_customer(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
) -> Result<Vec<Purchase>, StoreError> {
    let rows: Vec<PurchaseRow> = sqlx::query_as(
        "SELECT id, purchase_date, amount, customer_id, product_id
         FROM purchase WHERE customer_id = ?1 ORDER BY id",
    )
    .bind(customer_id)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter().map(PurchaseRow::into_purchase).collect()
}

/// Fetch all purchases of a product, in ID order.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails, or
/// `StoreError::DataCorruption` if a stored amount no longer parses.
pub async fn fetch_for_product(
    conn: &mut SqliteConnection,
    product_id: ProductId,
) -> Result<Vec<Purchase>, StoreError> {
    let rows: Vec<PurchaseRow> = sqlx::query_as(
        "SELECT id, purchase_date, amount, customer_id, product_id
         FROM purchase WHERE product_id = ?1 ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter().map(PurchaseRow::into_purchase).collect()
}

/// Fetch just the amounts of a customer's purchases, in ID order.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails, or
/// `StoreError::DataCorruption` if a stored amount no longer parses.
pub async fn amounts_for_customer(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
) -> Result<Vec<Decimal>, StoreError> {
    let raw: Vec<String> =
        sqlx::query_scalar("SELECT amount FROM purchase WHERE customer_id = ?1 ORDER BY id")
            .bind(customer_id)
            .fetch_all(&mut *conn)
            .await?;

    raw.iter().map(|s| parse_amount(s)).collect()
}
