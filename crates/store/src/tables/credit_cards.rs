//! Credit card table access.
//!
//! Same shape as [`crate::tables::addresses`]: keyed by owning customer,
//! replaced whole rather than updated in place.

use sqlx::SqliteConnection;

use clementine_core::CustomerId;

use crate::db::StoreError;
use crate::models::CreditCard;

#[derive(sqlx::FromRow)]
struct CreditCardRow {
    holder_name: String,
    card_number: String,
    expiration: String,
    security_code: String,
}

impl From<CreditCardRow> for CreditCard {
    fn from(row: CreditCardRow) -> Self {
        Self {
            holder_name: row.holder_name,
            number: row.card_number,
            expiration: row.expiration,
            security_code: row.security_code,
        }
    }
}

/// Insert the credit card for a customer.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if the customer already has a credit
/// card row, or `StoreError::Database` for other failures.
pub async fn insert(
    conn: &mut SqliteConnection,
    card: &CreditCard,
    customer_id: CustomerId,
) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO creditcard (customer_id, holder_name, card_number, expiration, security_code)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(customer_id)
    .bind(&card.holder_name)
    .bind(&card.number)
    .bind(&card.expiration)
    .bind(&card.security_code)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return StoreError::Conflict("customer already has a credit card".to_owned());
        }
        StoreError::Database(e)
    })?;

    Ok(())
}

/// Fetch the credit card owned by a customer, if any.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub async fn fetch_for_customer(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
) -> Result<Option<CreditCard>, StoreError> {
    let row: Option<CreditCardRow> = sqlx::query_as(
        "SELECT holder_name, card_number, expiration, security_code
         FROM creditcard WHERE customer_id = ?1",
    )
    .bind(customer_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(CreditCard::from))
}

/// Delete the credit card owned by a customer, returning rows affected.
///
/// # Errors
///
/// Returns `StoreError::Database` if the delete fails.
pub async fn delete_for_customer(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
) -> Result<u64, StoreError> {
    let result = sqlx::query("DELETE FROM creditcard WHERE customer_id = ?1")
        .bind(customer_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}
