//! Address table access.
//!
//! Addresses are keyed by their owning customer; there is no update
//! statement because replacement is delete-then-insert, driven by the
//! customer service.

use sqlx::SqliteConnection;

use clementine_core::CustomerId;

use crate::db::StoreError;
use crate::models::Address;

#[derive(sqlx::FromRow)]
struct AddressRow {
    line1: String,
    line2: Option<String>,
    city: String,
    state: String,
    zip: String,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            line1: row.line1,
            line2: row.line2,
            city: row.city,
            state: row.state,
            zip: row.zip,
        }
    }
}

/// Insert the address for a customer.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if the customer already has an address
/// row, or `StoreError::Database` for other failures.
pub async fn insert(
    conn: &mut SqliteConnection,
    address: &Address,
    customer_id: CustomerId,
) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO address (customer_id, line1, line2, city, state, zip)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(customer_id)
    .bind(&address.line1)
    .bind(address.line2.as_deref())
    .bind(&address.city)
    .bind(&address.state)
    .bind(&address.zip)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return StoreError::Conflict("customer already has an address".to_owned());
        }
        StoreError::Database(e)
    })?;

    Ok(())
}

/// Fetch the address owned by a customer, if any.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails.
pub async fn fetch_for_customer(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
) -> Result<Option<Address>, StoreError> {
    let row: Option<AddressRow> = sqlx::query_as(
        "SELECT line1, line2, city, state, zip FROM address WHERE customer_id = ?1",
    )
    .bind(customer_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(Address::from))
}

/// Delete the address owned by a customer, returning rows affected.
///
/// # Errors
///
/// Returns `StoreError::Database` if the delete fails.
pub async fn delete_for_customer(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
) -> Result<u64, StoreError> {
    let result = sqlx::query("DELETE FROM address WHERE customer_id = ?1")
        .bind(customer_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}
