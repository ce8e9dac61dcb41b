//! Customer table access.

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use clementine_core::{CustomerId, Email, Gender};

use crate::db::StoreError;
use crate::models::Customer;

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: CustomerId,
    first_name: String,
    last_name: String,
    gender: String,
    dob: NaiveDate,
    email: String,
}

impl CustomerRow {
    fn into_customer(self) -> Result<Customer, StoreError> {
        let code = self
            .gender
            .chars()
            .next()
            .ok_or_else(|| StoreError::DataCorruption("empty gender code in database".to_owned()))?;
        let gender = Gender::from_code(code).map_err(|e| {
            StoreError::DataCorruption(format!("invalid gender in database: {e}"))
        })?;
        let email = Email::parse(&self.email)
            .map_err(|e| StoreError::DataCorruption(format!("invalid email in database: {e}")))?;

        Ok(Customer {
            id: Some(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            gender,
            date_of_birth: self.dob,
            email,
            address: None,
            credit_card: None,
        })
    }
}

/// Insert a new customer row and return its assigned ID.
///
/// The customer's `address` and `credit_card` are not written here; they
/// belong to their own tables.
///
/// # Errors
///
/// Returns `StoreError::InvalidInput` if the customer already carries an
/// ID, or `StoreError::Database` if the insert fails.
pub async fn insert(
    conn: &mut SqliteConnection,
    customer: &Customer,
) -> Result<CustomerId, StoreError> {
    if customer.id.is_some() {
        return Err(StoreError::InvalidInput(
            "customer id must be unassigned on insert".to_owned(),
        ));
    }

    let result = sqlx::query(
        "INSERT INTO customer (first_name, last_name, gender, dob, email)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&customer.first_name)
    .bind(&customer.last_name)
    .bind(customer.gender.code().to_string())
    .bind(customer.date_of_birth)
    .bind(customer.email.as_str())
    .execute(&mut *conn)
    .await?;

    Ok(CustomerId::new(result.last_insert_rowid()))
}

/// Fetch a customer row by ID, without its address or credit card.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails, or
/// `StoreError::DataCorruption` if the stored row no longer decodes.
pub async fn fetch(
    conn: &mut SqliteConnection,
    id: CustomerId,
) -> Result<Option<Customer>, StoreError> {
    let row: Option<CustomerRow> = sqlx::query_as(
        "SELECT id, first_name, last_name, gender, dob, email FROM customer WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(CustomerRow::into_customer).transpose()
}

/// Update a customer row, returning the number of rows affected (0 or 1).
///
/// # Errors
///
/// Returns `StoreError::InvalidInput` if the customer has no ID, or
/// `StoreError::Database` if the update fails.
pub async fn update(conn: &mut SqliteConnection, customer: &Customer) -> Result<u64, StoreError> {
    let Some(id) = customer.id else {
        return Err(StoreError::InvalidInput(
            "customer id must be assigned on update".to_owned(),
        ));
    };

    let result = sqlx::query(
        "UPDATE customer SET first_name = ?1, last_name = ?2, gender = ?3, dob = ?4, email = ?5
         WHERE id = ?6",
    )
    .bind(&customer.first_name)
    .bind(&customer.last_name)
    .bind(customer.gender.code().to_string())
    .bind(customer.date_of_birth)
    .bind(customer.email.as_str())
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Delete a customer row, returning the number of rows affected (0 or 1).
///
/// # Errors
///
/// Returns `StoreError::Database` if the delete fails.
pub async fn delete(conn: &mut SqliteConnection, id: CustomerId) -> Result<u64, StoreError> {
    let result = sqlx::query("DELETE FROM customer WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

/// Fetch all customers whose address has the given zip code, in ID order.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails, or
/// `StoreError::DataCorruption` if a stored row no longer decodes.
pub async fn fetch_by_zip(
    conn: &mut SqliteConnection,
    zip: &str,
) -> Result<Vec<Customer>, StoreError> {
    let rows: Vec<CustomerRow> = sqlx::query_as(
        "SELECT c.id, c.first_name, c.last_name, c.gender, c.dob, c.email
         FROM customer c
         INNER JOIN address a ON c.id = a.customer_id
         WHERE a.zip = ?1
         ORDER BY c.id",
    )
    .bind(zip)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter().map(CustomerRow::into_customer).collect()
}

/// Fetch all customers born within `start..=end`, in ID order.
///
/// # Errors
///
/// Returns `StoreError::Database` if the query fails, or
/// `StoreError::DataCorruption` if a stored row no longer decodes.
pub async fn fetch_by_dob_range(
    conn: &mut SqliteConnection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Customer>, StoreError> {
    let rows: Vec<CustomerRow> = sqlx::query_as(
        "SELECT id, first_name, last_name, gender, dob, email
         FROM customer
         WHERE dob BETWEEN ?1 AND ?2
         ORDER BY id",
    )
    .bind(start)
    .bind(end)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter().map(CustomerRow::into_customer).collect()
}
