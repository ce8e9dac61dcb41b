//! Customer persistence service.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};

use clementine_core::CustomerId;

use crate::db::{StoreError, transaction};
use crate::models::Customer;
use crate::tables::{addresses, credit_cards, customers};

/// Persistence service for customers and their owned address and credit
/// card.
///
/// A persisted customer has exactly one address and one credit card;
/// updates replace both rows whole rather than merging fields.
pub struct CustomerService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerService<'a> {
    /// Create a new customer service on the given pool.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new customer with its address and credit card.
    ///
    /// All three inserts share one transaction: if the address or credit
    /// card is missing or fails to insert, the customer row is rolled back
    /// with them.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if the customer already carries
    /// an ID or lacks an address or credit card, and `StoreError::Database`
    /// on storage failures.
    pub async fn create(&self, mut customer: Customer) -> Result<Customer, StoreError> {
        if customer.id.is_some() {
            return Err(StoreError::InvalidInput(
                "customer id must be unassigned on create".to_owned(),
            ));
        }

        transaction(self.pool, move |conn| {
            Box::pin(async move {
                let id = customers::insert(conn, &customer).await?;

                let Some(address) = customer.address.as_ref() else {
                    return Err(StoreError::InvalidInput(
                        "customer must include an address".to_owned(),
                    ));
                };
                addresses::insert(conn, address, id).await?;

                let Some(card) = customer.credit_card.as_ref() else {
                    return Err(StoreError::InvalidInput(
                        "customer must include a credit card".to_owned(),
                    ));
                };
                credit_cards::insert(conn, card, id).await?;

                tracing::debug!(customer_id = id.as_i64(), "created customer");
                customer.id = Some(id);
                Ok(customer)
            })
        })
        .await
    }

    /// Retrieve a customer with its address and credit card attached.
    ///
    /// Returns `Ok(None)` if no customer row matches. A missing address or
    /// credit card is represented as `None` on the returned customer, not
    /// as an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on storage failures.
    pub async fn retrieve(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        transaction(self.pool, move |conn| {
            Box::pin(async move {
                let Some(mut customer) = customers::fetch(conn, id).await? else {
                    return Ok(None);
                };
                customer.address = addresses::fetch_for_customer(conn, id).await?;
                customer.credit_card = credit_cards::fetch_for_customer(conn, id).await?;
                Ok(Some(customer))
            })
        })
        .await
    }

    /// Update a customer, replacing its address and credit card rows.
    ///
    /// The dependent rows are deleted and re-inserted from the supplied
    /// payloads; fields are never merged with what was stored.
    ///
    /// Returns the number of customer rows affected (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if the customer has no ID or
    /// lacks an address or credit card, and `StoreError::Database` on
    /// storage failures.
    pub async fn update(&self, customer: Customer) -> Result<u64, StoreError> {
        let Some(id) = customer.id else {
            return Err(StoreError::InvalidInput(
                "customer id must be assigned on update".to_owned(),
            ));
        };
        let Some(address) = customer.address.clone() else {
            return Err(StoreError::InvalidInput(
                "customer must include an address".to_owned(),
            ));
        };
        let Some(card) = customer.credit_card.clone() else {
            return Err(StoreError::InvalidInput(
                "customer must include a credit card".to_owned(),
            ));
        };

        transaction(self.pool, move |conn| {
            Box::pin(async move {
                let rows = customers::update(conn, &customer).await?;

                addresses::delete_for_customer(conn, id).await?;
                credit_cards::delete_for_customer(conn, id).await?;
                addresses::insert(conn, &address, id).await?;
                credit_cards::insert(conn, &card, id).await?;

                tracing::debug!(customer_id = id.as_i64(), rows, "updated customer");
                Ok(rows)
            })
        })
        .await
    }

    /// Delete the customer row only, returning rows affected (0 or 1).
    ///
    /// Address, credit card, and purchase rows referencing the customer
    /// are intentionally left in place; callers that need a full purge
    /// must remove the dependents first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on storage failures.
    pub async fn delete(&self, id: CustomerId) -> Result<u64, StoreError> {
        let rows = transaction(self.pool, move |conn| {
            Box::pin(async move { customers::delete(conn, id).await })
        })
        .await?;

        tracing::debug!(customer_id = id.as_i64(), rows, "deleted customer");
        Ok(rows)
    }

    /// Retrieve all customers whose address has the given zip code, with
    /// dependents attached, in result-set order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if `zip` is empty, and
    /// `StoreError::Database` on storage failures.
    pub async fn retrieve_by_zip_code(&self, zip: &str) -> Result<Vec<Customer>, StoreError> {
        if zip.is_empty() {
            return Err(StoreError::InvalidInput(
                "zip code must not be empty".to_owned(),
            ));
        }
        let zip = zip.to_owned();

        transaction(self.pool, move |conn| {
            Box::pin(async move {
                let mut matches = customers::fetch_by_zip(conn, &zip).await?;
                attach_dependents(conn, &mut matches).await?;
                Ok(matches)
            })
        })
        .await
    }

    /// Retrieve all customers born within `start..=end`, with dependents
    /// attached, in result-set order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if `start` is after `end`
    /// (checked before storage is touched), and `StoreError::Database` on
    /// storage failures.
    pub async fn retrieve_by_date_of_birth(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Customer>, StoreError> {
        if start > end {
            return Err(StoreError::InvalidInput(
                "start date must not be after end date".to_owned(),
            ));
        }

        transaction(self.pool, move |conn| {
            Box::pin(async move {
                let mut matches = customers::fetch_by_dob_range(conn, start, end).await?;
                attach_dependents(conn, &mut matches).await?;
                Ok(matches)
            })
        })
        .await
    }
}

/// Attach each customer's address and credit card within the caller's
/// transaction.
async fn attach_dependents(
    conn: &mut SqliteConnection,
    matches: &mut [Customer],
) -> Result<(), StoreError> {
    for customer in matches {
        let id = customer
            .id
            .ok_or_else(|| StoreError::DataCorruption("customer row without id".to_owned()))?;
        customer.address = addresses::fetch_for_customer(conn, id).await?;
        customer.credit_card = credit_cards::fetch_for_customer(conn, id).await?;
    }
    Ok(())
}
