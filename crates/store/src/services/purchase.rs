//! Purchase persistence service.

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use clementine_core::{CustomerId, ProductId, PurchaseId};

use crate::db::{StoreError, transaction};
use crate::models::{Purchase, PurchaseSummary};
use crate::tables::purchases;

/// Persistence service for purchases.
pub struct PurchaseService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PurchaseService<'a> {
    /// Create a new purchase service on the given pool.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new purchase, returning it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if the purchase already carries
    /// an ID or has a negative amount, and `StoreError::Database` on
    /// storage failures.
    pub async fn create(&self, mut purchase: Purchase) -> Result<Purchase, StoreError> {
        if purchase.id.is_some() {
            return Err(StoreError::InvalidInput(
                "purchase id must be unassigned on create".to_owned(),
            ));
        }
        validate_amount(purchase.amount)?;

        transaction(self.pool, move |conn| {
            Box::pin(async move {
                let id = purchases::insert(conn, &purchase).await?;
                tracing::debug!(purchase_id = id.as_i64(), "created purchase");
                purchase.id = Some(id);
                Ok(purchase)
            })
        })
        .await
    }

    /// Retrieve a purchase by ID; `Ok(None)` if no row matches.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on storage failures.
    pub async fn retrieve(&self, id: PurchaseId) -> Result<Option<Purchase>, StoreError> {
        transaction(self.pool, move |conn| {
            Box::pin(async move { purchases::fetch(conn, id).await })
        })
        .await
    }

    /// Update a purchase, returning the number of rows affected (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if the purchase has no ID or has
    /// a negative amount, and `StoreError::Database` on storage failures.
    pub async fn update(&self, purchase: Purchase) -> Result<u64, StoreError> {
        if purchase.id.is_none() {
            return Err(StoreError::InvalidInput(
                "purchase id must be assigned on update".to_owned(),
            ));
        }
        validate_amount(purchase.amount)?;

        transaction(self.pool, move |conn| {
            Box::pin(async move { purchases::update(conn, &purchase).await })
        })
        .await
    }

    /// Delete a purchase, returning the number of rows affected (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on storage failures.
    pub async fn delete(&self, id: PurchaseId) -> Result<u64, StoreError> {
        transaction(self.pool, move |conn| {
            Box::pin(async move { purchases::delete(conn, id).await })
        })
        .await
    }

    /// Retrieve all purchases made by a customer, in result-set order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on storage failures.
    pub async fn retrieve_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Purchase>, StoreError> {
        transaction(self.pool, move |conn| {
            Box::pin(async move { purchases::fetch_for_customer(conn, customer_id).await })
        })
        .await
    }

    /// Retrieve all purchases of a product, in result-set order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on storage failures.
    pub async fn retrieve_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Purchase>, StoreError> {
        transaction(self.pool, move |conn| {
            Box::pin(async move { purchases::fetch_for_product(conn, product_id).await })
        })
        .await
    }

    /// Compute the minimum, maximum, and mean purchase amount for a
    /// customer.
    ///
    /// Returns `Ok(None)` for a customer with no purchases; that is an
    /// absent summary, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` on storage failures.
    pub async fn retrieve_purchase_summary(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<PurchaseSummary>, StoreError> {
        let amounts = transaction(self.pool, move |conn| {
            Box::pin(async move { purchases::amounts_for_customer(conn, customer_id).await })
        })
        .await?;

        Ok(summarize(&amounts))
    }
}

fn validate_amount(amount: Decimal) -> Result<(), StoreError> {
    if amount.is_sign_negative() {
        return Err(StoreError::InvalidInput(
            "purchase amount must not be negative".to_owned(),
        ));
    }
    Ok(())
}

fn summarize(amounts: &[Decimal]) -> Option<PurchaseSummary> {
    let mut iter = amounts.iter().copied();
    let first = iter.next()?;

    let (mut min, mut max, mut sum) = (first, first, first);
    for amount in iter {
        min = min.min(amount);
        max = max.max(amount);
        sum += amount;
    }

    Some(PurchaseSummary {
        min,
        max,
        avg: sum / Decimal::from(amounts.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_no_amounts_is_absent() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn summary_covers_min_max_and_mean() {
        let amounts = [Decimal::from(10), Decimal::from(20), Decimal::from(30)];
        let summary = summarize(&amounts).expect("non-empty amounts have a summary");
        assert_eq!(summary.min, Decimal::from(10));
        assert_eq!(summary.max, Decimal::from(30));
        assert_eq!(summary.avg, Decimal::from(20));
    }

    #[test]
    fn single_amount_is_its_own_summary() {
        let summary = summarize(&[Decimal::new(1999, 2)]).expect("one amount has a summary");
        assert_eq!(summary.min, summary.max);
        assert_eq!(summary.avg, Decimal::new(1999, 2));
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(matches!(
            validate_amount(Decimal::from(-5)),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(validate_amount(Decimal::ZERO).is_ok());
    }
}
