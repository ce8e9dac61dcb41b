//! Purchase domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use clementine_core::{CustomerId, ProductId, PurchaseId};

/// A single purchase of a product by a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    /// Surrogate ID assigned by the store on create; `None` until then.
    pub id: Option<PurchaseId>,
    /// Date the purchase was made.
    pub purchase_date: NaiveDate,
    /// Purchase amount; non-negative.
    pub amount: Decimal,
    /// The buying customer.
    pub customer_id: CustomerId,
    /// The purchased product.
    pub product_id: ProductId,
}

/// Aggregate over one customer's purchase amounts.
///
/// Derived, never persisted. A customer with no purchases has no summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseSummary {
    /// Smallest purchase amount.
    pub min: Decimal,
    /// Largest purchase amount.
    pub max: Decimal,
    /// Arithmetic mean of all purchase amounts.
    pub avg: Decimal,
}
