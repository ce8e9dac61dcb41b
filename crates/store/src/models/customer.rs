//! Customer domain types.

use chrono::NaiveDate;

use clementine_core::{CustomerId, Email, Gender};

/// A customer together with its owned address and credit card.
///
/// Address and credit card are compositions: they cannot exist without an
/// owning customer, and a persisted customer has exactly one of each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Surrogate ID assigned by the store on create; `None` until then.
    pub id: Option<CustomerId>,
    /// Customer's first name.
    pub first_name: String,
    /// Customer's last name.
    pub last_name: String,
    /// Gender code.
    pub gender: Gender,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Contact email address.
    pub email: Email,
    /// The customer's single address. Required on create and update;
    /// may be absent on a retrieved customer whose row was orphaned.
    pub address: Option<Address>,
    /// The customer's single credit card. Same presence rules as
    /// `address`.
    pub credit_card: Option<CreditCard>,
}

/// A customer's postal address.
///
/// Keyed by the owning customer; replaced whole (never merged) when the
/// customer is updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Free-form address line 1.
    pub line1: String,
    /// Free-form address line 2, if any.
    pub line2: Option<String>,
    /// City name.
    pub city: String,
    /// State or region code.
    pub state: String,
    /// Postal zip code.
    pub zip: String,
}

/// A customer's credit card.
///
/// Same keying and replacement rules as [`Address`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCard {
    /// Name of the card holder as embossed.
    pub holder_name: String,
    /// Card number.
    pub number: String,
    /// Expiration, e.g. `11/28`.
    pub expiration: String,
    /// Card security code.
    pub security_code: String,
}
