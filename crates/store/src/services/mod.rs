//! Persistence services.
//!
//! Each service composes single-table access calls into atomic operations:
//! every public method runs inside exactly one
//! [`transaction`](crate::db::transaction) invocation, so multi-row writes
//! either fully apply or leave no trace, and composite reads see one
//! consistent snapshot.
//!
//! Contract violations (pre-set ID on create, missing ID on update,
//! inverted date range, negative category, missing required sub-object)
//! surface as [`StoreError::InvalidInput`](crate::db::StoreError) and are
//! raised before a connection is acquired wherever the input alone decides
//! them. "Not found" is never an error; it is an absent result.

pub mod customer;
pub mod product;
pub mod purchase;

pub use customer::CustomerService;
pub use product::ProductService;
pub use purchase::PurchaseService;
