//! Clementine Store - transactional persistence layer.
//!
//! This crate persists the Clementine commerce domain (customers with their
//! address and credit card, products, purchases) to SQLite, composing
//! single-table access primitives into atomic multi-row operations.
//!
//! # Layers
//!
//! - [`config`] - Environment-driven configuration
//! - [`db`] - Connection pool, error type, migrations, and the transaction
//!   scope that guarantees exactly one commit or rollback per unit of work
//! - [`models`] - Domain types, separate from database row types
//! - [`tables`] - Single-table access primitives operating on a
//!   caller-supplied transactional connection
//! - [`services`] - Persistence services wrapping one or more table calls
//!   in a single transaction per public operation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod tables;
