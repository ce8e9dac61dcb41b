//! Shared helpers for store integration tests.
//!
//! Every test gets its own in-memory `SQLite` database with the full
//! schema applied, so tests are hermetic and order-independent.

#![allow(dead_code)]

use std::sync::Once;

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use clementine_core::{CustomerId, Email, Gender, ProductId};
use clementine_store::db::MIGRATOR;
use clementine_store::models::{Address, CreditCard, Customer, Product, Purchase};

/// Open a fresh in-memory database and apply the schema.
///
/// The pool is capped at one connection so every operation sees the same
/// in-memory database.
pub async fn test_pool() -> SqlitePool {
    init_tracing();

    // Match production: foreign-key enforcement is left off by design so a
    // customer delete can orphan its dependents (see DESIGN.md). sqlx
    // enables the pragma by default, so turn it back off explicitly.
    let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("connect options should parse")
        .foreign_keys(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options)
        .await
        .expect("in-memory database should open");

    MIGRATOR
        .run(&pool)
        .await
        .expect("migrations should apply");

    pool
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Count the rows of a table directly, bypassing the service layer.
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count query should run")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture date should be valid")
}

pub fn address(zip: &str) -> Address {
    Address {
        line1: "18 Orchard Row".to_owned(),
        line2: None,
        city: "Pasadena".to_owned(),
        state: "CA".to_owned(),
        zip: zip.to_owned(),
    }
}

pub fn credit_card(number: &str) -> CreditCard {
    CreditCard {
        holder_name: "Avery Quinn".to_owned(),
        number: number.to_owned(),
        expiration: "11/28".to_owned(),
        security_code: "417".to_owned(),
    }
}

pub fn customer(email: &str, zip: &str, dob: NaiveDate) -> Customer {
    Customer {
        id: None,
        first_name: "Avery".to_owned(),
        last_name: "Quinn".to_owned(),
        gender: Gender::Female,
        date_of_birth: dob,
        email: Email::parse(email).expect("fixture email should parse"),
        address: Some(address(zip)),
        credit_card: Some(credit_card("4111111111111111")),
    }
}

pub fn product(upc: &str, category: i32) -> Product {
    Product {
        id: None,
        name: "Stovetop Kettle".to_owned(),
        description: "Two-litre enamel kettle".to_owned(),
        category,
        upc: upc.to_owned(),
    }
}

pub fn purchase(customer_id: CustomerId, product_id: ProductId, amount: Decimal) -> Purchase {
    Purchase {
        id: None,
        purchase_date: date(2024, 6, 3),
        amount,
        customer_id,
        product_id,
    }
}
