//! Transaction scope: exactly one commit or rollback per unit of work.

use futures_util::future::BoxFuture;
use sqlx::{SqliteConnection, SqlitePool};

use super::StoreError;

/// Run `work` inside a single database transaction.
///
/// A connection is checked out of the pool and a transaction begun on it,
/// which suspends implicit autocommit for the duration. `work` receives the
/// live transactional connection. On `Ok` the transaction commits; on `Err`
/// it rolls back and the original error is returned unchanged. Either way
/// the connection goes back to the pool exactly once.
///
/// The underlying sqlx transaction guard also rolls back when dropped, so
/// an early return or panic inside `work` cannot leak an open transaction.
///
/// # Errors
///
/// Returns `work`'s error after rolling back, or `StoreError::Database` if
/// beginning, committing, or rolling back the transaction itself fails. A
/// rollback failure is surfaced in place of the error that triggered it.
pub async fn transaction<T, F>(pool: &SqlitePool, work: F) -> Result<T, StoreError>
where
    F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, StoreError>>,
{
    let mut tx = pool.begin().await?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "transaction rollback failed");
                return Err(StoreError::Database(rollback_err));
            }
            tracing::warn!(error = %err, "transaction rolled back");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn pool_with_scratch_table() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database should open");
        sqlx::query("CREATE TABLE scratch (value TEXT NOT NULL)")
            .execute(&pool)
            .await
            .expect("scratch table should create");
        pool
    }

    async fn scratch_count(pool: &SqlitePool) -> i64 {
        sqlx::query("SELECT COUNT(*) AS n FROM scratch")
            .fetch_one(pool)
            .await
            .expect("count should run")
            .get("n")
    }

    #[tokio::test]
    async fn commits_on_success() {
        let pool = pool_with_scratch_table().await;

        transaction(&pool, |conn| {
            Box::pin(async move {
                sqlx::query("INSERT INTO scratch (value) VALUES ('kept')")
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .await
        .expect("work should commit");

        assert_eq!(scratch_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn rolls_back_on_error_and_returns_it_unchanged() {
        let pool = pool_with_scratch_table().await;

        let result: Result<(), StoreError> = transaction(&pool, |conn| {
            Box::pin(async move {
                sqlx::query("INSERT INTO scratch (value) VALUES ('discarded')")
                    .execute(&mut *conn)
                    .await?;
                Err(StoreError::InvalidInput("boom".to_owned()))
            })
        })
        .await;

        assert!(matches!(result, Err(StoreError::InvalidInput(msg)) if msg == "boom"));
        assert_eq!(scratch_count(&pool).await, 0);
    }
}
