//! SQL-backed supplier repositories (sqlx).
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `DomainError` as follows:
//!
//! | SQLx Error | DomainError | Scenario |
//! |------------|-------------|----------|
//! | Database (unique violation) | `Conflict` | `company_name` already taken |
//! | RowNotFound | `NotFound` | lookup by id matched nothing |
//! | PoolClosed | `Storage` | pool was shut down |
//! | Other | `Storage` | network errors, locked database, bad schema, etc. |
//!
//! Writes that match zero rows (update/delete of a missing id) are also
//! reported as `NotFound`.

use victory_core::DomainError;
use victory_suppliers::duplicate_company_name;

#[cfg(feature = "postgres")]
pub mod postgres;
pub mod sqlite;

#[cfg(feature = "postgres")]
pub use postgres::{PostgresSupplierRepository, connect_postgres};
pub use sqlite::{SqliteSupplierRepository, connect_sqlite};

/// Map SQLx errors to `DomainError`.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::RowNotFound => DomainError::NotFound,
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DomainError::conflict(
            format!("unique constraint violated in {operation}: {}", db_err.message()),
        ),
        sqlx::Error::PoolClosed => {
            DomainError::storage(format!("connection pool closed in {operation}"))
        }
        other => DomainError::storage(format!("sqlx error in {operation}: {other}")),
    }
}

/// Like [`map_sqlx_error`], but names the offending company on a unique
/// violation so every repository reports duplicates the same way.
pub(crate) fn map_write_error(operation: &str, company_name: &str, err: sqlx::Error) -> DomainError {
    if is_unique_violation(&err) {
        return duplicate_company_name(company_name);
    }
    map_sqlx_error(operation, err)
}

/// Check if an error is a unique constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Zero affected rows on a keyed write means the id does not exist.
pub(crate) fn ensure_affected(rows_affected: u64) -> Result<(), DomainError> {
    if rows_affected == 0 {
        Err(DomainError::NotFound)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert_eq!(map_sqlx_error("get_supplier", sqlx::Error::RowNotFound), DomainError::NotFound);
    }

    #[test]
    fn pool_closed_maps_to_storage() {
        let err = map_write_error("insert_supplier", "Acme", sqlx::Error::PoolClosed);
        assert_eq!(
            err,
            DomainError::storage("connection pool closed in insert_supplier")
        );
    }

    #[test]
    fn zero_rows_is_not_found() {
        assert_eq!(ensure_affected(0), Err(DomainError::NotFound));
        assert_eq!(ensure_affected(1), Ok(()));
    }
}
