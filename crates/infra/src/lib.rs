//! Infrastructure layer: SQL storage for the domain repositories.

pub mod db;

pub use db::{SqliteSupplierRepository, connect_sqlite};
#[cfg(feature = "postgres")]
pub use db::{PostgresSupplierRepository, connect_postgres};
