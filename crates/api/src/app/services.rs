use std::sync::Arc;

use anyhow::Context;

use victory_core::DomainError;
use victory_infra::SqliteSupplierRepository;
#[cfg(feature = "postgres")]
use victory_infra::PostgresSupplierRepository;
use victory_suppliers::{InMemorySupplierRepository, SupplierRepository, SupplierService};

use crate::app::errors;
use crate::config::{AppConfig, StorageBackend};

/// Type-erased repository shared by every request.
pub type SharedSupplierRepository = Arc<dyn SupplierRepository>;

/// Services available to handlers (through an `Extension`).
#[derive(Clone)]
pub struct AppServices {
    suppliers: SupplierService<SharedSupplierRepository>,
    expose_storage_errors: bool,
}

impl AppServices {
    pub fn new(repo: SharedSupplierRepository, expose_storage_errors: bool) -> Self {
        Self {
            suppliers: SupplierService::new(repo),
            expose_storage_errors,
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemorySupplierRepository::new()), false)
    }

    pub fn suppliers(&self) -> &SupplierService<SharedSupplierRepository> {
        &self.suppliers
    }

    /// Message shown on a re-rendered form after a rejected write.
    pub fn form_error_message(&self, err: &DomainError) -> String {
        errors::form_error_message(err, self.expose_storage_errors)
    }
}

/// Pick and connect the repository named by the configuration.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let repo: SharedSupplierRepository = match config.storage_backend()? {
        StorageBackend::InMemory => {
            tracing::warn!("DATABASE_URL not set; suppliers are kept in memory and lost on restart");
            Arc::new(InMemorySupplierRepository::new())
        }
        StorageBackend::Sqlite(url) => {
            tracing::info!("using SQLite supplier store");
            Arc::new(
                SqliteSupplierRepository::connect(&url)
                    .await
                    .context("failed to open SQLite supplier store")?,
            )
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres(url) => {
            tracing::info!("using Postgres supplier store");
            Arc::new(
                PostgresSupplierRepository::connect(&url)
                    .await
                    .context("failed to open Postgres supplier store")?,
            )
        }
        #[cfg(not(feature = "postgres"))]
        StorageBackend::Postgres(_) => {
            anyhow::bail!("DATABASE_URL points at Postgres but this build lacks the `postgres` feature")
        }
    };

    Ok(AppServices::new(repo, config.expose_storage_errors))
}
