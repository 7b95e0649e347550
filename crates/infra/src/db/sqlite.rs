//! SQLite-backed supplier repository.
//!
//! The `company_name` column uses SQLite's default `BINARY` collation, so the
//! uniqueness check and `ORDER BY` are both case-sensitive and byte-wise.

use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::instrument;

use victory_core::DomainResult;
use victory_suppliers::{NewSupplier, Supplier, SupplierId, SupplierRepository};

use super::{ensure_affected, map_sqlx_error, map_write_error};

/// Connect to SQLite and make sure the `suppliers` table exists.
///
/// In-memory URLs (`sqlite::memory:`) get a single long-lived connection,
/// since every new connection would otherwise see its own empty database.
pub async fn connect_sqlite(url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("invalid SQLite url {url:?}"))?
        .create_if_missing(true);

    let pool_options = if is_in_memory(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open SQLite database at {url:?}"))?;

    SqliteSupplierRepository::ensure_schema(&pool).await?;
    Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// SQLite-backed supplier store.
#[derive(Debug, Clone)]
pub struct SqliteSupplierRepository {
    pool: SqlitePool,
}

impl SqliteSupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open `url` (see [`connect_sqlite`]) and wrap the pool.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        Ok(Self::new(connect_sqlite(url).await?))
    }

    /// Idempotent schema bootstrap.
    pub async fn ensure_schema(pool: &SqlitePool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS suppliers (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                company_name      TEXT NOT NULL UNIQUE,
                company_phone     TEXT NULL,
                company_email     TEXT NULL,
                country_of_origin TEXT NULL,
                primary_contact   TEXT NULL,
                address           TEXT NULL,
                registered_at     TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .context("failed to create suppliers table")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn supplier_from_row(row: &SqliteRow) -> Result<Supplier, sqlx::Error> {
    Ok(Supplier {
        id: SupplierId::from(row.try_get::<i64, _>("id")?),
        company_name: row.try_get("company_name")?,
        company_phone: row.try_get("company_phone")?,
        company_email: row.try_get("company_email")?,
        country_of_origin: row.try_get("country_of_origin")?,
        primary_contact: row.try_get("primary_contact")?,
        address: row.try_get("address")?,
        registered_at: row.try_get::<DateTime<Utc>, _>("registered_at")?,
    })
}

#[async_trait]
impl SupplierRepository for SqliteSupplierRepository {
    #[instrument(skip(self, new), fields(company_name = %new.draft.company_name))]
    async fn create(&self, new: NewSupplier) -> DomainResult<Supplier> {
        let result = sqlx::query(
            r#"
            INSERT INTO suppliers (
                company_name, company_phone, company_email,
                country_of_origin, primary_contact, address, registered_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&new.draft.company_name)
        .bind(&new.draft.company_phone)
        .bind(&new.draft.company_email)
        .bind(&new.draft.country_of_origin)
        .bind(&new.draft.primary_contact)
        .bind(&new.draft.address)
        .bind(new.registered_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("insert_supplier", &new.draft.company_name, e))?;

        let id = SupplierId::from(result.last_insert_rowid());
        Ok(Supplier::from_new(id, new))
    }

    async fn get(&self, id: SupplierId) -> DomainResult<Supplier> {
        let row = sqlx::query(
            r#"
            SELECT id, company_name, company_phone, company_email,
                   country_of_origin, primary_contact, address, registered_at
            FROM suppliers
            WHERE id = ?1
            "#,
        )
        .bind(id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_supplier", e))?;

        supplier_from_row(&row).map_err(|e| map_sqlx_error("decode_supplier", e))
    }

    #[instrument(skip(self, supplier), fields(supplier_id = %supplier.id))]
    async fn update(&self, supplier: &Supplier) -> DomainResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE suppliers
            SET company_name = ?1,
                company_phone = ?2,
                company_email = ?3,
                country_of_origin = ?4,
                primary_contact = ?5,
                address = ?6
            WHERE id = ?7
            "#,
        )
        .bind(&supplier.company_name)
        .bind(&supplier.company_phone)
        .bind(&supplier.company_email)
        .bind(&supplier.country_of_origin)
        .bind(&supplier.primary_contact)
        .bind(&supplier.address)
        .bind(supplier.id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("update_supplier", &supplier.company_name, e))?;

        ensure_affected(result.rows_affected())
    }

    async fn delete(&self, id: SupplierId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_supplier", e))?;

        ensure_affected(result.rows_affected())
    }

    async fn list(&self) -> DomainResult<Vec<Supplier>> {
        let rows = sqlx::query(
            r#"
            SELECT id, company_name, company_phone, company_email,
                   country_of_origin, primary_contact, address, registered_at
            FROM suppliers
            ORDER BY company_name ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_suppliers", e))?;

        rows.iter()
            .map(supplier_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("decode_supplier", e))
    }

    async fn count(&self) -> DomainResult<u64> {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM suppliers")
            .fetch_one(&self.pool)
            .await
            .and_then(|row| row.try_get("total"))
            .map_err(|e| map_sqlx_error("count_suppliers", e))?;

        Ok(total.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use victory_core::DomainError;
    use victory_suppliers::{SupplierDraft, SupplierFields};

    async fn repo() -> SqliteSupplierRepository {
        SqliteSupplierRepository::connect("sqlite::memory:").await.unwrap()
    }

    fn new_supplier(name: &str, email: Option<&str>) -> NewSupplier {
        let draft = SupplierDraft::try_from(SupplierFields {
            company_name: Some(name.to_string()),
            company_email: email.map(str::to_string),
            ..SupplierFields::default()
        })
        .unwrap();
        NewSupplier {
            draft,
            registered_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_every_column() {
        let repo = repo().await;
        let new = NewSupplier {
            draft: SupplierDraft::try_from(SupplierFields {
                company_name: Some("Acme".to_string()),
                company_phone: Some("555-0100".to_string()),
                company_email: Some("a@x.com".to_string()),
                country_of_origin: Some("Peru".to_string()),
                primary_contact: Some("Luis".to_string()),
                address: Some("Jr. Lampa 1".to_string()),
            })
            .unwrap(),
            registered_at: Utc::now(),
        };

        let created = repo.create(new).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn duplicate_company_name_is_a_conflict() {
        let repo = repo().await;
        let first = repo.create(new_supplier("Acme", Some("a@x.com"))).await.unwrap();

        let err = repo
            .create(new_supplier("Acme", Some("b@y.com")))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(
            repo.get(first.id).await.unwrap().company_email.as_deref(),
            Some("a@x.com")
        );
    }

    #[tokio::test]
    async fn uniqueness_and_order_are_case_sensitive() {
        let repo = repo().await;
        for name in ["acme", "Zeta", "Acme", "beta"] {
            repo.create(new_supplier(name, None)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.company_name)
            .collect();
        assert_eq!(names, ["Acme", "Zeta", "acme", "beta"]);
    }

    #[tokio::test]
    async fn padded_names_are_stored_verbatim_and_distinct() {
        let repo = repo().await;
        repo.create(new_supplier("Acme", None)).await.unwrap();
        let padded = repo
            .create(new_supplier("Acme ", Some(" b@y.com ")))
            .await
            .unwrap();

        let stored = repo.get(padded.id).await.unwrap();
        assert_eq!(stored.company_name, "Acme ");
        assert_eq!(stored.company_email.as_deref(), Some(" b@y.com "));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn update_overwrites_and_rejects_taken_names() {
        let repo = repo().await;
        repo.create(new_supplier("Acme", None)).await.unwrap();
        let mut globex = repo
            .create(new_supplier("Globex", Some("g@x.com")))
            .await
            .unwrap();

        globex.company_email = None;
        globex.address = Some("Cypress Creek".to_string());
        repo.update(&globex).await.unwrap();
        assert_eq!(repo.get(globex.id).await.unwrap(), globex);

        let mut clash = globex.clone();
        clash.company_name = "Acme".to_string();
        let err = repo.update(&clash).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.get(globex.id).await.unwrap().company_name, "Globex");
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let repo = repo().await;
        let ghost = Supplier::from_new(SupplierId::from(404), new_supplier("Ghost", None));

        assert_eq!(repo.get(ghost.id).await.unwrap_err(), DomainError::NotFound);
        assert_eq!(repo.update(&ghost).await.unwrap_err(), DomainError::NotFound);
        assert_eq!(repo.delete(ghost.id).await.unwrap_err(), DomainError::NotFound);
    }

    #[tokio::test]
    async fn delete_removes_one_row() {
        let repo = repo().await;
        let acme = repo.create(new_supplier("Acme", None)).await.unwrap();
        repo.create(new_supplier("Globex", None)).await.unwrap();

        repo.delete(acme.id).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.get(acme.id).await.unwrap_err(), DomainError::NotFound);
    }

    #[tokio::test]
    async fn schema_bootstrap_is_idempotent() {
        let repo = repo().await;
        repo.create(new_supplier("Acme", None)).await.unwrap();

        SqliteSupplierRepository::ensure_schema(repo.pool()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn closed_pool_surfaces_as_storage_error() {
        let repo = repo().await;
        repo.pool().close().await;

        let err = repo.list().await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }
}
