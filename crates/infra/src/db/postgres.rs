//! Postgres-backed supplier repository (`postgres` feature).
//!
//! `company_name` is declared `COLLATE "C"` so uniqueness and ordering match
//! the byte-wise, case-sensitive rule used by the other repositories.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use victory_core::DomainResult;
use victory_suppliers::{NewSupplier, Supplier, SupplierId, SupplierRepository};

use super::{ensure_affected, map_sqlx_error, map_write_error};

/// Connect to Postgres and make sure the `suppliers` table exists.
pub async fn connect_postgres(url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .connect(url)
        .await
        .context("failed to connect to Postgres")?;

    PostgresSupplierRepository::ensure_schema(&pool).await?;
    Ok(pool)
}

/// Postgres-backed supplier store.
///
/// Uses the SQLx connection pool, which is `Send + Sync`; every operation is a
/// single statement.
#[derive(Debug, Clone)]
pub struct PostgresSupplierRepository {
    pool: Arc<PgPool>,
}

impl PostgresSupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        Ok(Self::new(connect_postgres(url).await?))
    }

    /// Idempotent schema bootstrap.
    pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS suppliers (
                id                BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
                company_name      TEXT COLLATE "C" NOT NULL UNIQUE,
                company_phone     TEXT NULL,
                company_email     TEXT NULL,
                country_of_origin TEXT NULL,
                primary_contact   TEXT NULL,
                address           TEXT NULL,
                registered_at     TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .context("failed to create suppliers table")?;
        Ok(())
    }
}

fn supplier_from_row(row: &PgRow) -> Result<Supplier, sqlx::Error> {
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
impl SupplierRepository for PostgresSupplierRepository {
    #[instrument(skip(self, new), fields(company_name = %new.draft.company_name))]
    async fn create(&self, new: NewSupplier) -> DomainResult<Supplier> {
        let id: i64 = sqlx::query(
            r#"
            INSERT INTO suppliers (
                company_name, company_phone, company_email,
                country_of_origin, primary_contact, address, registered_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&new.draft.company_name)
        .bind(&new.draft.company_phone)
        .bind(&new.draft.company_email)
        .bind(&new.draft.country_of_origin)
        .bind(&new.draft.primary_contact)
        .bind(&new.draft.address)
        .bind(new.registered_at)
        .fetch_one(&*self.pool)
        .await
        .and_then(|row| row.try_get("id"))
        .map_err(|e| map_write_error("insert_supplier", &new.draft.company_name, e))?;

        Ok(Supplier::from_new(SupplierId::from(id), new))
    }

    async fn get(&self, id: SupplierId) -> DomainResult<Supplier> {
        let row = sqlx::query(
            r#"
            SELECT id, company_name, company_phone, company_email,
                   country_of_origin, primary_contact, address, registered_at
            FROM suppliers
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_supplier", e))?;

        supplier_from_row(&row).map_err(|e| map_sqlx_error("decode_supplier", e))
    }

    #[instrument(skip(self, supplier), fields(supplier_id = %supplier.id))]
    async fn update(&self, supplier: &Supplier) -> DomainResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE suppliers
            SET company_name = $1,
                company_phone = $2,
                company_email = $3,
                country_of_origin = $4,
                primary_contact = $5,
                address = $6
            WHERE id = $7
            "#,
        )
        .bind(&supplier.company_name)
        .bind(&supplier.company_phone)
        .bind(&supplier.company_email)
        .bind(&supplier.country_of_origin)
        .bind(&supplier.primary_contact)
        .bind(&supplier.address)
        .bind(supplier.id.get())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_write_error("update_supplier", &supplier.company_name, e))?;

        ensure_affected(result.rows_affected())
    }

    async fn delete(&self, id: SupplierId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
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
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_suppliers", e))?;

        rows.iter()
            .map(supplier_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("decode_supplier", e))
    }

    async fn count(&self) -> DomainResult<u64> {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM suppliers")
            .fetch_one(&*self.pool)
            .await
            .and_then(|row| row.try_get("total"))
            .map_err(|e| map_sqlx_error("count_suppliers", e))?;

        Ok(total.max(0) as u64)
    }
}
