use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use victory_core::{DomainError, DomainResult};

use crate::supplier::{NewSupplier, Supplier, SupplierId};

/// Storage abstraction for supplier records.
///
/// Implementations enforce `company_name` uniqueness at write time and report
/// a violation as [`DomainError::Conflict`]. Comparison is case-sensitive and
/// byte-wise, and `list` orders by `company_name` with the same rule.
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    /// Insert a new supplier, assigning a fresh identifier.
    async fn create(&self, new: NewSupplier) -> DomainResult<Supplier>;

    async fn get(&self, id: SupplierId) -> DomainResult<Supplier>;

    /// Persist every mutable field of an existing supplier.
    async fn update(&self, supplier: &Supplier) -> DomainResult<()>;

    async fn delete(&self, id: SupplierId) -> DomainResult<()>;

    /// All suppliers, ordered by `company_name` ascending.
    async fn list(&self) -> DomainResult<Vec<Supplier>>;

    async fn count(&self) -> DomainResult<u64>;
}

#[async_trait]
impl<S> SupplierRepository for Arc<S>
where
    S: SupplierRepository + ?Sized,
{
    async fn create(&self, new: NewSupplier) -> DomainResult<Supplier> {
        (**self).create(new).await
    }

    async fn get(&self, id: SupplierId) -> DomainResult<Supplier> {
        (**self).get(id).await
    }

    async fn update(&self, supplier: &Supplier) -> DomainResult<()> {
        (**self).update(supplier).await
    }

    async fn delete(&self, id: SupplierId) -> DomainResult<()> {
        (**self).delete(id).await
    }

    async fn list(&self) -> DomainResult<Vec<Supplier>> {
        (**self).list().await
    }

    async fn count(&self) -> DomainResult<u64> {
        (**self).count().await
    }
}

/// Conflict error reported when `company_name` is already taken.
pub fn duplicate_company_name(company_name: &str) -> DomainError {
    DomainError::conflict(format!("company_name '{company_name}' already exists"))
}

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<SupplierId, Supplier>,
}

impl Table {
    fn name_taken(&self, company_name: &str, except: Option<SupplierId>) -> bool {
        self.rows
            .values()
            .any(|s| s.company_name == company_name && Some(s.id) != except)
    }
}

/// In-memory supplier store for tests/dev.
///
/// The uniqueness check and the write happen under one write lock, so two
/// concurrent creates with the same name cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemorySupplierRepository {
    inner: RwLock<Table>,
}

impl InMemorySupplierRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> DomainError {
    DomainError::storage("in-memory supplier table lock poisoned")
}

#[async_trait]
impl SupplierRepository for InMemorySupplierRepository {
    async fn create(&self, new: NewSupplier) -> DomainResult<Supplier> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        if table.name_taken(&new.draft.company_name, None) {
            return Err(duplicate_company_name(&new.draft.company_name));
        }

        table.last_id += 1;
        let id = SupplierId::from(table.last_id);
        let supplier = Supplier::from_new(id, new);
        table.rows.insert(id, supplier.clone());
        Ok(supplier)
    }

    async fn get(&self, id: SupplierId) -> DomainResult<Supplier> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        table.rows.get(&id).cloned().ok_or(DomainError::NotFound)
    }

    async fn update(&self, supplier: &Supplier) -> DomainResult<()> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        if !table.rows.contains_key(&supplier.id) {
            return Err(DomainError::NotFound);
        }
        if table.name_taken(&supplier.company_name, Some(supplier.id)) {
            return Err(duplicate_company_name(&supplier.company_name));
        }

        // registered_at is owned by the store, not the caller.
        if let Some(row) = table.rows.get_mut(&supplier.id) {
            let registered_at = row.registered_at;
            *row = supplier.clone();
            row.registered_at = registered_at;
        }
        Ok(())
    }

    async fn delete(&self, id: SupplierId) -> DomainResult<()> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        table.rows.remove(&id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    async fn list(&self) -> DomainResult<Vec<Supplier>> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        let mut all: Vec<Supplier> = table.rows.values().cloned().collect();
        all.sort_by(|a, b| a.company_name.cmp(&b.company_name).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn count(&self) -> DomainResult<u64> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table.rows.len() as u64)
    }
}
