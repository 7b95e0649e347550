//! Supplier use cases on top of a [`SupplierRepository`].

use chrono::Utc;
use tracing::instrument;

use victory_core::{DomainError, DomainResult};

use crate::repository::SupplierRepository;
use crate::supplier::{NewSupplier, Supplier, SupplierDraft, SupplierFields, SupplierId};

/// Supplier records service.
///
/// Holds no state of its own; every call is a single read or a single write
/// against the repository. Uniqueness is left to the repository.
#[derive(Debug, Clone)]
pub struct SupplierService<R> {
    repo: R,
}

impl<R: SupplierRepository> SupplierService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// All suppliers ordered by company name.
    pub async fn list(&self) -> DomainResult<Vec<Supplier>> {
        self.repo.list().await.inspect_err(|e| {
            tracing::error!(error = %e, "failed to list suppliers");
        })
    }

    pub async fn get(&self, id: SupplierId) -> DomainResult<Supplier> {
        self.repo.get(id).await
    }

    /// Validate submitted fields and insert a new supplier stamped with the
    /// current time.
    #[instrument(skip(self, submitted), fields(company_name = submitted.company_name.as_deref()))]
    pub async fn create(&self, submitted: SupplierFields) -> DomainResult<Supplier> {
        let draft = SupplierDraft::try_from(submitted)?;
        let result = self
            .repo
            .create(NewSupplier {
                draft,
                registered_at: Utc::now(),
            })
            .await;
        log_write("create", &result);
        result
    }

    /// Overwrite all mutable fields of an already loaded supplier.
    ///
    /// `current` is left untouched so callers can still show the stored state
    /// when the write is rejected.
    #[instrument(skip(self, current, submitted), fields(supplier_id = %current.id))]
    pub async fn apply(&self, current: &Supplier, submitted: SupplierFields) -> DomainResult<Supplier> {
        let draft = SupplierDraft::try_from(submitted)?;
        let mut updated = current.clone();
        updated.overwrite(draft);

        let result = self.repo.update(&updated).await.map(|()| updated);
        log_write("update", &result);
        result
    }

    /// Look up a supplier and overwrite it with the submitted fields.
    pub async fn update(&self, id: SupplierId, submitted: SupplierFields) -> DomainResult<Supplier> {
        let current = self.repo.get(id).await?;
        self.apply(&current, submitted).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: SupplierId) -> DomainResult<()> {
        let result = self.repo.delete(id).await;
        match &result {
            Ok(()) => tracing::info!(supplier_id = %id, "supplier deleted"),
            Err(DomainError::NotFound) => {}
            Err(e) => tracing::error!(supplier_id = %id, error = %e, "supplier delete failed"),
        }
        result
    }
}

fn log_write(op: &'static str, result: &DomainResult<Supplier>) {
    match result {
        Ok(s) => tracing::info!(op, supplier_id = %s.id, company_name = %s.company_name, "supplier saved"),
        Err(DomainError::Conflict(msg)) => tracing::warn!(op, "supplier rejected: {msg}"),
        Err(DomainError::Validation(msg)) => tracing::debug!(op, "supplier rejected: {msg}"),
        Err(DomainError::NotFound) => {}
        Err(e) => tracing::error!(op, error = %e, "supplier write failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemorySupplierRepository;

    fn service() -> SupplierService<InMemorySupplierRepository> {
        SupplierService::new(InMemorySupplierRepository::new())
    }

    fn fields(name: &str, email: Option<&str>) -> SupplierFields {
        SupplierFields {
            company_name: Some(name.to_string()),
            company_email: email.map(str::to_string),
            ..SupplierFields::default()
        }
    }

    #[tokio::test]
    async fn create_persists_submitted_fields_with_timestamp() {
        let svc = service();
        let before = Utc::now();
        let submitted = SupplierFields {
            company_name: Some("Acme".to_string()),
            company_phone: Some("555-0100".to_string()),
            company_email: Some("a@x.com".to_string()),
            country_of_origin: Some("Chile".to_string()),
            primary_contact: Some("Rosa".to_string()),
            address: Some("Av. Siempre Viva 742".to_string()),
        };

        let created = svc.create(submitted).await.unwrap();
        let stored = svc.get(created.id).await.unwrap();

        assert_eq!(stored, created);
        assert_eq!(stored.company_phone.as_deref(), Some("555-0100"));
        assert_eq!(stored.country_of_origin.as_deref(), Some("Chile"));
        assert_eq!(stored.primary_contact.as_deref(), Some("Rosa"));
        assert_eq!(stored.address.as_deref(), Some("Av. Siempre Viva 742"));
        assert!(stored.registered_at >= before && stored.registered_at <= Utc::now());
    }

    #[tokio::test]
    async fn duplicate_company_name_keeps_first_record() {
        let svc = service();
        let first = svc.create(fields("Acme", Some("a@x.com"))).await.unwrap();

        let err = svc.create(fields("Acme", Some("b@y.com"))).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        assert_eq!(svc.repository().count().await.unwrap(), 1);
        let stored = svc.get(first.id).await.unwrap();
        assert_eq!(stored.company_email.as_deref(), Some("a@x.com"));
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_stored_and_makes_names_distinct() {
        let svc = service();
        svc.create(fields("Acme", Some("a@x.com"))).await.unwrap();

        let padded = svc
            .create(fields(" Acme", Some(" b@y.com ")))
            .await
            .unwrap();

        assert_eq!(svc.repository().count().await.unwrap(), 2);
        let stored = svc.get(padded.id).await.unwrap();
        assert_eq!(stored.company_name, " Acme");
        assert_eq!(stored.company_email.as_deref(), Some(" b@y.com "));
    }

    #[tokio::test]
    async fn create_without_company_name_is_a_validation_error() {
        let svc = service();
        let err = svc.create(SupplierFields::default()).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(svc.repository().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_is_a_full_overwrite() {
        let svc = service();
        let created = svc
            .create(SupplierFields {
                company_name: Some("Acme".to_string()),
                company_phone: Some("555-0100".to_string()),
                company_email: Some("a@x.com".to_string()),
                ..SupplierFields::default()
            })
            .await
            .unwrap();

        let updated = svc
            .update(created.id, fields("Acme Corp", Some("sales@acme.test")))
            .await
            .unwrap();

        assert_eq!(updated.company_name, "Acme Corp");
        assert_eq!(updated.company_phone, None);
        assert_eq!(updated.registered_at, created.registered_at);
        assert_eq!(svc.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_mutates_nothing() {
        let svc = service();
        let created = svc.create(fields("Acme", None)).await.unwrap();

        let err = svc
            .update(SupplierId::from(created.id.get() + 100), fields("Other", None))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::NotFound);
        assert_eq!(svc.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn rejected_update_leaves_stored_state() {
        let svc = service();
        svc.create(fields("Acme", None)).await.unwrap();
        let globex = svc.create(fields("Globex", Some("g@x.com"))).await.unwrap();

        let err = svc.apply(&globex, fields("Acme", None)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(svc.get(globex.id).await.unwrap(), globex);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_record() {
        let svc = service();
        let acme = svc.create(fields("Acme", None)).await.unwrap();
        svc.create(fields("Globex", None)).await.unwrap();

        svc.delete(acme.id).await.unwrap();

        assert_eq!(svc.repository().count().await.unwrap(), 1);
        assert_eq!(svc.get(acme.id).await.unwrap_err(), DomainError::NotFound);
        assert_eq!(svc.delete(acme.id).await.unwrap_err(), DomainError::NotFound);
    }

    #[tokio::test]
    async fn list_orders_by_company_name() {
        let svc = service();
        for name in ["Umbrella", "Acme", "Globex", "Initech"] {
            svc.create(fields(name, None)).await.unwrap();
        }

        let names: Vec<String> = svc
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.company_name)
            .collect();
        assert_eq!(names, ["Acme", "Globex", "Initech", "Umbrella"]);
    }
}
