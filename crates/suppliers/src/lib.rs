//! Suppliers module: supplier records, their storage contract, and the
//! create/list/edit/delete use cases.

pub mod repository;
pub mod service;
pub mod supplier;

pub use repository::{InMemorySupplierRepository, SupplierRepository, duplicate_company_name};
pub use service::SupplierService;
pub use supplier::{
    COMPANY_NAME_REQUIRED, NewSupplier, Supplier, SupplierDraft, SupplierFields, SupplierId,
};
