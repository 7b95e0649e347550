use chrono::{DateTime, Utc};

use victory_core::{DomainError, DomainResult, RecordId};

/// Supplier identifier (assigned by the repository on insert).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SupplierId(pub RecordId);

impl SupplierId {
    pub fn new(id: RecordId) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0.get()
    }
}

impl From<i64> for SupplierId {
    fn from(value: i64) -> Self {
        Self(RecordId::new(value))
    }
}

impl core::str::FromStr for SupplierId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<RecordId>().map(Self)
    }
}

impl core::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Raw field values as submitted by a client, before normalization.
///
/// Every field may be missing; see [`SupplierDraft`] for the rules applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierFields {
    pub company_name: Option<String>,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub country_of_origin: Option<String>,
    pub primary_contact: Option<String>,
    pub address: Option<String>,
}

/// Normalized, validated values for every mutable supplier field.
///
/// Values are kept exactly as submitted. Blank optional values become
/// `None`; a blank `company_name` is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierDraft {
    pub company_name: String,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub country_of_origin: Option<String>,
    pub primary_contact: Option<String>,
    pub address: Option<String>,
}

pub const COMPANY_NAME_REQUIRED: &str = "Company name is required.";

impl SupplierDraft {
    /// Draft with only a company name; all optional fields empty.
    pub fn named(company_name: impl Into<String>) -> DomainResult<Self> {
        Self::try_from(SupplierFields {
            company_name: Some(company_name.into()),
            ..SupplierFields::default()
        })
    }
}

impl TryFrom<SupplierFields> for SupplierDraft {
    type Error = DomainError;

    fn try_from(fields: SupplierFields) -> Result<Self, Self::Error> {
        let company_name = non_blank(fields.company_name)
            .ok_or_else(|| DomainError::validation(COMPANY_NAME_REQUIRED))?;

        Ok(Self {
            company_name,
            company_phone: non_blank(fields.company_phone),
            company_email: non_blank(fields.company_email),
            country_of_origin: non_blank(fields.country_of_origin),
            primary_contact: non_blank(fields.primary_contact),
            address: non_blank(fields.address),
        })
    }
}

/// Drop values that are empty or whitespace only; anything else is kept verbatim.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Values handed to a repository to insert a new supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupplier {
    pub draft: SupplierDraft,
    pub registered_at: DateTime<Utc>,
}

/// A persisted supplier record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    pub id: SupplierId,
    pub company_name: String,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub country_of_origin: Option<String>,
    pub primary_contact: Option<String>,
    pub address: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl Supplier {
    pub fn from_new(id: SupplierId, new: NewSupplier) -> Self {
        let NewSupplier { draft, registered_at } = new;
        Self {
            id,
            company_name: draft.company_name,
            company_phone: draft.company_phone,
            company_email: draft.company_email,
            country_of_origin: draft.country_of_origin,
            primary_contact: draft.primary_contact,
            address: draft.address,
            registered_at,
        }
    }

    /// Replace every mutable field with the draft's values.
    ///
    /// This is a full overwrite: a `None` in the draft clears the field.
    /// `id` and `registered_at` are never touched.
    pub fn overwrite(&mut self, draft: SupplierDraft) {
        self.company_name = draft.company_name;
        self.company_phone = draft.company_phone;
        self.company_email = draft.company_email;
        self.country_of_origin = draft.country_of_origin;
        self.primary_contact = draft.primary_contact;
        self.address = draft.address;
    }
}
