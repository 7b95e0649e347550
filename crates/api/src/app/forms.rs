use serde::Deserialize;

use victory_suppliers::SupplierFields;

/// Body of the add form (`POST /suppliers/add/`).
///
/// Every field is optional at this layer; missing keys become `None` and the
/// domain decides what is required.
#[derive(Debug, Default, Deserialize)]
pub struct SupplierForm {
    pub company_name: Option<String>,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub country_of_origin: Option<String>,
    pub primary_contact: Option<String>,
    pub address: Option<String>,
}

impl From<SupplierForm> for SupplierFields {
    fn from(form: SupplierForm) -> Self {
        Self {
            company_name: form.company_name,
            company_phone: form.company_phone,
            company_email: form.company_email,
            country_of_origin: form.country_of_origin,
            primary_contact: form.primary_contact,
            address: form.address,
        }
    }
}

/// Body of the edit form (`POST /suppliers/apply-update/`).
///
/// The record id travels in the body as `supplier_id`; it is taken as given,
/// there is no ownership check.
#[derive(Debug, Default, Deserialize)]
pub struct ApplyUpdateForm {
    pub supplier_id: Option<String>,
    pub company_name: Option<String>,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub country_of_origin: Option<String>,
    pub primary_contact: Option<String>,
    pub address: Option<String>,
}

impl ApplyUpdateForm {
    /// Split into the raw id and the field set.
    pub fn into_parts(self) -> (Option<String>, SupplierFields) {
        let fields = SupplierFields {
            company_name: self.company_name,
            company_phone: self.company_phone,
            company_email: self.company_email,
            country_of_origin: self.country_of_origin,
            primary_contact: self.primary_contact,
            address: self.address,
        };
        (self.supplier_id, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_update_form_splits_id_from_fields() {
        let form = ApplyUpdateForm {
            supplier_id: Some("3".to_string()),
            company_name: Some("Acme".to_string()),
            address: Some("Main St".to_string()),
            ..ApplyUpdateForm::default()
        };

        let (id, fields) = form.into_parts();
        assert_eq!(id.as_deref(), Some("3"));
        assert_eq!(fields.company_name.as_deref(), Some("Acme"));
        assert_eq!(fields.address.as_deref(), Some("Main St"));
        assert_eq!(fields.company_phone, None);
    }

    #[test]
    fn add_form_maps_field_for_field() {
        let form = SupplierForm {
            company_name: Some("Acme".to_string()),
            company_email: Some("a@x.com".to_string()),
            ..SupplierForm::default()
        };

        let fields = SupplierFields::from(form);
        assert_eq!(fields.company_email.as_deref(), Some("a@x.com"));
        assert_eq!(fields.country_of_origin, None);
    }
}
