//! Server-rendered pages.
//!
//! One function per page; each takes exactly the data the page shows and
//! returns `Markup` wrapped in the shared layout. Splices are HTML-escaped by
//! `maud`.

use maud::{DOCTYPE, Markup, html};

use victory_suppliers::Supplier;

use crate::app::routes::suppliers::{ADD_PATH, APPLY_UPDATE_PATH, LIST_PATH, delete_path, edit_path};

const SITE_NAME: &str = "Victory Sports";

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (SITE_NAME) }
            }
            body {
                nav {
                    a href="/" { "Home" }
                    " | "
                    a href=(LIST_PATH) { "Suppliers" }
                    " | "
                    a href=(ADD_PATH) { "Add supplier" }
                }
                main {
                    h1 { (title) }
                    (body)
                }
            }
        }
    }
}

fn error_banner(error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = error {
            p class="error" role="alert" { (message) }
        }
    }
}

fn text_input(name: &str, label: &str, value: Option<&str>, required: bool) -> Markup {
    html! {
        p {
            label for=(name) { (label) }
            br;
            @if required {
                input type="text" id=(name) name=(name) value=[value] required;
            } @else {
                input type="text" id=(name) name=(name) value=[value];
            }
        }
    }
}

/// The six editable inputs, pre-filled from `current` when given.
fn supplier_inputs(current: Option<&Supplier>) -> Markup {
    html! {
        (text_input("company_name", "Company name", current.map(|s| s.company_name.as_str()), true))
        (text_input("company_phone", "Phone", current.and_then(|s| s.company_phone.as_deref()), false))
        (text_input("company_email", "Email", current.and_then(|s| s.company_email.as_deref()), false))
        (text_input("country_of_origin", "Country of origin", current.and_then(|s| s.country_of_origin.as_deref()), false))
        (text_input("primary_contact", "Primary contact", current.and_then(|s| s.primary_contact.as_deref()), false))
        (text_input("address", "Address", current.and_then(|s| s.address.as_deref()), false))
    }
}

fn registered(supplier: &Supplier) -> String {
    supplier.registered_at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn or_blank(value: Option<&str>) -> &str {
    value.unwrap_or("")
}

pub fn home() -> Markup {
    layout(
        "Welcome",
        html! {
            p { "Manage the suppliers that stock " (SITE_NAME) "." }
            ul {
                li { a href=(LIST_PATH) { "View suppliers" } }
                li { a href=(ADD_PATH) { "Register a new supplier" } }
            }
        },
    )
}

/// Table of suppliers, in the order given.
pub fn supplier_list(suppliers: &[Supplier]) -> Markup {
    layout(
        "Suppliers",
        html! {
            p { a href=(ADD_PATH) { "Add supplier" } }
            @if suppliers.is_empty() {
                p class="empty" { "No suppliers registered yet." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Company" }
                            th { "Phone" }
                            th { "Email" }
                            th { "Country" }
                            th { "Primary contact" }
                            th { "Address" }
                            th { "Registered" }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        @for supplier in suppliers {
                            tr class="supplier-row" data-id=(supplier.id.get()) {
                                td { (supplier.company_name) }
                                td { (or_blank(supplier.company_phone.as_deref())) }
                                td { (or_blank(supplier.company_email.as_deref())) }
                                td { (or_blank(supplier.country_of_origin.as_deref())) }
                                td { (or_blank(supplier.primary_contact.as_deref())) }
                                td { (or_blank(supplier.address.as_deref())) }
                                td { (registered(supplier)) }
                                td {
                                    a href=(edit_path(supplier.id)) { "Edit" }
                                    " "
                                    a href=(delete_path(supplier.id)) { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Empty creation form, optionally with an error from a rejected submission.
pub fn add_form(error: Option<&str>) -> Markup {
    layout(
        "Add supplier",
        html! {
            (error_banner(error))
            form method="post" action=(ADD_PATH) {
                (supplier_inputs(None))
                button type="submit" { "Save" }
                " "
                a href=(LIST_PATH) { "Cancel" }
            }
        },
    )
}

/// Edit form pre-filled with the stored values of `supplier`.
pub fn edit_form(supplier: &Supplier, error: Option<&str>) -> Markup {
    layout(
        "Edit supplier",
        html! {
            (error_banner(error))
            form method="post" action=(APPLY_UPDATE_PATH) {
                input type="hidden" name="supplier_id" value=(supplier.id.get());
                (supplier_inputs(Some(supplier)))
                p { "Registered " (registered(supplier)) }
                button type="submit" { "Update" }
                " "
                a href=(LIST_PATH) { "Cancel" }
            }
        },
    )
}

pub fn delete_confirmation(supplier: &Supplier) -> Markup {
    layout(
        "Delete supplier",
        html! {
            p { "Are you sure you want to delete " strong { (supplier.company_name) } "?" }
            dl {
                dt { "Phone" } dd { (or_blank(supplier.company_phone.as_deref())) }
                dt { "Email" } dd { (or_blank(supplier.company_email.as_deref())) }
                dt { "Country of origin" } dd { (or_blank(supplier.country_of_origin.as_deref())) }
                dt { "Primary contact" } dd { (or_blank(supplier.primary_contact.as_deref())) }
                dt { "Address" } dd { (or_blank(supplier.address.as_deref())) }
                dt { "Registered" } dd { (registered(supplier)) }
            }
            form method="post" action=(delete_path(supplier.id)) {
                button type="submit" { "Yes, delete" }
                " "
                a href=(LIST_PATH) { "Cancel" }
            }
        },
    )
}

pub fn not_found() -> Markup {
    layout(
        "Not found",
        html! {
            p { "The page or supplier you asked for does not exist." }
            p { a href=(LIST_PATH) { "Back to suppliers" } }
        },
    )
}

pub fn server_error() -> Markup {
    layout(
        "Something went wrong",
        html! {
            p { "The request could not be completed. Please try again later." }
        },
    )
}
