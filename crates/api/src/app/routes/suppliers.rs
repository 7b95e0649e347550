use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};

use victory_suppliers::SupplierId;

use crate::app::errors::{html_page, PageError};
use crate::app::forms::{ApplyUpdateForm, SupplierForm};
use crate::app::services::AppServices;
use crate::app::views;

pub const LIST_PATH: &str = "/suppliers/";
pub const ADD_PATH: &str = "/suppliers/add/";
pub const APPLY_UPDATE_PATH: &str = "/suppliers/apply-update/";

pub fn edit_path(id: SupplierId) -> String {
    format!("/suppliers/edit/{id}/")
}

pub fn delete_path(id: SupplierId) -> String {
    format!("/suppliers/delete/{id}/")
}

pub fn router() -> Router {
    Router::new()
        .route(LIST_PATH, get(list_suppliers))
        .route(ADD_PATH, get(show_add_form).post(create_supplier))
        .route("/suppliers/edit/:id/", get(show_edit_form))
        .route(APPLY_UPDATE_PATH, get(redirect_to_list).post(apply_update))
        .route(
            "/suppliers/delete/:id/",
            get(show_delete_confirmation).post(confirm_delete),
        )
}

type PageResult = Result<Response, PageError>;

fn page(markup: maud::Markup) -> Response {
    html_page(StatusCode::OK, markup)
}

fn to_list() -> Response {
    Redirect::to(LIST_PATH).into_response()
}

/// Integer path ids only; anything else is treated as an unknown page.
fn parse_id(raw: &str) -> Result<SupplierId, PageError> {
    raw.parse().map_err(|_| PageError::NotFound)
}

pub async fn list_suppliers(Extension(services): Extension<Arc<AppServices>>) -> PageResult {
    let suppliers = services.suppliers().list().await?;
    Ok(page(views::supplier_list(&suppliers)))
}

pub async fn show_add_form() -> Response {
    page(views::add_form(None))
}

pub async fn create_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<SupplierForm>,
) -> Response {
    match services.suppliers().create(form.into()).await {
        Ok(_) => to_list(),
        // Submitted values are not echoed back.
        Err(e) => page(views::add_form(Some(&services.form_error_message(&e)))),
    }
}

pub async fn show_edit_form(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> PageResult {
    let supplier = services.suppliers().get(parse_id(&id)?).await?;
    Ok(page(views::edit_form(&supplier, None)))
}

/// The edit form has its own GET route; a plain visit here just goes back to the list.
pub async fn redirect_to_list() -> Response {
    to_list()
}

pub async fn apply_update(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<ApplyUpdateForm>,
) -> PageResult {
    let (raw_id, fields) = form.into_parts();
    let id = parse_id(raw_id.as_deref().unwrap_or_default())?;
    let current = services.suppliers().get(id).await?;

    match services.suppliers().apply(&current, fields).await {
        Ok(_) => Ok(to_list()),
        // Re-render with the stored state, not the rejected submission.
        Err(e) if e.is_recoverable() => Ok(page(views::edit_form(
            &current,
            Some(&services.form_error_message(&e)),
        ))),
        // Deleted between the lookup and the write.
        Err(e) => Err(e.into()),
    }
}

pub async fn show_delete_confirmation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> PageResult {
    let supplier = services.suppliers().get(parse_id(&id)?).await?;
    Ok(page(views::delete_confirmation(&supplier)))
}

pub async fn confirm_delete(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> PageResult {
    let supplier = services.suppliers().get(parse_id(&id)?).await?;
    services.suppliers().delete(supplier.id).await?;
    Ok(to_list())
}
