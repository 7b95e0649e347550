use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use victory_core::DomainError;

use crate::app::views;

pub const DUPLICATE_COMPANY_NAME: &str = "A supplier with that company name already exists.";
pub const GENERIC_SAVE_FAILURE: &str = "The supplier could not be saved. Please try again.";

/// Errors that end a page request instead of being shown on a form.
#[derive(Debug)]
pub enum PageError {
    NotFound,
    Internal(String),
}

impl From<DomainError> for PageError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound | DomainError::InvalidId(_) => Self::NotFound,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => html_page(StatusCode::NOT_FOUND, views::not_found()),
            PageError::Internal(detail) => {
                tracing::error!(%detail, "request aborted by storage failure");
                html_page(StatusCode::INTERNAL_SERVER_ERROR, views::server_error())
            }
        }
    }
}

pub fn html_page(status: StatusCode, page: maud::Markup) -> Response {
    (status, Html(page.into_string())).into_response()
}

/// Message shown on a re-rendered form after a rejected write.
///
/// Storage failures only carry their underlying text when `expose_detail` is
/// set; the detail is logged either way.
pub fn form_error_message(err: &DomainError, expose_detail: bool) -> String {
    match err {
        DomainError::Conflict(_) => DUPLICATE_COMPANY_NAME.to_string(),
        DomainError::Validation(msg) => msg.clone(),
        other if expose_detail => format!("An error occurred: {other}"),
        _ => GENERIC_SAVE_FAILURE.to_string(),
    }
}
