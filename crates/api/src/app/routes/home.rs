use axum::response::Html;

use crate::app::views;

/// Static landing page.
pub async fn show_home() -> Html<String> {
    Html(views::home().into_string())
}
