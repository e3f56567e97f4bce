//! Defines the pages to display when the server cannot handle a request.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl InternalServerError<'_> {
    pub fn into_html(self) -> Html<String> {
        Html(error_view("Internal Server Error", "500", self.description, self.fix).into_string())
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

/// The page shown when the database cannot be reached.
pub struct ServiceUnavailable;

impl IntoResponse for ServiceUnavailable {
    fn into_response(self) -> Response {
        let page = error_view(
            "Service Unavailable",
            "503",
            "Could not connect to the database.",
            "Your data is safe, but it cannot be shown right now. Try again in a moment.",
        );

        (StatusCode::SERVICE_UNAVAILABLE, Html(page.into_string())).into_response()
    }
}
