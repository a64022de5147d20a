//! Server-rendered HTML pages.

pub mod handlers;

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::Error;

pub type PageResult<T> = std::result::Result<T, PageError>;

/// Error boundary for page handlers: renders the error page instead of JSON
#[derive(Debug)]
pub struct PageError(pub Error);

impl From<Error> for PageError {
    fn from(err: Error) -> Self {
        PageError(err)
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    heading: &'static str,
    message: &'static str,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("Page error: {}", self.0.log_safe());

        let status = self.0.status_code();
        let template = if self.0.is_fetch() {
            ErrorTemplate {
                heading: "We couldn't reach the recipe service",
                message: "The recipe service did not answer. Please try again in a moment.",
            }
        } else {
            ErrorTemplate {
                heading: "Something went wrong",
                message: "An unexpected error occurred while building this page.",
            }
        };

        match template.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, template.heading).into_response(),
        }
    }
}

/// Render a template, mapping askama failures to an internal error
pub(crate) fn render<T: Template>(template: &T) -> Result<String, Error> {
    template
        .render()
        .map_err(|e| Error::Internal(format!("Template render failed: {e}")))
}

/// Fallback for unknown paths
pub async fn not_found() -> impl IntoResponse {
    let template = ErrorTemplate {
        heading: "Page not found",
        message: "There is no page at this address.",
    };
    match template.render() {
        Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, template.heading).into_response(),
    }
}
