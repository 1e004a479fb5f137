//! Template rendering and display formatting.
//!
//! Handlers build fully formatted view structs (strings only, no money or
//! date arithmetic in templates) and hand them to [`render`].

pub mod format;

use actix_web::HttpResponse;
use askama::Template;
use tracing::error;

/// Render a template to an HTML response, mapping render failures to a
/// bare 500 so broken markup never reaches the operator half-drawn.
pub fn render<T: Template>(template: T) -> HttpResponse {
    match template.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            error!(error = %err, "template render failed");
            HttpResponse::InternalServerError().finish()
        }
    }
}
