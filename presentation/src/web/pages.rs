use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use handlebars::Handlebars;
use serde_json::json;
use std::path::Path;
use tracing::error;

/// Handlebars registry loaded once at startup from the template directory.
pub struct Pages {
    registry: Handlebars<'static>,
}

impl Pages {
    pub fn from_dir(dir: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut registry = Handlebars::new();
        registry.register_templates_directory(".hbs", dir)?;
        Ok(Self { registry })
    }

    pub fn render(&self, name: &str, ctx: &serde_json::Value) -> Response {
        self.render_status(StatusCode::OK, name, ctx)
    }

    pub fn render_status(
        &self,
        status: StatusCode,
        name: &str,
        ctx: &serde_json::Value,
    ) -> Response {
        match self.registry.render(name, ctx) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(err) => {
                error!(template = name, "Failed to render template: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Something went wrong.</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }

    /// The shared error page with a user-facing message.
    pub fn error(&self, status: StatusCode, message: &str) -> Response {
        self.render_status(status, "error", &json!({ "message": message }))
    }
}
