use crate::application_ports::Locator;
use crate::web::AppState;
use axum::extract::{Query, State};
use axum::response::Response;
use domain_shared::student::StudentName;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

#[derive(Deserialize)]
pub struct HomeQuery {
    name: Option<String>,
}

/// Sign-out/sign-in form. With `?name=First+Last` (set by the post-sign-out
/// redirect) the student's quarter usage is shown; a store hiccup degrades
/// to the plain page rather than an error.
pub async fn page<L: Locator>(
    State(state): State<AppState<L>>,
    Query(query): Query<HomeQuery>,
) -> Response {
    let mut name = None;
    let mut usage = None;

    if let Some(student) = query.name.as_deref().and_then(StudentName::parse_full) {
        match state
            .locator
            .get_dashboard_port()
            .quarter_usage(student.clone())
            .await
        {
            Ok(u) => {
                name = Some(student.display());
                usage = Some(u);
            }
            Err(err) => {
                warn!(error = %err, "Could not look up quarter usage for home page");
            }
        }
    }

    let config = &state.config;
    state.pages.render(
        "index",
        &json!({
            "name": name,
            "used_passes": usage.as_ref().map(|u| u.used),
            "allowed_passes": usage.as_ref().map(|u| u.allowed),
            "quarter": usage.as_ref().and_then(|u| u.active_quarter.clone()),
            "teachers": config.teachers,
            "periods": config.periods,
            "reasons": config.reasons,
            "pin_required": config.pin_required,
        }),
    )
}
