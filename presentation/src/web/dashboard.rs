use crate::application_ports::Locator;
use crate::web::auth::is_staff;
use crate::web::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::SignedCookieJar;
use serde_json::{json, Value};

/// Staff view of everyone currently out. Stale passes are swept by the
/// service before the listing, so a forgotten sign-out ages off this page
/// on its own.
pub async fn dashboard<L: Locator>(
    State(state): State<AppState<L>>,
    jar: SignedCookieJar,
) -> Response {
    if !is_staff(&jar) {
        return Redirect::to("/login").into_response();
    }

    match state.locator.get_dashboard_port().currently_out().await {
        Ok(view) => {
            let passes: Vec<Value> = view
                .open
                .iter()
                .map(|p| {
                    json!({
                        "first_name": p.first_name,
                        "last_name": p.last_name,
                        "period": p.period,
                        "teacher": p.teacher,
                        "reason": p.reason,
                        "time_out": p.time_out,
                    })
                })
                .collect();
            let counts: Vec<Value> = view
                .counts
                .iter()
                .map(|c| json!({ "name": c.name, "total": c.total }))
                .collect();
            state
                .pages
                .render("dashboard", &json!({ "passes": passes, "counts": counts }))
        }
        Err(err) => state
            .pages
            .error(StatusCode::SERVICE_UNAVAILABLE, &err.to_string()),
    }
}

pub async fn student_list<L: Locator>(
    State(state): State<AppState<L>>,
    jar: SignedCookieJar,
) -> Response {
    if !is_staff(&jar) {
        return Redirect::to("/login").into_response();
    }

    match state.locator.get_dashboard_port().student_list().await {
        Ok(view) => {
            let counts: Vec<Value> = view
                .counts
                .iter()
                .map(|c| json!({ "name": c.name, "total": c.total }))
                .collect();
            state.pages.render(
                "student_list",
                &json!({
                    "counts": counts,
                    "current_quarter": view.active_quarter.as_deref().unwrap_or("Unknown"),
                }),
            )
        }
        Err(err) => state
            .pages
            .error(StatusCode::SERVICE_UNAVAILABLE, &err.to_string()),
    }
}
