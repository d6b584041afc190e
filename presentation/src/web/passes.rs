use crate::application_ports::Locator;
use crate::web::AppState;
use application_ports::sign_in::SignInError;
use application_ports::sign_out::{SignOutError, SignOutRequest};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SignOutForm {
    first_name: String,
    last_name: String,
    period: String,
    teacher: String,
    reason: String,
    other_reason: Option<String>,
    pin: Option<String>,
}

#[derive(Deserialize)]
pub struct SignInForm {
    name: String,
}

fn home_redirect(display_name: &str) -> Redirect {
    Redirect::to(&format!("/?name={}", urlencoding::encode(display_name)))
}

pub async fn sign_out<L: Locator>(
    State(state): State<AppState<L>>,
    Form(form): Form<SignOutForm>,
) -> Response {
    let request = SignOutRequest {
        first_name: form.first_name,
        last_name: form.last_name,
        period: form.period,
        teacher: form.teacher,
        reason: form.reason,
        other_reason: form.other_reason,
        pin: form.pin,
    };

    match state.locator.get_sign_out_port().sign_out(request).await {
        Ok(accepted) => home_redirect(&accepted.student.display()).into_response(),
        Err(err) => {
            let status = match &err {
                SignOutError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SignOutError::InvalidPin => StatusCode::FORBIDDEN,
                SignOutError::TemporaryUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                SignOutError::NoActiveQuarter
                | SignOutError::HallCapacity
                | SignOutError::QuarterLimitReached { .. }
                | SignOutError::AlreadyOut
                | SignOutError::DuplicateSubmit => StatusCode::CONFLICT,
            };
            state.pages.error(status, &err.to_string())
        }
    }
}

pub async fn sign_in<L: Locator>(
    State(state): State<AppState<L>>,
    Form(form): Form<SignInForm>,
) -> Response {
    match state.locator.get_sign_in_port().sign_in(form.name).await {
        Ok(confirmed) => home_redirect(&confirmed.student.display()).into_response(),
        Err(err) => {
            let status = match &err {
                SignInError::InvalidName => StatusCode::UNPROCESSABLE_ENTITY,
                SignInError::NoOpenPass => StatusCode::NOT_FOUND,
                SignInError::TemporaryUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            };
            state.pages.error(status, &err.to_string())
        }
    }
}
