use crate::application_ports::Locator;
use crate::web::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

const SESSION_COOKIE: &str = "staff_session";

pub fn is_staff(jar: &SignedCookieJar) -> bool {
    jar.get(SESSION_COOKIE).is_some()
}

#[derive(Deserialize)]
pub struct LoginForm {
    password: String,
}

pub async fn login_page<L: Locator>(State(state): State<AppState<L>>) -> Response {
    state.pages.render("login", &json!({}))
}

pub async fn login_submit<L: Locator>(
    State(state): State<AppState<L>>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    if form.password == state.config.staff_password {
        let mut cookie = Cookie::new(SESSION_COOKIE, "1");
        cookie.set_path("/");
        cookie.set_http_only(true);
        info!("Staff login");
        (jar.add(cookie), Redirect::to("/dashboard")).into_response()
    } else {
        warn!("Failed staff login attempt");
        state.pages.render_status(
            StatusCode::UNAUTHORIZED,
            "login",
            &json!({ "error": "Incorrect password" }),
        )
    }
}

pub async fn logout(jar: SignedCookieJar) -> Response {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), Redirect::to("/")).into_response()
}
