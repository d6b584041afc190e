pub mod auth;
pub mod dashboard;
pub mod home;
pub mod pages;
pub mod passes;

use crate::application_ports::Locator;
use crate::web::pages::Pages;
use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::Key;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct WebConfig {
    pub staff_password: String,
    /// Secret the session cookie is signed with; at least 32 bytes. When
    /// absent a random key is generated and staff sessions do not survive a
    /// restart.
    pub cookie_secret: Option<String>,
    pub template_dir: PathBuf,
    pub teachers: Vec<String>,
    pub periods: Vec<String>,
    pub reasons: Vec<String>,
    pub pin_required: bool,
}

pub struct AppState<L> {
    pub(crate) locator: L,
    pub(crate) pages: Arc<Pages>,
    pub(crate) config: Arc<WebConfig>,
    pub(crate) cookie_key: Key,
}

impl<L: Clone> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            locator: self.locator.clone(),
            pages: self.pages.clone(),
            config: self.config.clone(),
            cookie_key: self.cookie_key.clone(),
        }
    }
}

impl<L> FromRef<AppState<L>> for Key {
    fn from_ref(state: &AppState<L>) -> Key {
        state.cookie_key.clone()
    }
}

pub fn create_router<L: Locator + Send + Sync + Clone + 'static>(state: AppState<L>) -> Router {
    Router::new()
        .route("/", get(home::page::<L>))
        .route("/signout", post(passes::sign_out::<L>))
        .route("/signin", post(passes::sign_in::<L>))
        .route("/login", get(auth::login_page::<L>).post(auth::login_submit::<L>))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(dashboard::dashboard::<L>))
        .route("/student_list", get(dashboard::student_list::<L>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_web<L: Locator + Send + Sync + Clone + 'static>(
    locator: L,
    config: WebConfig,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let pages = Pages::from_dir(&config.template_dir)?;
    let cookie_key = match &config.cookie_secret {
        Some(secret) => Key::derive_from(secret.as_bytes()),
        None => Key::generate(),
    };
    let state = AppState {
        locator,
        pages: Arc::new(pages),
        config: Arc::new(config),
        cookie_key,
    };

    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
