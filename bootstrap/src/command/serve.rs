use crate::args::CommonArgs;
use crate::choices;
use crate::locator::{
    build_calendar, build_pass_store, build_policy, build_roster, ApplicationPortLocator,
};
use anyhow::{anyhow, bail, Context};
use application::dashboard::DashboardService;
use application::sign_in::SignInService;
use application::sign_out::SignOutService;
use clap::Args;
use presentation::web::{run_web, WebConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::instrument;

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
    /// Shared password gating the staff views.
    #[arg(long, env = "STAFF_PASSWORD")]
    pub staff_password: String,
    /// Secret for signing the session cookie, at least 32 bytes. Sessions do
    /// not survive a restart without one.
    #[arg(long, env = "COOKIE_SECRET")]
    pub cookie_secret: Option<String>,
    #[arg(long, env = "TEMPLATE_DIR", default_value = "templates")]
    pub template_dir: PathBuf,
    /// JSON array overriding the built-in teacher list.
    #[arg(long, env = "TEACHER_CHOICES")]
    pub teacher_choices: Option<String>,
    /// JSON array overriding the built-in period list.
    #[arg(long, env = "PERIOD_CHOICES")]
    pub period_choices: Option<String>,
    /// JSON array overriding the built-in reason list.
    #[arg(long, env = "REASON_CHOICES")]
    pub reason_choices: Option<String>,
}

fn choice_list(
    override_json: &Option<String>,
    what: &str,
    default: fn() -> Vec<String>,
) -> anyhow::Result<Vec<String>> {
    match override_json {
        Some(json) => serde_json::from_str::<Vec<String>>(json)
            .with_context(|| format!("Failed to parse {what} as a JSON string array")),
        None => Ok(default()),
    }
}

#[instrument(level = "trace", skip(common_args, args))]
pub async fn run(common_args: CommonArgs, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(secret) = &args.cookie_secret {
        if secret.len() < 32 {
            bail!("COOKIE_SECRET must be at least 32 bytes");
        }
    }

    let policy = build_policy(&common_args);
    let calendar = build_calendar(&common_args)?;
    let pass_store = build_pass_store(&common_args)?;
    let roster = build_roster(&common_args)?;

    let sign_out_adapter = Arc::new(SignOutService::new(
        pass_store.clone(),
        roster,
        calendar.clone(),
        policy.clone(),
    ));
    let sign_in_adapter = Arc::new(SignInService::new(pass_store.clone()));
    let dashboard_adapter = Arc::new(DashboardService::new(pass_store, calendar, policy.clone()));

    let locator =
        ApplicationPortLocator::new(sign_out_adapter, sign_in_adapter, dashboard_adapter);

    let config = WebConfig {
        staff_password: args.staff_password,
        cookie_secret: args.cookie_secret,
        template_dir: args.template_dir,
        teachers: choice_list(&args.teacher_choices, "TEACHER_CHOICES", choices::default_teachers)?,
        periods: choice_list(&args.period_choices, "PERIOD_CHOICES", choices::default_periods)?,
        reasons: choice_list(&args.reason_choices, "REASON_CHOICES", choices::default_reasons)?,
        pin_required: policy.pin_required,
    };

    run_web(locator, config, args.port).await.map_err(|e| anyhow!(e))
}
