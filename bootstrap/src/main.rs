mod args;
mod choices;
mod command;
mod locator;

use crate::args::CommonArgs;
use crate::command::Command;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hall-pass-tracker", about = "School hall pass sign-out tracker")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let _sentry_guard = init_sentry(&cli.common);
    init_tracing();

    cli.command.run(cli.common).await
}

fn init_sentry(common: &CommonArgs) -> Option<sentry::ClientInitGuard> {
    common.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                environment: common.sentry_environment.clone().map(Into::into),
                sample_rate: common.sentry_sample_rate.unwrap_or(1.0),
                traces_sample_rate: common.sentry_traces_sample_rate.unwrap_or(0.0),
                ..Default::default()
            },
        ))
    })
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();
}
