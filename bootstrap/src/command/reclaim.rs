use crate::args::CommonArgs;
use crate::locator::{build_calendar, build_pass_store, build_policy};
use application::dashboard::DashboardService;
use application_ports::dashboard::DashboardPort;
use clap::Args;
use tracing::instrument;

#[derive(Args, Debug)]
pub struct ReclaimArgs {}

#[instrument(level = "info", skip(common_args, args))]
pub async fn run(common_args: CommonArgs, args: ReclaimArgs) -> anyhow::Result<()> {
    let ReclaimArgs {} = args;

    let policy = build_policy(&common_args);
    let calendar = build_calendar(&common_args)?;
    let pass_store = build_pass_store(&common_args)?;

    let dashboard = DashboardService::new(pass_store, calendar, policy);
    let closed = dashboard
        .reclaim_stale()
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    println!("Closed {closed} stale passes");
    Ok(())
}
