pub mod reclaim;
pub mod serve;

use crate::args::CommonArgs;
use crate::command::reclaim::ReclaimArgs;
use crate::command::serve::ServeArgs;
use clap::Subcommand;
use tracing::instrument;

#[derive(Subcommand)]
pub enum Command {
    /// Run the web app.
    #[command(name = "serve")]
    Serve(ServeArgs),
    /// One-shot stale-pass sweep, then exit.
    #[command(name = "reclaim")]
    Reclaim(ReclaimArgs),
}

impl Command {
    #[instrument(level = "trace", skip(self, common_args))]
    pub async fn run(self, common_args: CommonArgs) -> anyhow::Result<()> {
        match self {
            Command::Serve(args) => serve::run(common_args, args).await,
            Command::Reclaim(args) => reclaim::run(common_args, args).await,
        }
    }
}
