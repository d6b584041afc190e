use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CommonArgs {
    /// Id of the tracking spreadsheet. When absent the CSV fallback store is
    /// used instead.
    #[arg(long, env = "SPREADSHEET_ID")]
    pub spreadsheet_id: Option<String>,
    /// Bearer token for the spreadsheet API.
    #[arg(long, env = "SHEETS_API_TOKEN")]
    pub sheets_api_token: Option<String>,
    #[arg(long, env = "SHEETS_ENDPOINT", default_value = "https://sheets.googleapis.com")]
    pub sheets_endpoint: String,
    /// Tab holding the pass rows.
    #[arg(long, env = "PASS_SHEET_TAB", default_value = "Passes")]
    pub pass_sheet_tab: String,
    /// Pass file for the CSV fallback store.
    #[arg(long, env = "PASS_CSV_PATH", default_value = "hall_passes.csv")]
    pub pass_csv_path: PathBuf,
    /// Roster tab in the tracking spreadsheet, for PIN validation.
    #[arg(long, env = "ROSTER_SHEET_TAB")]
    pub roster_sheet_tab: Option<String>,
    /// Roster CSV file, for PIN validation without a spreadsheet.
    #[arg(long, env = "ROSTER_CSV_PATH")]
    pub roster_csv_path: Option<PathBuf>,

    #[arg(long, env = "HALL_LIMIT", default_value_t = 10)]
    pub hall_limit: usize,
    #[arg(long, env = "MAX_QUARTER_PASSES", default_value_t = 18)]
    pub max_quarter_passes: usize,
    #[arg(long, env = "DUPLICATE_WINDOW_SECONDS", default_value_t = 60)]
    pub duplicate_window_seconds: i64,
    #[arg(long, env = "STALE_AFTER_MINUTES", default_value_t = 30)]
    pub stale_after_minutes: i64,
    /// Permit sign-outs when no quarter is in session.
    #[arg(long, env = "ALLOW_OUTSIDE_QUARTER")]
    pub allow_outside_quarter: bool,
    /// Require a roster PIN match on sign-out.
    #[arg(long, env = "PIN_REQUIRED")]
    pub pin_required: bool,
    /// Explicit quarter table as JSON, e.g.
    /// [{"name":"Q1","start":"2025-08-06","end":"2025-10-10"}]. End dates are
    /// exclusive. Defaults to the stock table for the current school year.
    #[arg(long, env = "QUARTER_TABLE")]
    pub quarter_table: Option<String>,

    #[arg(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
    #[arg(long, env = "SENTRY_ENVIRONMENT")]
    pub sentry_environment: Option<String>,
    #[arg(long, env = "SENTRY_SAMPLE_RATE")]
    pub sentry_sample_rate: Option<f32>,
    #[arg(long, env = "SENTRY_TRACES_SAMPLE_RATE")]
    pub sentry_traces_sample_rate: Option<f32>,
}
