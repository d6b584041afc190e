use crate::args::CommonArgs;
use anyhow::{bail, Context};
use application::dashboard::DashboardService;
use application::sign_in::SignInService;
use application::sign_out::SignOutService;
use application_ports::dashboard::DashboardPort;
use application_ports::sign_in::SignInPort;
use application_ports::sign_out::SignOutPort;
use chrono::{Local, NaiveDate};
use domain::policy::PassPolicy;
use domain::ports::pass_store::PassStorePort;
use domain::ports::roster::RosterPort;
use domain::quarter::{Quarter, QuarterCalendar};
use infrastructure::csv_file::pass_store::CsvPassStore;
use infrastructure::csv_file::roster::CsvRoster;
use infrastructure::sheets::{SheetsClient, SheetsClientConfig, SheetsPassStore, SheetsRoster};
use presentation::application_ports::Locator;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use url::Url;

#[derive(Clone)]
pub struct ApplicationPortLocator {
    sign_out_adapter: Arc<SignOutService>,
    sign_in_adapter: Arc<SignInService>,
    dashboard_adapter: Arc<DashboardService>,
}

impl ApplicationPortLocator {
    #[instrument(level = "trace", skip_all)]
    pub fn new(
        sign_out_adapter: Arc<SignOutService>,
        sign_in_adapter: Arc<SignInService>,
        dashboard_adapter: Arc<DashboardService>,
    ) -> Self {
        Self {
            sign_out_adapter,
            sign_in_adapter,
            dashboard_adapter,
        }
    }
}

impl Locator for ApplicationPortLocator {
    fn get_sign_out_port(&self) -> Arc<dyn SignOutPort + Send + Sync> {
        self.sign_out_adapter.clone()
    }

    fn get_sign_in_port(&self) -> Arc<dyn SignInPort + Send + Sync> {
        self.sign_in_adapter.clone()
    }

    fn get_dashboard_port(&self) -> Arc<dyn DashboardPort + Send + Sync> {
        self.dashboard_adapter.clone()
    }
}

pub fn build_policy(common: &CommonArgs) -> PassPolicy {
    PassPolicy {
        hall_limit: common.hall_limit,
        max_quarter_passes: common.max_quarter_passes,
        duplicate_window_seconds: common.duplicate_window_seconds,
        stale_after_minutes: common.stale_after_minutes,
        allow_outside_quarter: common.allow_outside_quarter,
        pin_required: common.pin_required,
    }
}

#[derive(Deserialize)]
struct QuarterRow {
    name: String,
    start: NaiveDate,
    end: NaiveDate,
}

pub fn build_calendar(common: &CommonArgs) -> anyhow::Result<QuarterCalendar> {
    match &common.quarter_table {
        Some(table) => {
            let rows: Vec<QuarterRow> =
                serde_json::from_str(table).context("Failed to parse QUARTER_TABLE")?;
            Ok(QuarterCalendar::new(
                rows.into_iter()
                    .map(|row| Quarter::new(row.name, row.start, row.end))
                    .collect(),
            ))
        }
        None => Ok(QuarterCalendar::for_school_year_containing(
            Local::now().date_naive(),
        )),
    }
}

fn sheets_client(common: &CommonArgs, spreadsheet_id: &str) -> anyhow::Result<SheetsClient> {
    let token = common
        .sheets_api_token
        .clone()
        .context("SHEETS_API_TOKEN is required when SPREADSHEET_ID is set")?;
    let endpoint = Url::parse(&common.sheets_endpoint).context("Invalid SHEETS_ENDPOINT")?;
    Ok(SheetsClient::new(SheetsClientConfig {
        endpoint,
        spreadsheet_id: spreadsheet_id.to_string(),
        token,
    }))
}

pub fn build_pass_store(common: &CommonArgs) -> anyhow::Result<Arc<dyn PassStorePort + Send + Sync>> {
    match &common.spreadsheet_id {
        Some(id) => {
            info!(tab = %common.pass_sheet_tab, "Using spreadsheet pass store");
            Ok(Arc::new(SheetsPassStore::new(
                sheets_client(common, id)?,
                common.pass_sheet_tab.clone(),
            )))
        }
        None => {
            info!(path = %common.pass_csv_path.display(), "Using CSV fallback pass store");
            Ok(Arc::new(CsvPassStore::new(common.pass_csv_path.clone())))
        }
    }
}

pub fn build_roster(
    common: &CommonArgs,
) -> anyhow::Result<Option<Arc<dyn RosterPort + Send + Sync>>> {
    let roster: Option<Arc<dyn RosterPort + Send + Sync>> =
        match (&common.spreadsheet_id, &common.roster_sheet_tab, &common.roster_csv_path) {
            (Some(id), Some(tab), _) => Some(Arc::new(SheetsRoster::new(
                sheets_client(common, id)?,
                tab.clone(),
            ))),
            (_, _, Some(path)) => Some(Arc::new(CsvRoster::new(path.clone()))),
            _ => None,
        };

    if common.pin_required && roster.is_none() {
        bail!("PIN_REQUIRED is set but neither ROSTER_SHEET_TAB nor ROSTER_CSV_PATH is configured");
    }
    Ok(roster)
}
