// File: services/cliniko_probe_cli/src/cli.rs
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cliniko_probe::models::{APPOINTMENT_TYPE_ID, BUSINESS_ID, PRACTITIONER_ID};
use cliniko_probe::suites::{format_date, parse_date};
use cliniko_probe_config::AppConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "cliniko-probe", version)]
#[command(about = "Probe Cliniko scheduling endpoints and save whatever answers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API base URL, e.g. https://api.au1.cliniko.com/v1
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Cliniko API key (prefer CLINIKO_PROBE_SECRET_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true)]
    pub business_id: Option<String>,

    #[arg(long, global = true)]
    pub practitioner_id: Option<String>,

    /// Appointment type id; repeat or separate with commas
    #[arg(long = "appointment-type-id", global = true, value_delimiter = ',')]
    pub appointment_type_ids: Vec<String>,

    /// First day of the probed window (YYYY-MM-DD), default today
    #[arg(long, global = true, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Last day of the probed window (YYYY-MM-DD), default from + 7 days
    #[arg(long, global = true, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Directory the JSON artifacts are written to
    #[arg(long, global = true)]
    pub output_dir: Option<String>,

    /// Save {endpoint, params, response} instead of the bare body
    #[arg(long, global = true)]
    pub envelope: bool,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Fail instead of asking for missing values
    #[arg(long, global = true)]
    pub no_prompt: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Check the credential against GET /businesses
    Connection,
    /// The nested available_times endpoint
    AvailableTimes,
    /// Sweep next_available_time paths and parameter sets
    NextAvailable,
    /// Discover appointment types and try available_times shapes
    Patterns,
    /// Connection check, then every other suite
    All,
}

impl Command {
    /// Identifiers the command cannot run without.
    pub fn required_ids(self) -> &'static [&'static str] {
        match self {
            Command::Connection => &[],
            Command::Patterns => &[PRACTITIONER_ID],
            Command::AvailableTimes | Command::NextAvailable | Command::All => {
                &[BUSINESS_ID, PRACTITIONER_ID, APPOINTMENT_TYPE_ID]
            }
        }
    }
}

impl Command {
    /// Whether the command probes a full date window (and so validates it).
    pub fn uses_window(self) -> bool {
        matches!(self, Command::NextAvailable | Command::Patterns | Command::All)
    }

    /// Whether the command asks for date bounds when none are configured.
    pub fn prompts_for_window(self) -> bool {
        matches!(
            self,
            Command::AvailableTimes | Command::NextAvailable | Command::All
        )
    }
}

impl Cli {
    /// Command line values win over files and environment.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(key) = &self.api_key {
            config.api.key = Some(key.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.api.timeout_secs = Some(secs);
        }
        if let Some(id) = &self.business_id {
            config.ids.business_id = Some(id.clone());
        }
        if let Some(id) = &self.practitioner_id {
            config.ids.practitioner_id = Some(id.clone());
        }
        let ids: Vec<String> = self
            .appointment_type_ids
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if !ids.is_empty() {
            config.ids.appointment_type_ids = ids;
        }
        if let Some(from) = self.from {
            config.window.from = Some(format_date(from));
        }
        if let Some(to) = self.to {
            config.window.to = Some(format_date(to));
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if self.envelope {
            config.output.envelope = true;
        }
    }
}
