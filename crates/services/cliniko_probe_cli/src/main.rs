// File: services/cliniko_probe_cli/src/main.rs
mod cli;
mod prompt;

use chrono::Local;
use clap::Parser;
use cli::{Cli, Command};
use cliniko_probe::workflows::{
    run_all, run_available_times, run_connection, run_next_available, run_patterns,
};
use cliniko_probe::suites::{configured_bounds, DEFAULT_WINDOW_DAYS};
use cliniko_probe::{ArtifactWriter, ConsoleReporter, Credential, DateWindow, Identifiers, Prober};
use cliniko_probe_common::{init, init_from_config, log_error, log_result, ProbeError};
use cliniko_probe_config::load_config;
use prompt::{fill_missing, Prompter};
use std::io;
use tracing::info;

// The exit status is always 0; failures are reported as text.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return;
        }
    };

    if let Err(e) = run(cli).await {
        log_error(&e, "cliniko-probe");
        println!("❌ {}", e);
    }
}

async fn run(cli: Cli) -> Result<(), ProbeError> {
    let mut config = load_config()?;
    cli.apply_to(&mut config);

    let _guard = match init_from_config(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            init();
            log_error(&e, "logging setup, falling back to stderr at INFO");
            None
        }
    };

    if !cli.no_prompt {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
        fill_missing(
            &mut config,
            cli.command.required_ids(),
            cli.command.prompts_for_window(),
            &mut prompter,
        )?;
    }

    let credential = Credential::new(config.api.key.clone().unwrap_or_default())?;
    let prober = log_result(
        Prober::new(
            &config.api,
            &credential,
            ArtifactWriter::from_config(&config.output),
        ),
        "HTTP client ready",
        "building HTTP client",
    )?;
    let ids = Identifiers::new(
        config.ids.business_id.clone(),
        config.ids.practitioner_id.clone(),
    );
    let apt_ids = &config.ids.appointment_type_ids;
    let today = Local::now().date_naive();
    // Only commands that probe a window validate the configured bounds.
    let window = if cli.command.uses_window() {
        DateWindow::from_config(&config.window, today)?
    } else {
        DateWindow::starting(today, DEFAULT_WINDOW_DAYS)
    };

    info!(
        command = ?cli.command,
        base_url = %prober.base_url(),
        output_dir = %prober.artifacts().dir().display(),
        "starting probe run"
    );
    println!("🚀 Cliniko API prober");
    println!("   Base URL: {}", prober.base_url());
    println!("   Output:   {}", prober.artifacts().dir().display());

    let mut reporter = ConsoleReporter::stdout();
    match cli.command {
        Command::Connection => {
            run_connection(&prober, &mut reporter).await?;
        }
        Command::AvailableTimes => {
            let ids = match apt_ids.first() {
                Some(id) => ids.with_appointment_type(id),
                None => ids,
            };
            let (from, to) = configured_bounds(&config.window)?;
            run_available_times(&prober, &mut reporter, &ids, from, to).await?;
        }
        Command::NextAvailable => {
            run_next_available(&prober, &mut reporter, &ids, apt_ids, &window, today).await?;
        }
        Command::Patterns => {
            run_patterns(&prober, &mut reporter, &ids, &window).await?;
        }
        Command::All => {
            run_all(&prober, &mut reporter, &ids, apt_ids, &window, today).await;
        }
    }
    Ok(())
}
