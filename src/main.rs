use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tab_session_lib::logging;
use tab_session_lib::scenario::{Scenario, ScenarioRunner};
use tab_session_lib::settings::Settings;

/// Replay a scripted sequence of tab-strip events and print the resulting snapshots
#[derive(Parser)]
#[command(name = "tab-session")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario file (JSON)
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Settings file (JSON); defaults are used when absent or unreadable
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Log filter, e.g. `debug` (RUST_LOG takes precedence)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Print a report for every step, not only the ones that changed the tabs
    #[arg(long)]
    all: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    let settings = cli
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    let scenario = match Scenario::load(&cli.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            log::error!("[Scenario] Failed to load {}: {}", cli.scenario.display(), e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "[Scenario] Replaying {} steps over {} tabs",
        scenario.steps.len(),
        scenario.tabs.len()
    );

    let mut runner = ScenarioRunner::new(&scenario, &settings);
    for report in runner.run(&scenario.steps) {
        if !cli.all && !report.changed {
            continue;
        }
        match serde_json::to_string(&report) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                log::error!("[Scenario] Failed to serialize step {}: {}", report.step, e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
