use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};

use eagleshot::capture::{self, CaptureDependencies, CaptureOutcome};
use eagleshot::{Config, Interrupt};

#[derive(Parser, Debug)]
#[command(name = "eagleshot")]
#[command(
    about = "Region screenshot tool for Wayland compositors",
    disable_version_flag = true
)]
struct Cli {
    /// Print version information and exit
    #[arg(long, short = 'v', action = ArgAction::SetTrue)]
    version: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.version {
        println!("{}", eagleshot::version_string());
        return Ok(ExitCode::SUCCESS);
    }

    let interrupt = Interrupt::install().context("Failed to register signal handlers")?;
    let config = Config::from_env().context("Failed to resolve the pictures directory")?;
    let dependencies = CaptureDependencies::from_config(&config);

    let outcome = capture::perform_capture(&config, &dependencies, &interrupt)
        .context("Screenshot aborted")?;
    report(&outcome);

    Ok(outcome.exit_code())
}

fn report(outcome: &CaptureOutcome) {
    match outcome {
        CaptureOutcome::Captured(path) => {
            println!("Screenshot saved: {}", path.display());
        }
        CaptureOutcome::Cancelled(reason) => {
            eprintln!("Area selection cancelled ({reason}); no screenshot taken");
        }
        CaptureOutcome::Failed(message) => {
            eprintln!("{message}");
        }
        CaptureOutcome::Interrupted => {
            eprintln!("Interrupted; no screenshot taken");
        }
    }
}
