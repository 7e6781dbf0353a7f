mod bootstrap;

use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use sumetife_core::formatting::summary_line;
use sumetife_core::models::DecodeFailurePolicy;
use sumetife_core::settings::Settings;
use sumetife_runtime::orchestrator;

fn main() -> ExitCode {
    let settings = match Settings::try_parse() {
        Ok(settings) => settings,
        Err(err) => return usage_error(err),
    };

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Help and version output go through clap untouched; every other parse
/// error is reported as a single `error:` line.
fn usage_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
        _ => {
            eprintln!("{}", usage_error_line(&err));
            ExitCode::from(2)
        }
    }
}

/// Collapse clap's rendered error into one line, dropping the usage block
/// and the `--help` hint.
fn usage_error_line(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let message = rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with("Usage:") && !line.starts_with("For more information"))
        .filter(|line| !line.is_empty() && !line.starts_with("tip:"))
        .collect::<Vec<_>>()
        .join(" ");

    if message.starts_with("error:") {
        message
    } else {
        format!("error: {}", message)
    }
}

fn run(settings: &Settings) -> Result<()> {
    // Argument checks come before logging or any file I/O.
    let config = settings.run_config()?;

    bootstrap::setup_logging(settings.effective_log_level())?;

    tracing::info!("sumetife v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {} ({}), range: [{}, {}), output: {}",
        config.directory.display(),
        config.input_format,
        settings.start_time.to_rfc3339(),
        settings.end_time.to_rfc3339(),
        config.output_path.display()
    );
    if config.on_error == DecodeFailurePolicy::Skip {
        tracing::info!("Decode failure policy: {}", config.on_error);
    }

    let summary = orchestrator::run(&config)?;

    for result in &summary.results {
        println!("{}", summary_line(result));
    }
    if summary.files_skipped > 0 {
        tracing::warn!(
            "{} of {} files were skipped",
            summary.files_skipped,
            summary.files_processed + summary.files_skipped
        );
    }
    tracing::info!("Successfully generated {}", summary.output_path.display());

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
