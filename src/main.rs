use anyhow::{Context, Result};
use clap::Parser;
use fef::cli::RootArgs;
use fef::config::{Settings, DEFAULT_LOG_FILTER};
use fef::console::ConsoleGuard;
use fef::host::OsHost;
use fef::runner::{self, RunError, RunSummary, EXIT_ENVIRONMENT, EXIT_OK};
use std::process::ExitCode;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = RootArgs::parse();

    let settings = match Settings::from_env().context("load settings") {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(EXIT_ENVIRONMENT);
        }
    };
    if let Err(err) = init_tracing(&settings.log_filter) {
        tracing::warn!(
            filter = %settings.log_filter,
            error = %err,
            "ignoring invalid FEF_LOG filter; using {DEFAULT_LOG_FILTER}"
        );
    }

    let guard = ConsoleGuard::acquire();
    let code = match run(&args, &settings, &guard) {
        Ok(summary) => {
            tracing::info!(
                eligible = summary.eligible,
                executed = summary.executed,
                skipped = summary.skipped,
                removed = summary.removed,
                delete_failures = summary.delete_failures,
                "done"
            );
            EXIT_OK
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            err.downcast_ref::<RunError>()
                .map(RunError::exit_code)
                .unwrap_or(EXIT_ENVIRONMENT)
        }
    };
    drop(guard);
    ExitCode::from(code)
}

fn run(args: &RootArgs, settings: &Settings, guard: &ConsoleGuard) -> Result<RunSummary> {
    let options = args.run_options();
    let program = args.program();

    if !options.dry_run {
        if let Err(err) = which::which(program) {
            tracing::warn!(program, error = %err, "program not found; launching it will fail");
        }
    }

    let mut host = OsHost::new(settings.max_delete_depth);
    let mut console = guard.console();
    let summary = runner::run(
        &mut host,
        program,
        args.templates(),
        &options,
        &mut console,
    )
    .with_context(|| format!("run {program}"))?;
    Ok(summary)
}

/// Install the stderr subscriber. An unparsable filter falls back to the
/// default and is returned so the caller can report it once logging works.
fn init_tracing(filter: &str) -> Result<(), ParseError> {
    let (filter, rejected) = match EnvFilter::try_new(filter) {
        Ok(filter) => (filter, Ok(())),
        Err(err) => (EnvFilter::new(DEFAULT_LOG_FILTER), Err(err)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
    rejected
}
