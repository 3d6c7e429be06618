//! Run orchestration: tokenize once, then visit every eligible entry in
//! walker order, echoing, executing and optionally deleting it.
//!
//! Execution is fail-fast. A launch failure or nonzero exit ends the run before
//! the next entry is instantiated. Delete failures are logged and skipped.
use crate::console::Console;
use crate::entry::{Entry, Selection};
use crate::host::{Host, ProcessExit};
use crate::instantiate::ArgumentList;
use crate::template::{tokenize, TemplateError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Exit code for a completed run.
pub const EXIT_OK: u8 = 0;
/// Exit code for environment failures (working directory, output, settings).
pub const EXIT_ENVIRONMENT: u8 = 1;
/// Exit code for usage errors; matches clap's own.
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_TEMPLATE: u8 = 3;
pub const EXIT_EXECUTION: u8 = 4;

/// Per-run policy, fixed before the first entry is visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub selection: Selection,
    pub dry_run: bool,
    pub delete_after: bool,
    /// Visit entries by name instead of walker order.
    pub sort_entries: bool,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("cannot determine working directory")]
    CurrentDir(#[source] io::Error),
    #[error("cannot read directory {}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write command line")]
    Output(#[source] io::Error),
    #[error("failed to run {command}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to run {command} ({exit})")]
    NonZeroExit { command: String, exit: ProcessExit },
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Usage(_) => EXIT_USAGE,
            RunError::Template(_) => EXIT_TEMPLATE,
            RunError::CurrentDir(_) | RunError::ReadDir { .. } | RunError::Output(_) => {
                EXIT_ENVIRONMENT
            }
            RunError::Launch { .. } | RunError::NonZeroExit { .. } => EXIT_EXECUTION,
        }
    }
}

/// Counters for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries that matched the selection and were echoed.
    pub eligible: usize,
    /// Commands that were launched and exited successfully.
    pub executed: usize,
    /// Entries rejected by the selection policy.
    pub skipped: usize,
    /// Entries deleted without any failure.
    pub removed: usize,
    /// Individual paths that could not be deleted.
    pub delete_failures: usize,
}

/// Drive one full run against `host`.
pub fn run<H, W>(
    host: &mut H,
    program: &str,
    templates: &[String],
    options: &RunOptions,
    console: &mut Console<W>,
) -> Result<RunSummary, RunError>
where
    H: Host,
    W: Write,
{
    if program.is_empty() {
        return Err(RunError::Usage("missing program to run".to_string()));
    }
    if templates.is_empty() {
        return Err(RunError::Usage("missing argument templates".to_string()));
    }

    let tokens = tokenize(templates)?;
    let cwd = host.current_dir().map_err(RunError::CurrentDir)?;
    let mut entries = host
        .list_entries(&cwd)
        .map_err(|source| RunError::ReadDir {
            path: cwd.clone(),
            source,
        })?;
    if options.sort_entries {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
    }
    tracing::debug!(
        dir = %cwd.display(),
        entries = entries.len(),
        arguments = tokens.boundary_count(),
        "starting run"
    );

    let mut argv = ArgumentList::new(program, &tokens);
    let mut summary = RunSummary::default();

    for entry in &entries {
        if !options.selection.accepts(entry.kind) {
            tracing::debug!(name = %entry.name, kind = %entry.kind, "skipping entry");
            summary.skipped += 1;
            continue;
        }
        summary.eligible += 1;

        argv.rebuild(&tokens, &entry.name);
        let command = argv.command_line();
        console.echo_command(&command).map_err(RunError::Output)?;

        if !options.dry_run {
            match host.spawn_and_wait(argv.as_slice(), &cwd) {
                Ok(ProcessExit::Success) => summary.executed += 1,
                Ok(exit) => return Err(RunError::NonZeroExit { command, exit }),
                Err(source) => return Err(RunError::Launch { command, source }),
            }
        }

        if options.delete_after {
            remove_entry(host, &cwd, entry, options.dry_run, &mut summary);
        }

        argv.reset();
    }

    Ok(summary)
}

fn remove_entry<H: Host>(
    host: &mut H,
    cwd: &Path,
    entry: &Entry,
    dry_run: bool,
    summary: &mut RunSummary,
) {
    let path = cwd.join(&entry.name);
    if dry_run {
        tracing::info!(path = %path.display(), "would remove");
        return;
    }

    tracing::info!(path = %path.display(), "removing");
    let report = host.remove_recursive(&path);
    for failure in &report.failures {
        tracing::warn!(
            path = %failure.path.display(),
            reason = %failure.reason,
            "failed to remove"
        );
    }
    if report.is_clean() {
        summary.removed += 1;
    } else {
        summary.delete_failures += report.failures.len();
    }
}
