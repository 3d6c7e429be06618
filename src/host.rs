//! OS collaborators used by a run: directory listing, process launch and
//! recursive deletion, behind one trait so the runner can be driven by fakes.
use crate::entry::{Entry, EntryKind};
use crate::remove::{remove_recursive, RemoveReport};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// How a launched program finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    Success,
    /// Nonzero exit, or `code: None` when terminated by a signal.
    Failure { code: Option<i32> },
}

impl ProcessExit {
    pub fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            ProcessExit::Success
        } else {
            ProcessExit::Failure {
                code: status.code(),
            }
        }
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessExit::Success => f.write_str("exit status 0"),
            ProcessExit::Failure { code: Some(code) } => write!(f, "exit status {code}"),
            ProcessExit::Failure { code: None } => f.write_str("terminated by signal"),
        }
    }
}

pub trait Host {
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Entries of `dir` in enumeration order, without `.` and `..`.
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<Entry>>;

    /// Run `argv[0]` with the remaining arguments and block until it exits.
    fn spawn_and_wait(&mut self, argv: &[String], cwd: &Path) -> io::Result<ProcessExit>;

    fn remove_recursive(&mut self, path: &Path) -> RemoveReport;
}

/// The real filesystem and process table.
#[derive(Debug, Clone)]
pub struct OsHost {
    max_delete_depth: usize,
}

impl OsHost {
    pub fn new(max_delete_depth: usize) -> Self {
        Self { max_delete_depth }
    }
}

impl Host for OsHost {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn list_entries(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                tracing::warn!(
                    name = %file_name.to_string_lossy(),
                    "skipping entry with non-UTF-8 name"
                );
                continue;
            };
            let kind = match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => EntryKind::Directory,
                Ok(file_type) if file_type.is_file() => EntryKind::File,
                Ok(_) => EntryKind::Invalid,
                Err(err) => {
                    tracing::debug!(name, error = %err, "cannot read entry type");
                    EntryKind::Invalid
                }
            };
            entries.push(Entry::new(name, kind));
        }
        Ok(entries)
    }

    fn spawn_and_wait(&mut self, argv: &[String], cwd: &Path) -> io::Result<ProcessExit> {
        let Some((program, args)) = argv.split_first() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty argv"));
        };
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()?;
        let exit = ProcessExit::from_status(status);
        tracing::debug!(program = %program, %exit, "child exited");
        Ok(exit)
    }

    fn remove_recursive(&mut self, path: &Path) -> RemoveReport {
        remove_recursive(path, self.max_delete_depth)
    }
}
