//! CLI argument parsing.
//!
//! Flags are only recognized before the program. Everything after the program
//! is a template, even when it starts with `-`.
use crate::entry::Selection;
use crate::runner::RunOptions;
use clap::Parser;

const AFTER_HELP: &str = "\
Templates:
  ::       Literal ':'
  :name    Name of the current file or directory
  Any other ':' directive, or a template containing '\"', is rejected.

Examples:
  fef --files cp :name :name_copy
      Duplicate every file in the working directory, adding '_copy'.
  fef --dirs --dry tar czf :name.tgz :name
      Print the tar command for every directory without running it.

Environment:
  FEF_LOG               Log filter (default: info)
  FEF_MAX_DELETE_DEPTH  Deepest nesting removed by --del (default: 64, minimum 1)";

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "fef",
    version,
    about = "Run a program once for every entry of the working directory",
    after_help = AFTER_HELP,
    arg_required_else_help = true,
    args_override_self = true
)]
pub struct RootArgs {
    /// Act on files (combine with --dirs for both; neither means both)
    #[arg(long)]
    pub files: bool,

    /// Act on directories
    #[arg(long)]
    pub dirs: bool,

    /// Print the generated commands without running them or deleting anything
    #[arg(long)]
    pub dry: bool,

    /// Delete each entry after its command succeeds
    #[arg(long)]
    pub del: bool,

    /// Visit entries in name order instead of directory order
    #[arg(long)]
    pub sort: bool,

    /// Program to run, followed by one template per generated argument
    #[arg(
        value_name = "PROGRAM TEMPLATE",
        required = true,
        num_args = 2..,
        trailing_var_arg = true
    )]
    pub command: Vec<String>,
}

impl RootArgs {
    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    pub fn templates(&self) -> &[String] {
        self.command.get(1..).unwrap_or_default()
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            selection: Selection::from_flags(self.files, self.dirs),
            dry_run: self.dry,
            delete_after: self.del,
            sort_entries: self.sort,
        }
    }
}
