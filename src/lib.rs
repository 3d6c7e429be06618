//! Run a program once per working-directory entry, with arguments generated
//! from `:name` templates.
pub mod cli;
pub mod config;
pub mod console;
pub mod entry;
pub mod host;
pub mod instantiate;
pub mod remove;
pub mod runner;
pub mod template;
