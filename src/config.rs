//! Environment-driven settings, read once at startup.
use crate::remove::DEFAULT_MAX_DEPTH;
use anyhow::{bail, Context, Result};

/// Tracing filter directive, e.g. `debug` or `fef=trace`.
pub const LOG_ENV: &str = "FEF_LOG";

/// Maximum directory nesting descended by `--del`.
pub const MAX_DELETE_DEPTH_ENV: &str = "FEF_MAX_DELETE_DEPTH";

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub max_delete_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_delete_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(filter) = lookup(LOG_ENV) {
            let filter = filter.trim();
            if !filter.is_empty() {
                settings.log_filter = filter.to_string();
            }
        }

        if let Some(raw) = lookup(MAX_DELETE_DEPTH_ENV) {
            let raw = raw.trim();
            if !raw.is_empty() {
                let depth: usize = raw
                    .parse()
                    .with_context(|| format!("invalid {MAX_DELETE_DEPTH_ENV}: {raw:?}"))?;
                if depth == 0 {
                    bail!("invalid {MAX_DELETE_DEPTH_ENV}: must be at least 1");
                }
                settings.max_delete_depth = depth;
            }
        }

        Ok(settings)
    }
}
