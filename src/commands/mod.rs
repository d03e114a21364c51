//! Subcommand implementations.
//!
//! Each `cmd_*` function loads the configuration, talks to the backend and
//! prints either human-readable text or JSON.

mod analyze;
mod config;
mod create;
mod dashboard;
pub mod interactive;
mod ls;
mod projects;
mod show;
mod update;

pub use analyze::{cmd_analyze, cmd_analyze_all};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use create::{CreateOptions, cmd_create};
pub use dashboard::{DashboardCommand, cmd_dashboard};
pub use ls::cmd_ls;
pub use projects::cmd_projects;
pub use show::cmd_show;
pub use update::{UpdateOptions, cmd_update};

use serde_json::Value;

use crate::config::Config;
use crate::error::Result;
use crate::remote::HttpBackend;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

/// Output of a command, printable as JSON or text
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => println!("{text}"),
            _ => print_json(&self.json)?,
        }
        Ok(())
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load the configuration and build the HTTP backend it points at
pub(crate) fn connect() -> Result<(Config, HttpBackend)> {
    let config = Config::load()?;
    let backend = HttpBackend::from_config(&config)?;
    Ok((config, backend))
}
