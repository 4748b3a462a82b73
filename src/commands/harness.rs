//! Delegates the live suites to `cargo test`.

use std::env;
use std::ffi::OsString;
use std::process::Command;

use anyhow::{Context, Result, bail};
use log::info;

use crate::config::{API_KEY_ENV, CLIENT_TYPE_ENV, MODEL_ENV, RunConfig};
use crate::suites::TestSelection;

/// Integration test target holding the live suites.
pub const LIVE_TEST_TARGET: &str = "live";

pub struct HarnessInvocation {
    command: Command,
}

impl HarnessInvocation {
    pub fn new(config: &RunConfig, selection: TestSelection) -> Self {
        let cargo = env::var_os("CARGO").unwrap_or_else(|| OsString::from("cargo"));
        let mut command = Command::new(cargo);
        command.args(["test", "--test", LIVE_TEST_TARGET]);
        if let Some(suite) = selection.suite() {
            command.arg(format!("{suite}::"));
        }
        command.args(["--", "--ignored", "--nocapture"]);

        command
            .env(API_KEY_ENV, config.api_key.expose())
            .env(MODEL_ENV, config.model.as_deref().unwrap_or(""))
            .env(CLIENT_TYPE_ENV, config.client_type.name());

        Self { command }
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn run(mut self) -> Result<()> {
        info!("Delegating to {:?}", self.command.get_args().collect::<Vec<_>>());
        let status = self
            .command
            .status()
            .context("Failed to launch cargo test")?;
        if !status.success() {
            bail!("cargo test exited with {status}");
        }
        Ok(())
    }
}
