//! `flaircheck probe` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use flaircheck_client::HttpTransport;
use flaircheck_core::types::Reachability;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `probe` command.
///
/// # Errors
///
/// Returns `CliError::Unreachable` when the service is not online.
pub async fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    let transport = HttpTransport::new()?;
    info!(endpoint = %transport.base_url(), "probing flair service");

    let report = ProbeReport {
        endpoint: transport.base_url().to_string(),
        reachability: transport.probe().await,
    };
    writer.render(&report)?;

    if report.reachability.is_online() {
        Ok(())
    } else {
        Err(CliError::Unreachable(report.reachability.to_string()))
    }
}

/// Liveness probe result.
#[derive(Serialize)]
pub struct ProbeReport {
    pub endpoint: String,
    pub reachability: Reachability,
}

impl Render for ProbeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let state = self.reachability.to_string();
        let state = if self.reachability.is_online() {
            state.green().bold()
        } else {
            state.red().bold()
        };
        writeln!(w, "Flair service {}: {}", self.endpoint.bold(), state)
    }
}
