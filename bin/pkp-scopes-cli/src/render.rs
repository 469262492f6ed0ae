//! Terminal presentation of lookup results and alerts.

use colored::Colorize;
use pkp_scopes::{constants::labels, types::PkpRecord};
use pkp_scopes_client::Notifier;
use std::fmt::Write;

pub const PKP_LIST_HEADER: &str = "Your PKPs (latest to oldest)";
pub const LOADING: &str = "Loading...";

/// Format records the way the lookup form lists them.
pub fn render_pkps(pkps: &[PkpRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", PKP_LIST_HEADER.bold());
    if pkps.is_empty() {
        let _ = writeln!(out, "No PKPs found");
        return out;
    }

    for pkp in pkps {
        let _ = writeln!(out);
        let _ = writeln!(out, "Token ID: {}", pkp.token_id);
        let _ = writeln!(out, "Public key: {}", pkp.public_key);
        let _ = writeln!(out, "ETH address: {}", pkp.eth_address);
        if pkp.scopes.is_empty() {
            let _ = writeln!(out, "{}", labels::NO_SCOPES_WARNING.red().bold());
        } else {
            let _ = writeln!(out, "Scopes: {}", pkp.scopes.labels().join(", "));
        }
    }
    out
}

pub fn render_pkps_json(pkps: &[PkpRecord]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(pkps)?)
}

/// Prints alerts to stderr and a loading line while a lookup runs.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    pub quiet: bool,
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message.red());
    }

    fn loading(&self, active: bool) {
        if active && !self.quiet {
            eprintln!("{}", LOADING.dimmed());
        }
    }
}
