use pkp_scopes_client::{Config, LookupState, NetworkConnector};

use crate::render::TerminalNotifier;

pub struct State {
    pub connector: NetworkConnector,
    pub lookup: LookupState,
    pub notifier: TerminalNotifier,
    /// Print results as JSON.
    pub json: bool,
    /// Set by `quit`; the command loop returns once it sees it.
    pub quit: bool,
}

impl State {
    pub fn new(config: Config, json: bool) -> Self {
        Self {
            connector: NetworkConnector::new(config),
            lookup: LookupState::new(),
            notifier: TerminalNotifier { quiet: json },
            json,
            quit: false,
        }
    }

    /// Print the current result list.
    pub fn print_pkps(&self) -> anyhow::Result<()> {
        if self.json {
            println!("{}", crate::render::render_pkps_json(self.lookup.pkps())?);
        } else {
            print!("{}", crate::render::render_pkps(self.lookup.pkps()));
        }
        Ok(())
    }

    /// Run a lookup for the current credential text and print the result.
    pub async fn fetch(&mut self) -> anyhow::Result<()> {
        let result = self
            .lookup
            .fetch(&self.connector, &self.notifier)
            .await
            .map(|_| ());
        match result {
            Ok(()) => self.print_pkps(),
            // Already shown to the user as an alert.
            Err(e) if e.is_recoverable() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
