use crate::{cli_command::CliCommand, state::State};
use anyhow::Error;
use async_trait::async_trait;

#[derive(Debug)]
pub struct Credential;

#[async_trait]
impl CliCommand for Credential {
    async fn execute(self: Box<Self>, state: &mut State) -> Result<(), Error> {
        let text = state.lookup.credential_text();
        if text.is_empty() {
            println!("No credential set. Use `set` or `load` first.");
        } else {
            println!("{text}");
        }
        Ok(())
    }

    fn parse_command_args(slice: &[&str]) -> Option<Self> {
        match slice {
            [] => Some(Credential),
            _ => None,
        }
    }

    fn format() -> &'static str {
        "credential"
    }

    fn aliases() -> Vec<&'static str> {
        vec!["credential", "c"]
    }

    fn description() -> &'static str {
        "Prints the current credential text."
    }
}
