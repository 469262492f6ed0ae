use crate::{cli_command::CliCommand, state::State};
use anyhow::Error;
use async_trait::async_trait;

#[derive(Debug)]
pub struct Fetch;

#[async_trait]
impl CliCommand for Fetch {
    async fn execute(self: Box<Self>, state: &mut State) -> Result<(), Error> {
        state.fetch().await
    }

    fn parse_command_args(slice: &[&str]) -> Option<Self> {
        match slice {
            [] => Some(Fetch),
            _ => None,
        }
    }

    fn format() -> &'static str {
        "fetch"
    }

    fn aliases() -> Vec<&'static str> {
        vec!["fetch", "f"]
    }

    fn description() -> &'static str {
        "Fetch PKPs. Looks up every PKP the current credential is permitted to use, \
         with its permission scopes, and lists them latest first."
    }
}
