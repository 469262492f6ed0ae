use crate::{cli_command::CliCommand, state::State};
use anyhow::Error;
use async_trait::async_trait;

#[derive(Debug)]
pub struct Show;

#[async_trait]
impl CliCommand for Show {
    async fn execute(self: Box<Self>, state: &mut State) -> Result<(), Error> {
        state.print_pkps()
    }

    fn parse_command_args(slice: &[&str]) -> Option<Self> {
        match slice {
            [] => Some(Show),
            _ => None,
        }
    }

    fn format() -> &'static str {
        "show"
    }

    fn aliases() -> Vec<&'static str> {
        vec!["show", "ls"]
    }

    fn description() -> &'static str {
        "Prints the result of the last fetch."
    }
}
