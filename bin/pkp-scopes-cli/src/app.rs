use pkp_scopes_client::Config;
use std::io::{self, Write};

use crate::{
    cli_command::{parse_cli_command, CliCommand},
    state::State,
};

/// Runs the interactive client
pub async fn run(config: Config, json: bool) -> anyhow::Result<()> {
    let mut state = State::new(config, json);
    println!("Type \"help\" to view list of commands.");

    while !state.quit {
        match parse_input(&state) {
            Ok(Some(command)) => {
                if let Err(e) = command.execute(&mut state).await {
                    println!("Error: {e}");
                }
            }
            // End of input behaves like `quit`.
            Ok(None) => break,
            Err(e) => {
                println!("Unable to parse command: {e}");
            }
        };
    }
    Ok(())
}

/// Runs a single lookup for `credential_text` and prints the result.
pub async fn run_once(config: Config, credential_text: String, json: bool) -> anyhow::Result<()> {
    let mut state = State::new(config, json);
    state.lookup.set_credential_text(credential_text);
    state.fetch().await
}

/// Reads next command from standard input.
///
/// Returns a dynamic trait representing the parsed command, `None` once
/// standard input is closed, or an error if no such command exist.
fn parse_input(state: &State) -> anyhow::Result<Option<Box<dyn CliCommand>>> {
    if state.lookup.credential_text().is_empty() {
        print!("| ");
    } else {
        print!("> ");
    }
    // Flush stdout so the prompt actually get printed
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    let command = parse_cli_command(&input)?;

    Ok(Some(command))
}
