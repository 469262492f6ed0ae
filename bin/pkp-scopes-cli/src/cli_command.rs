pub mod credential;
pub mod fetch;
pub mod help;
pub mod load;
pub mod quit;
pub mod set;
pub mod show;

pub use credential::Credential;
pub use fetch::Fetch;
pub use help::Help;
pub use load::Load;
pub use quit::Quit;
pub use set::Set;
pub use show::Show;

use crate::state::State;
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, info};

pub type DynCommand = Box<dyn CliCommand>;

#[async_trait]
pub trait CliCommand: Debug + Send {
    async fn execute(self: Box<Self>, state: &mut State) -> Result<(), anyhow::Error>;

    /// Given the proper string arguments to a command, return an instance of
    /// this command.
    fn parse_command_args(args: &[&str]) -> Option<Self>
    where
        Self: Sized;

    /// Expected format for this command such as "load \[file\]". Used for
    /// generating help string dynamically.
    fn format() -> &'static str
    where
        Self: Sized;

    fn aliases() -> Vec<&'static str>
    where
        Self: Sized;

    fn description() -> &'static str
    where
        Self: Sized;

    /// Convert a string into a `Box<dyn Command>` suitable for dynamically
    /// dispatching the execute function.
    fn to_dyn(self) -> DynCommand
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }

    fn from_str(s: &str) -> Result<Self, anyhow::Error>
    where
        Self: Sized,
    {
        let mut split = s.trim().split(' ');

        let command = split
            .next()
            .ok_or_else(|| anyhow!("Missing \"command\" part of argument."))?;
        debug!("Looking for match for \"{}\"", command);

        // Checking aliases here keeps it out of every `parse_command_args`.
        if !Self::aliases().contains(&command) {
            bail!("Command does not match any know name or alias.");
        }
        info!("Found valid command: {}", command);

        match Self::parse_command_args(&split.collect::<Vec<_>>()) {
            Some(t) => Ok(t),
            None => bail!("Expected Format: {}", Self::format()),
        }
    }
}

// Iterate through our registered commands and see if any of them can parse this
// command.
pub fn parse_cli_command(input: &str) -> Result<DynCommand, anyhow::Error> {
    let input = input.trim();

    // Input may carry a credential, so only its command word is logged.
    debug!(
        "Attempting to parse command: {}",
        input.split(' ').next().unwrap_or_default()
    );

    let parsers = get_cmd_functions::<Parse>();
    for cmd_parse in parsers {
        if let Ok(c) = cmd_parse(input) {
            return Ok(c);
        }
    }

    Err(anyhow!("No matching command."))
}

/// Helper type to implement [GetCmdFunction]. This returns the parsing
/// function for all commands and allows the [parse_cli_command] to iterate
/// through these functions.
struct Parse;

impl GetCmdFunction for Parse {
    type FunctionSignature = fn(&str) -> Result<DynCommand, anyhow::Error>;

    fn get_function<T: CliCommand + 'static>() -> Self::FunctionSignature {
        |s| T::from_str(s).map(|c| c.to_dyn())
    }
}

/// Returns the analogous function for every registered command, selected by
/// the [GetCmdFunction] implementor `F`.
///
/// New commands only need to be listed here.
pub fn get_cmd_functions<F: GetCmdFunction>() -> Vec<F::FunctionSignature> {
    vec![
        F::get_function::<Credential>(),
        F::get_function::<Fetch>(),
        F::get_function::<Help>(),
        F::get_function::<Load>(),
        F::get_function::<Quit>(),
        F::get_function::<Set>(),
        F::get_function::<Show>(),
    ]
}

/// Maps `Self` to a function generic over every [CliCommand] implementor, so
/// [get_cmd_functions] can produce one function per command.
pub trait GetCmdFunction {
    /// The signature of the function this implementor will be returning.
    type FunctionSignature;
    /// Given a specific implementor of CliCommand, T, return the correct
    /// function implementation for that type.
    fn get_function<T: CliCommand + 'static>() -> Self::FunctionSignature;
}
