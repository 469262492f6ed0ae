use crate::{
    cli_command::{get_cmd_functions, CliCommand, GetCmdFunction},
    state::State,
};
use anyhow::Error;
use async_trait::async_trait;
use colored::Colorize;

#[derive(Debug)]
pub struct Help {
    help_string: String,
}

impl Help {
    /// Generate help string from all registered commands.
    fn all_commands() -> String {
        get_cmd_functions::<HelpString>()
            .into_iter()
            .map(|gen_help_str| gen_help_str() + "\n")
            .collect()
    }

    fn help_string(cmd_format: &str, aliases: &[&str], description: &str) -> String {
        format!(
            "Command: {}\nAliases: {:?}\nDescription: {}\n",
            cmd_format.bold(),
            aliases,
            description
        )
    }
}

#[async_trait]
impl CliCommand for Help {
    async fn execute(self: Box<Self>, _state: &mut State) -> Result<(), Error> {
        println!("{}", self.help_string);
        Ok(())
    }

    fn parse_command_args(args: &[&str]) -> Option<Self> {
        match args {
            [] => Some(Help {
                help_string: Help::all_commands(),
            }),
            [command] => get_cmd_functions::<FindCommand>()
                .into_iter()
                .find_map(|find_command| find_command(command))
                .map(|help_string| Help { help_string }),
            _ => None,
        }
    }

    fn format() -> &'static str {
        "help [command (Optional)]"
    }

    fn aliases() -> Vec<&'static str> {
        vec!["help", "h"]
    }

    fn description() -> &'static str {
        "Prints the help string of the specified command, or of every command if none is given."
    }
}

/// Generates the help string of each command.
struct HelpString;

impl GetCmdFunction for HelpString {
    type FunctionSignature = fn() -> String;

    fn get_function<T: CliCommand>() -> Self::FunctionSignature {
        || Help::help_string(T::format(), &T::aliases(), T::description())
    }
}

/// Generates, for each command, a function returning its help string when
/// given one of its aliases.
struct FindCommand;

impl GetCmdFunction for FindCommand {
    type FunctionSignature = fn(&str) -> Option<String>;

    fn get_function<T: CliCommand>() -> Self::FunctionSignature {
        |alias| {
            T::aliases()
                .contains(&alias)
                .then(|| Help::help_string(T::format(), &T::aliases(), T::description()))
        }
    }
}
