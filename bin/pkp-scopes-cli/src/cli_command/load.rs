use crate::{cli_command::CliCommand, state::State};
use anyhow::{Context, Error};
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Load {
    path: PathBuf,
}

#[async_trait]
impl CliCommand for Load {
    async fn execute(self: Box<Self>, state: &mut State) -> Result<(), Error> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Unable to read {}", self.path.display()))?;
        state.lookup.set_credential_text(text);
        println!("Credential loaded from {}", self.path.display());
        Ok(())
    }

    fn parse_command_args(slice: &[&str]) -> Option<Self> {
        match slice {
            [path] if !path.is_empty() => Some(Load {
                path: PathBuf::from(*path),
            }),
            _ => None,
        }
    }

    fn format() -> &'static str {
        "load [file]"
    }

    fn aliases() -> Vec<&'static str> {
        vec!["load", "l"]
    }

    fn description() -> &'static str {
        "Reads the credential text from a file."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_one_path() -> Result<(), Error> {
        let load = Load::from_str("load credential.json")?;
        assert_eq!(load.path, PathBuf::from("credential.json"));
        assert!(Load::from_str("load a b").is_err());
        Ok(())
    }
}
