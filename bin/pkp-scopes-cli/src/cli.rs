//! Command-line arguments

use clap::Parser;
use pkp_scopes_client::Config;
use std::path::PathBuf;

#[derive(Parser)] // Should not derive debug, contains secrets
pub struct Cli {
    /// Location of the client config file.
    #[clap(long, default_value = "dev/config/cayenne.toml")]
    pub config: PathBuf,

    /// API key for the relay the auth client is bound to. Overrides the value
    /// in the config file.
    #[clap(long, env = Config::RELAY_API_KEY)]
    pub relay_api_key: Option<String>,

    /// Run a single lookup for this credential and exit.
    #[clap(long, conflicts_with = "credential-file")]
    pub credential: Option<String>,
    /// Run a single lookup for the credential stored in this file and exit.
    #[clap(long, conflicts_with = "credential")]
    pub credential_file: Option<PathBuf>,

    /// Print results as JSON instead of formatted text.
    #[clap(long)]
    pub json: bool,
}

impl Cli {
    /// The credential text for one-shot mode, if one was given.
    pub fn credential_text(&self) -> anyhow::Result<Option<String>> {
        if let Some(credential) = &self.credential {
            return Ok(Some(credential.clone()));
        }

        match &self.credential_file {
            Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_flag_wins_over_nothing() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "pkp-scopes-cli",
            "--config",
            "local.toml",
            "--credential",
            r#"{"authMethodType":1,"accessToken":"abc"}"#,
            "--json",
        ])?;

        assert_eq!(cli.config, PathBuf::from("local.toml"));
        assert!(cli.json);
        assert_eq!(
            cli.credential_text()?.as_deref(),
            Some(r#"{"authMethodType":1,"accessToken":"abc"}"#)
        );
        Ok(())
    }

    #[test]
    fn credential_and_credential_file_conflict() {
        let result = Cli::try_parse_from([
            "pkp-scopes-cli",
            "--credential",
            "{}",
            "--credential-file",
            "credential.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn interactive_without_credential() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["pkp-scopes-cli"])?;
        assert!(cli.credential_text()?.is_none());
        Ok(())
    }
}
