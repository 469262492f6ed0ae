use crate::{cli_command::CliCommand, state::State};
use anyhow::Error;
use async_trait::async_trait;
use pkp_scopes::infrastructure::sensitive_info::REDACTED_INFO_LABEL;

pub struct Set {
    text: String,
}

impl std::fmt::Debug for Set {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Set").field("text", &REDACTED_INFO_LABEL).finish()
    }
}

#[async_trait]
impl CliCommand for Set {
    async fn execute(self: Box<Self>, state: &mut State) -> Result<(), Error> {
        state.lookup.set_credential_text(self.text);
        println!("Credential updated");
        Ok(())
    }

    fn parse_command_args(slice: &[&str]) -> Option<Self> {
        if slice.is_empty() {
            return None;
        }
        // Arguments were split on single spaces, so joining restores the text.
        Some(Set {
            text: slice.join(" "),
        })
    }

    fn format() -> &'static str {
        "set [credential JSON]"
    }

    fn aliases() -> Vec<&'static str> {
        vec!["set", "s"]
    }

    fn description() -> &'static str {
        "Replaces the credential text used by `fetch`. Relaxed JSON such as \
         {authMethodType: 1, accessToken: '...'} is accepted."
    }
}
