//! Permissive parsing of pasted credentials.
//!
//! Credentials are usually copied out of a browser console, so the text is
//! accepted as relaxed JSON: unquoted keys, single-quoted strings, trailing
//! commas and comments are all fine.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{types::Credential, PkpScopesError};

/// Parse user-supplied text into a [`Credential`].
///
/// Empty input is a parse failure, not a missing auth method type.
#[instrument(skip_all, err(Debug))]
pub fn parse_credential(text: &str) -> Result<Credential, PkpScopesError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PkpScopesError::InvalidCredential("input is empty".to_string()));
    }

    let value: Value = json5::from_str(text)
        .map_err(|e| PkpScopesError::InvalidCredential(e.to_string()))?;
    debug!("Parsed credential text as relaxed JSON");

    Credential::try_from(value)
}
