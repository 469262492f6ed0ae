//! Constants that are shared between other crates in this workspace.
//! Crate-specific constants should go in their respective crates.

/// Number of scope slots requested from the permissions registry.
pub const SCOPE_ARRAY_LENGTH: u64 = 3;
/// Scope index granting unrestricted signing.
pub const SIGN_ANYTHING_SCOPE: usize = 1;
/// Scope index granting message-only signing.
pub const ONLY_SIGN_MESSAGES_SCOPE: usize = 2;

/// Suffix appended to wallet addresses and WebAuthn credential ids before
/// hashing them into an auth method id.
pub const LIT_SUFFIX: &str = "lit";

/// Discord application id used by the network's hosted login flow.
pub const DEFAULT_DISCORD_CLIENT_ID: &str = "1052874239658692668";

pub mod labels {
    pub const SIGN_ANYTHING: &str = "[1] Sign Anything";
    pub const ONLY_SIGN_MESSAGES: &str = "[2] Only Sign Messages";
    pub const NO_SCOPES_WARNING: &str = "DEPRECATED! This PKP has no permission scopes. Use a new one \
        or fund this PKP with Lit tokens in order to add permission scopes using the permissions \
        contract.";
}

pub mod alerts {
    pub const INVALID_AUTH_METHOD: &str = "Invalid auth method";
    pub const UNSUPPORTED_AUTH_METHOD: &str = "Unsupported auth method type";
}
