//! The lookup workflow and the state it drives.

use pkp_scopes::{
    constants::SCOPE_ARRAY_LENGTH,
    infrastructure::logging::record_field,
    parse_credential,
    types::{Credential, PermissionScopes, PkpRecord},
};
use tracing::{debug, field::Empty, info, instrument};
use uuid::Uuid;

use crate::{
    auth::{AuthClient, ProviderType},
    context::Connector,
    registry::PermissionsRegistry,
    Result,
};

/// Resolve `credential` to the PKPs it is bound to, most recently created
/// first.
///
/// Tokens are queried one at a time in registry order. Tokens without a
/// public key are skipped.
#[instrument(
    skip_all,
    fields(auth_method_type = %credential.auth_method_type(), auth_id = Empty),
    err(Debug)
)]
pub async fn fetch_pkps(
    credential: &Credential,
    auth_client: &dyn AuthClient,
    registry: &dyn PermissionsRegistry,
) -> Result<Vec<PkpRecord>> {
    let auth_method_type = credential.auth_method_type();
    let provider = auth_client.init_provider(ProviderType::for_auth_method(auth_method_type));
    let auth_id = provider.auth_method_id(credential).await?;
    record_field("auth_id", &auth_id.to_string());

    let token_ids = registry
        .token_ids_for_auth_method(auth_method_type, &auth_id)
        .await?;
    info!(count = token_ids.len(), "Found token ids");

    let mut pkps = Vec::with_capacity(token_ids.len());
    for token_id in token_ids {
        let public_key = match registry.pubkey(&token_id).await? {
            Some(public_key) if !public_key.is_empty() => public_key,
            _ => {
                debug!(%token_id, "Skipping token without a public key");
                continue;
            }
        };
        let eth_address = public_key.eth_address()?;

        let scopes = registry
            .permitted_auth_method_scopes(&token_id, auth_method_type, &auth_id, SCOPE_ARRAY_LENGTH)
            .await?;

        pkps.push(PkpRecord {
            auth_id,
            token_id,
            public_key,
            eth_address,
            scopes: PermissionScopes::from_scope_array(&scopes),
        });
    }

    // Latest first.
    pkps.reverse();
    Ok(pkps)
}

/// The surface that reports to the user.
pub trait Notifier: Send + Sync {
    /// Show a blocking alert.
    fn alert(&self, message: &str);

    /// Called when a lookup starts and when it finishes.
    fn loading(&self, _active: bool) {}
}

/// State behind the lookup form: the credential text being edited, the last
/// result list, and whether a lookup is running.
#[derive(Debug, Default)]
pub struct LookupState {
    credential_text: String,
    pkps: Vec<PkpRecord>,
    loading: bool,
}

impl LookupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credential_text(&self) -> &str {
        &self.credential_text
    }

    pub fn set_credential_text(&mut self, text: impl Into<String>) {
        self.credential_text = text.into();
    }

    pub fn pkps(&self) -> &[PkpRecord] {
        &self.pkps
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Run a lookup for the current credential text.
    ///
    /// The previous results are cleared first. Credential errors are alerted
    /// through `notifier` before any connection is made. `loading` is cleared
    /// on every exit path.
    #[instrument(skip_all, fields(lookup_id = %Uuid::new_v4()))]
    pub async fn fetch(
        &mut self,
        connector: &dyn Connector,
        notifier: &dyn Notifier,
    ) -> Result<&[PkpRecord]> {
        let Self {
            credential_text,
            pkps,
            loading,
        } = self;
        pkps.clear();

        let result = {
            let _loading = LoadingGuard::start(loading, notifier);
            Self::run(credential_text, connector).await
        };

        match result {
            Ok(found) => {
                info!(count = found.len(), "Lookup finished");
                *pkps = found;
                Ok(pkps.as_slice())
            }
            Err(error) => {
                if let Some(message) = error.alert_message() {
                    notifier.alert(message);
                }
                Err(error)
            }
        }
    }

    async fn run(credential_text: &str, connector: &dyn Connector) -> Result<Vec<PkpRecord>> {
        let credential = parse_credential(credential_text)?;
        let context = connector.connect().await?;
        fetch_pkps(
            &credential,
            context.auth_client.as_ref(),
            context.registry.as_ref(),
        )
        .await
    }
}

/// Holds the loading flag up for as long as it lives.
struct LoadingGuard<'a> {
    loading: &'a mut bool,
    notifier: &'a dyn Notifier,
}

impl<'a> LoadingGuard<'a> {
    fn start(loading: &'a mut bool, notifier: &'a dyn Notifier) -> Self {
        *loading = true;
        notifier.loading(true);
        Self { loading, notifier }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.loading = false;
        self.notifier.loading(false);
    }
}
