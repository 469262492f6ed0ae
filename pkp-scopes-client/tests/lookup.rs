//! Lookup workflow tests against in-memory collaborators.

use async_trait::async_trait;
use pkp_scopes::{
    constants::alerts,
    types::{AuthIdentifier, AuthMethodType, Credential, PublicKey, TokenId},
    PkpScopesError,
};
use pkp_scopes_client::{
    auth::{AuthClient, AuthProvider, ProviderType},
    fetch_pkps,
    registry::PermissionsRegistry,
    Connector, LookupContext, LookupState, Notifier, PkpScopesClientError,
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

type Result<T> = std::result::Result<T, PkpScopesClientError>;

const GENERATOR_KEY: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const GENERATOR_ADDRESS: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";
const DOUBLED_GENERATOR_KEY: &str =
    "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";
const DOUBLED_GENERATOR_ADDRESS: &str = "0x2B5AD5c4795c026514f8317c7a215E218DcCD6cF";
// Compressed point whose x is above the field modulus.
const OFF_CURVE_KEY: &str = "02ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

fn public_key(hex_key: &str) -> PublicKey {
    PublicKey::from_bytes(hex::decode(hex_key).unwrap())
}

/// Provider that derives `keccak("{provider}:{token}")`-style ids without
/// decoding anything.
struct FakeProvider {
    provider_type: ProviderType,
    calls: Arc<Mutex<Vec<ProviderType>>>,
}

#[async_trait]
impl AuthProvider for FakeProvider {
    fn provider_type(&self) -> ProviderType {
        self.provider_type
    }

    async fn auth_method_id(&self, credential: &Credential) -> Result<AuthIdentifier> {
        self.calls.lock().unwrap().push(self.provider_type);
        if ProviderType::for_auth_method(credential.auth_method_type()) != self.provider_type {
            return Err(self.mismatch(credential));
        }
        Ok(AuthIdentifier::derive_pair(
            &self.provider_type.to_string(),
            "fake",
        ))
    }
}

#[derive(Clone, Default)]
struct FakeAuthClient {
    calls: Arc<Mutex<Vec<ProviderType>>>,
}

impl AuthClient for FakeAuthClient {
    fn init_provider(&self, provider_type: ProviderType) -> Box<dyn AuthProvider> {
        Box::new(FakeProvider {
            provider_type,
            calls: self.calls.clone(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum RegistryCall {
    TokenIds(AuthMethodType),
    Pubkey(TokenId),
    Scopes(TokenId, u64),
}

#[derive(Clone, Default)]
struct FakeRegistry {
    token_ids: Vec<TokenId>,
    pubkeys: HashMap<TokenId, PublicKey>,
    scopes: HashMap<TokenId, Vec<bool>>,
    failing_pubkey: Option<TokenId>,
    calls: Arc<Mutex<Vec<RegistryCall>>>,
}

impl FakeRegistry {
    fn with_token(mut self, token_id: u64, key: Option<&str>, scopes: Vec<bool>) -> Self {
        let token_id = TokenId::from(token_id);
        self.token_ids.push(token_id);
        if let Some(key) = key {
            let _ = self.pubkeys.insert(token_id, public_key(key));
        }
        let _ = self.scopes.insert(token_id, scopes);
        self
    }

    /// Make the `pubkey` query for `token_id` fail.
    fn failing_pubkey(mut self, token_id: u64) -> Self {
        self.failing_pubkey = Some(TokenId::from(token_id));
        self
    }

    fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PermissionsRegistry for FakeRegistry {
    async fn token_ids_for_auth_method(
        &self,
        auth_method_type: AuthMethodType,
        _auth_id: &AuthIdentifier,
    ) -> Result<Vec<TokenId>> {
        self.calls
            .lock()
            .unwrap()
            .push(RegistryCall::TokenIds(auth_method_type));
        Ok(self.token_ids.clone())
    }

    async fn pubkey(&self, token_id: &TokenId) -> Result<Option<PublicKey>> {
        self.calls.lock().unwrap().push(RegistryCall::Pubkey(*token_id));
        if self.failing_pubkey == Some(*token_id) {
            return Err(PkpScopesClientError::RegistryCall(
                "execution reverted".to_string(),
            ));
        }
        Ok(self.pubkeys.get(token_id).cloned())
    }

    async fn permitted_auth_method_scopes(
        &self,
        token_id: &TokenId,
        _auth_method_type: AuthMethodType,
        _auth_id: &AuthIdentifier,
        max_scope_id: u64,
    ) -> Result<Vec<bool>> {
        self.calls
            .lock()
            .unwrap()
            .push(RegistryCall::Scopes(*token_id, max_scope_id));
        Ok(self.scopes.get(token_id).cloned().unwrap_or_default())
    }
}

#[derive(Clone, Default)]
struct FakeConnector {
    auth_client: FakeAuthClient,
    registry: FakeRegistry,
    fail: bool,
    connects: Arc<Mutex<usize>>,
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self) -> Result<LookupContext> {
        *self.connects.lock().unwrap() += 1;
        if self.fail {
            return Err(PkpScopesClientError::NodeConnection(
                "no nodes answered".to_string(),
            ));
        }
        Ok(LookupContext {
            auth_client: Box::new(self.auth_client.clone()),
            registry: Box::new(self.registry.clone()),
        })
    }
}

#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
    loading: Mutex<Vec<bool>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn loading(&self, active: bool) {
        self.loading.lock().unwrap().push(active);
    }
}

impl RecordingNotifier {
    fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn each_credential_type_reaches_its_provider() -> Result<()> {
    let expected = [
        (AuthMethodType::EthWallet, ProviderType::EthWallet),
        (AuthMethodType::GoogleJwt, ProviderType::Google),
        (AuthMethodType::Discord, ProviderType::Discord),
        (AuthMethodType::StytchOtp, ProviderType::StytchOtp),
        (AuthMethodType::WebAuthn, ProviderType::WebAuthn),
    ];

    for (auth_method_type, provider_type) in expected {
        let auth_client = FakeAuthClient::default();
        let registry = FakeRegistry::default();
        let credential = Credential::new(auth_method_type, "token");

        let pkps = fetch_pkps(&credential, &auth_client, &registry).await?;
        assert!(pkps.is_empty());
        assert_eq!(*auth_client.calls.lock().unwrap(), vec![provider_type]);
        assert_eq!(
            registry.calls(),
            vec![RegistryCall::TokenIds(auth_method_type)]
        );
    }
    Ok(())
}

#[tokio::test]
async fn tokens_without_public_key_are_skipped() -> Result<()> {
    let registry = FakeRegistry::default()
        .with_token(1, Some(GENERATOR_KEY), vec![false, true, false])
        .with_token(2, None, vec![false, true, true])
        .with_token(3, Some(DOUBLED_GENERATOR_KEY), vec![false, false, false]);
    let credential = Credential::new(AuthMethodType::EthWallet, "token");

    let pkps = fetch_pkps(&credential, &FakeAuthClient::default(), &registry).await?;
    let token_ids: Vec<_> = pkps.iter().map(|pkp| pkp.token_id).collect();
    assert_eq!(token_ids, vec![TokenId::from(3), TokenId::from(1)]);

    // No scope query for the skipped token.
    assert!(!registry
        .calls()
        .contains(&RegistryCall::Scopes(TokenId::from(2), 3)));
    Ok(())
}

#[tokio::test]
async fn results_are_latest_first() -> Result<()> {
    let registry = FakeRegistry::default()
        .with_token(1, Some(GENERATOR_KEY), vec![])
        .with_token(2, Some(GENERATOR_KEY), vec![])
        .with_token(3, Some(GENERATOR_KEY), vec![]);
    let credential = Credential::new(AuthMethodType::GoogleJwt, "token");

    let pkps = fetch_pkps(&credential, &FakeAuthClient::default(), &registry).await?;
    let token_ids: Vec<_> = pkps.iter().map(|pkp| pkp.token_id).collect();
    assert_eq!(
        token_ids,
        vec![TokenId::from(3), TokenId::from(2), TokenId::from(1)]
    );

    // Queries still run in registry order.
    assert_eq!(
        registry.calls(),
        vec![
            RegistryCall::TokenIds(AuthMethodType::GoogleJwt),
            RegistryCall::Pubkey(TokenId::from(1)),
            RegistryCall::Scopes(TokenId::from(1), 3),
            RegistryCall::Pubkey(TokenId::from(2)),
            RegistryCall::Scopes(TokenId::from(2), 3),
            RegistryCall::Pubkey(TokenId::from(3)),
            RegistryCall::Scopes(TokenId::from(3), 3),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn scopes_are_read_from_slots_one_and_two() -> Result<()> {
    let registry = FakeRegistry::default()
        .with_token(1, Some(GENERATOR_KEY), vec![true, false, false])
        .with_token(2, Some(GENERATOR_KEY), vec![false, true, false])
        .with_token(3, Some(GENERATOR_KEY), vec![false, false, true])
        .with_token(4, Some(GENERATOR_KEY), vec![false, true, true]);
    let credential = Credential::new(AuthMethodType::Discord, "token");

    let pkps = fetch_pkps(&credential, &FakeAuthClient::default(), &registry).await?;
    let labels: Vec<_> = pkps.iter().map(|pkp| pkp.scopes.labels()).collect();
    assert_eq!(
        labels,
        vec![
            vec!["[1] Sign Anything", "[2] Only Sign Messages"],
            vec!["[2] Only Sign Messages"],
            vec!["[1] Sign Anything"],
            vec![],
        ]
    );
    assert!(pkps[3].scopes.is_empty());
    Ok(())
}

#[tokio::test]
async fn lookup_resolves_wallet_credential_end_to_end() -> Result<()> {
    let connector = FakeConnector {
        registry: FakeRegistry::default()
            .with_token(10, Some(GENERATOR_KEY), vec![false, true, false])
            .with_token(20, Some(DOUBLED_GENERATOR_KEY), vec![false, false, false]),
        ..Default::default()
    };
    let notifier = RecordingNotifier::default();
    let mut state = LookupState::new();
    state.set_credential_text(r#"{"authMethodType":1,"accessToken":"abc"}"#);

    let pkps = state.fetch(&connector, &notifier).await?;
    assert_eq!(pkps.len(), 2);

    assert_eq!(pkps[0].token_id, TokenId::from(20));
    assert_eq!(pkps[0].eth_address.to_string(), DOUBLED_GENERATOR_ADDRESS);
    assert!(pkps[0].scopes.is_empty());

    assert_eq!(pkps[1].token_id, TokenId::from(10));
    assert_eq!(pkps[1].eth_address.to_string(), GENERATOR_ADDRESS);
    assert!(pkps[1].scopes.sign_anything);
    assert!(!pkps[1].scopes.only_sign_messages);

    assert!(!state.is_loading());
    assert!(notifier.alerts().is_empty());
    assert_eq!(*notifier.loading.lock().unwrap(), vec![true, false]);
    Ok(())
}

#[tokio::test]
async fn malformed_credentials_alert_without_connecting() {
    for text in ["", "not json", "42", "{authMethodType: 1}"] {
        let connector = FakeConnector::default();
        let notifier = RecordingNotifier::default();
        let mut state = LookupState::new();
        state.set_credential_text(text);

        let result = state.fetch(&connector, &notifier).await;
        assert!(matches!(
            result,
            Err(PkpScopesClientError::PkpScopes(
                PkpScopesError::InvalidCredential(_)
            ))
        ));
        assert_eq!(notifier.alerts(), vec![alerts::INVALID_AUTH_METHOD]);
        assert_eq!(*connector.connects.lock().unwrap(), 0);
        assert!(connector.registry.calls().is_empty());
        assert!(!state.is_loading());
        assert!(state.pkps().is_empty());
    }
}

#[tokio::test]
async fn unsupported_type_alerts_without_connecting() {
    let connector = FakeConnector::default();
    let notifier = RecordingNotifier::default();
    let mut state = LookupState::new();
    state.set_credential_text(r#"{"authMethodType":99,"accessToken":"x"}"#);

    let result = state.fetch(&connector, &notifier).await;
    assert!(matches!(
        result,
        Err(PkpScopesClientError::PkpScopes(
            PkpScopesError::UnsupportedAuthMethod(_)
        ))
    ));
    assert_eq!(notifier.alerts(), vec![alerts::UNSUPPORTED_AUTH_METHOD]);
    assert_eq!(*connector.connects.lock().unwrap(), 0);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn connection_failure_clears_loading_without_alert() {
    let connector = FakeConnector {
        fail: true,
        ..Default::default()
    };
    let notifier = RecordingNotifier::default();
    let mut state = LookupState::new();
    state.set_credential_text(r#"{"authMethodType":6,"accessToken":"jwt"}"#);

    let result = state.fetch(&connector, &notifier).await;
    assert!(matches!(result, Err(PkpScopesClientError::NodeConnection(_))));
    assert!(notifier.alerts().is_empty());
    assert!(!state.is_loading());
    assert_eq!(*notifier.loading.lock().unwrap(), vec![true, false]);
}

#[tokio::test]
async fn registry_failure_after_connect_clears_loading_without_alert() {
    let connector = FakeConnector {
        registry: FakeRegistry::default()
            .with_token(1, Some(GENERATOR_KEY), vec![false, true, false])
            .with_token(2, Some(DOUBLED_GENERATOR_KEY), vec![false, true, false])
            .failing_pubkey(2),
        ..Default::default()
    };
    let notifier = RecordingNotifier::default();
    let mut state = LookupState::new();
    state.set_credential_text(r#"{"authMethodType":1,"accessToken":"abc"}"#);

    let result = state.fetch(&connector, &notifier).await;
    assert!(matches!(result, Err(PkpScopesClientError::RegistryCall(_))));
    assert_eq!(*connector.connects.lock().unwrap(), 1);
    assert!(notifier.alerts().is_empty());
    assert!(!state.is_loading());
    assert_eq!(*notifier.loading.lock().unwrap(), vec![true, false]);
    // The first token resolved, but a partial list is never kept.
    assert!(state.pkps().is_empty());
}

#[tokio::test]
async fn undecodable_public_key_fails_the_lookup() {
    let registry = FakeRegistry::default()
        .with_token(1, Some(GENERATOR_KEY), vec![])
        .with_token(2, Some(OFF_CURVE_KEY), vec![]);
    let credential = Credential::new(AuthMethodType::WebAuthn, "token");

    let result = fetch_pkps(&credential, &FakeAuthClient::default(), &registry).await;
    assert!(matches!(
        result,
        Err(PkpScopesClientError::PkpScopes(
            PkpScopesError::InvalidPublicKey
        ))
    ));
    // Scopes are never queried for a key that fails to decode.
    assert!(!registry
        .calls()
        .contains(&RegistryCall::Scopes(TokenId::from(2), 3)));
}

#[tokio::test]
async fn repeated_lookups_replace_the_previous_result() -> Result<()> {
    let connector = FakeConnector {
        registry: FakeRegistry::default()
            .with_token(1, Some(GENERATOR_KEY), vec![false, true, false]),
        ..Default::default()
    };
    let notifier = RecordingNotifier::default();
    let mut state = LookupState::new();
    state.set_credential_text(r#"{authMethodType: 1, accessToken: "abc"}"#);

    let first = state.fetch(&connector, &notifier).await?.to_vec();
    let second = state.fetch(&connector, &notifier).await?.to_vec();
    assert_eq!(first, second);
    assert_eq!(state.pkps().len(), 1);
    assert_eq!(*connector.connects.lock().unwrap(), 2);

    // A failing lookup leaves nothing behind.
    state.set_credential_text("not json");
    assert!(state.fetch(&connector, &notifier).await.is_err());
    assert!(state.pkps().is_empty());
    Ok(())
}
