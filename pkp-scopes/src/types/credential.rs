//! The credential a user pastes in, as a tagged union over the supported auth
//! method types.
//!
//! Conversion from JSON only checks structure. The contents of an access
//! token are decoded by whichever provider derives the auth method id from it.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;
use serde_json::{Map, Value};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    infrastructure::sensitive_info::REDACTED_INFO_LABEL, types::AuthMethodType, PkpScopesError,
};

const AUTH_METHOD_TYPE_FIELD: &str = "authMethodType";
const ACCESS_TOKEN_FIELD: &str = "accessToken";

/// Raw access token. Wiped from memory on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
struct AccessToken(String);

impl AccessToken {
    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REDACTED_INFO_LABEL)
    }
}

/// A wallet auth signature, serialized as JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSigToken(AccessToken);

#[derive(Deserialize)]
struct AuthSig {
    address: Option<String>,
}

impl AuthSigToken {
    /// Address of the wallet that produced the signature.
    pub fn address(&self) -> Result<String, PkpScopesError> {
        let auth_sig: AuthSig = serde_json::from_str(self.0.expose()).map_err(|_| {
            PkpScopesError::InvalidAccessToken("auth sig is not valid JSON".to_string())
        })?;
        auth_sig
            .address
            .filter(|address| !address.is_empty())
            .ok_or_else(|| PkpScopesError::InvalidAccessToken("auth sig has no address".into()))
    }
}

/// A compact-serialized JWT. The signature is not checked; only the payload is
/// read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtToken(AccessToken);

/// The JWT claims needed to derive an auth method id.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub aud: Audience,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    /// The audience as a single string. Multiple audiences are joined with
    /// commas, matching how they stringify in the browser.
    pub fn joined(&self) -> String {
        match self {
            Audience::One(aud) => aud.clone(),
            Audience::Many(auds) => auds.join(","),
        }
    }

    pub fn first(&self) -> Option<&str> {
        match self {
            Audience::One(aud) => Some(aud.as_str()),
            Audience::Many(auds) => auds.first().map(String::as_str),
        }
    }
}

impl JwtToken {
    pub fn claims(&self) -> Result<JwtClaims, PkpScopesError> {
        let payload = self
            .0
            .expose()
            .split('.')
            .nth(1)
            .ok_or_else(|| PkpScopesError::InvalidAccessToken("malformed JWT".to_string()))?;
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            PkpScopesError::InvalidAccessToken(format!("unexpected JWT payload: {e}"))
        })
    }
}

/// An OAuth bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthToken(AccessToken);

impl OAuthToken {
    pub fn bearer(&self) -> &str {
        self.0.expose()
    }
}

/// A WebAuthn credential, serialized as JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebAuthnToken(AccessToken);

#[derive(Deserialize)]
struct WebAuthnCredential {
    #[serde(rename = "rawId")]
    raw_id: Option<String>,
}

impl WebAuthnToken {
    /// The base64url credential id.
    pub fn raw_id(&self) -> Result<String, PkpScopesError> {
        let credential: WebAuthnCredential =
            serde_json::from_str(self.0.expose()).map_err(|_| {
                PkpScopesError::InvalidAccessToken(
                    "WebAuthn credential is not valid JSON".to_string(),
                )
            })?;
        credential
            .raw_id
            .filter(|raw_id| !raw_id.is_empty())
            .ok_or_else(|| {
                PkpScopesError::InvalidAccessToken("WebAuthn credential has no rawId".into())
            })
    }
}

/// A credential for one of the supported auth methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    EthWallet(AuthSigToken),
    GoogleJwt(JwtToken),
    Discord(OAuthToken),
    StytchOtp(JwtToken),
    WebAuthn(WebAuthnToken),
}

impl Credential {
    /// Build a credential from a discriminant and a raw access token.
    pub fn new(auth_method_type: AuthMethodType, access_token: impl Into<String>) -> Self {
        let token = AccessToken(access_token.into());
        match auth_method_type {
            AuthMethodType::EthWallet => Credential::EthWallet(AuthSigToken(token)),
            AuthMethodType::GoogleJwt => Credential::GoogleJwt(JwtToken(token)),
            AuthMethodType::Discord => Credential::Discord(OAuthToken(token)),
            AuthMethodType::StytchOtp => Credential::StytchOtp(JwtToken(token)),
            AuthMethodType::WebAuthn => Credential::WebAuthn(WebAuthnToken(token)),
        }
    }

    pub fn auth_method_type(&self) -> AuthMethodType {
        match self {
            Credential::EthWallet(_) => AuthMethodType::EthWallet,
            Credential::GoogleJwt(_) => AuthMethodType::GoogleJwt,
            Credential::Discord(_) => AuthMethodType::Discord,
            Credential::StytchOtp(_) => AuthMethodType::StytchOtp,
            Credential::WebAuthn(_) => AuthMethodType::WebAuthn,
        }
    }
}

impl TryFrom<Value> for Credential {
    type Error = PkpScopesError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(PkpScopesError::InvalidCredential(format!(
                    "expected an object, found {}",
                    json_kind(&other)
                )))
            }
        };

        // The discriminant is checked before the payload so that an unknown
        // type is reported as unsupported even when the payload is absent.
        let auth_method_type = auth_method_type(&object)?;
        let access_token = access_token(&object)?;
        Ok(Credential::new(auth_method_type, access_token))
    }
}

fn auth_method_type(object: &Map<String, Value>) -> Result<AuthMethodType, PkpScopesError> {
    let raw = match object.get(AUTH_METHOD_TYPE_FIELD) {
        None | Some(Value::Null) => {
            return Err(PkpScopesError::UnsupportedAuthMethod("missing".to_string()))
        }
        Some(raw) => raw,
    };

    let value = match raw {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        // Strings never match, even when they spell a known type.
        _ => None,
    };

    match value {
        Some(value) => AuthMethodType::try_from(value),
        None => Err(PkpScopesError::UnsupportedAuthMethod(raw.to_string())),
    }
}

fn access_token(object: &Map<String, Value>) -> Result<String, PkpScopesError> {
    match object.get(ACCESS_TOKEN_FIELD) {
        Some(Value::String(token)) => Ok(token.clone()),
        // Tokens pasted from a console log are often the already-parsed object.
        Some(token @ (Value::Object(_) | Value::Array(_))) => Ok(serde_json::to_string(token)?),
        Some(other) => Err(PkpScopesError::InvalidCredential(format!(
            "{ACCESS_TOKEN_FIELD} must be a string or an object, found {}",
            json_kind(other)
        ))),
        None => Err(PkpScopesError::InvalidCredential(format!(
            "missing {ACCESS_TOKEN_FIELD}"
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
