use serde::Serialize;

use crate::{
    constants::{labels, ONLY_SIGN_MESSAGES_SCOPE, SIGN_ANYTHING_SCOPE},
    types::{AuthIdentifier, EthAddress, PublicKey, TokenId},
};

/// The scopes an auth method holds on a PKP.
///
/// Both flags being false is a meaningful state: the PKP was minted before
/// scopes existed and can no longer be used for session signatures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionScopes {
    pub sign_anything: bool,
    pub only_sign_messages: bool,
}

impl PermissionScopes {
    /// Read the two meaningful slots out of a registry scope array. Missing
    /// slots count as not granted.
    pub fn from_scope_array(scopes: &[bool]) -> Self {
        Self {
            sign_anything: scopes.get(SIGN_ANYTHING_SCOPE).copied().unwrap_or(false),
            only_sign_messages: scopes
                .get(ONLY_SIGN_MESSAGES_SCOPE)
                .copied()
                .unwrap_or(false),
        }
    }

    /// True when no scope is granted.
    pub fn is_empty(&self) -> bool {
        !self.sign_anything && !self.only_sign_messages
    }

    pub fn labels(&self) -> Vec<&'static str> {
        let mut granted = Vec::new();
        if self.sign_anything {
            granted.push(labels::SIGN_ANYTHING);
        }
        if self.only_sign_messages {
            granted.push(labels::ONLY_SIGN_MESSAGES);
        }
        granted
    }
}

/// A PKP the looked-up auth method is bound to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PkpRecord {
    pub auth_id: AuthIdentifier,
    pub token_id: TokenId,
    pub public_key: PublicKey,
    pub eth_address: EthAddress,
    pub scopes: PermissionScopes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_slots_one_and_two() {
        let scopes = PermissionScopes::from_scope_array(&[true, true, false]);
        assert!(scopes.sign_anything);
        assert!(!scopes.only_sign_messages);

        let scopes = PermissionScopes::from_scope_array(&[true, false, true]);
        assert!(!scopes.sign_anything);
        assert!(scopes.only_sign_messages);
    }

    #[test]
    fn slot_zero_is_ignored() {
        let scopes = PermissionScopes::from_scope_array(&[true, false, false]);
        assert!(scopes.is_empty());
    }

    #[test]
    fn short_arrays_grant_nothing() {
        assert!(PermissionScopes::from_scope_array(&[]).is_empty());
        let scopes = PermissionScopes::from_scope_array(&[false, true]);
        assert!(scopes.sign_anything);
        assert!(!scopes.only_sign_messages);
    }

    #[test]
    fn labels_follow_granted_scopes() {
        let both = PermissionScopes {
            sign_anything: true,
            only_sign_messages: true,
        };
        assert_eq!(
            both.labels(),
            vec!["[1] Sign Anything", "[2] Only Sign Messages"]
        );
        assert!(PermissionScopes::default().labels().is_empty());
    }

    #[test]
    fn empty_scopes_are_distinguishable() {
        let none = PermissionScopes::default();
        let some = PermissionScopes {
            sign_anything: true,
            only_sign_messages: false,
        };
        assert!(none.is_empty());
        assert!(!some.is_empty());
        assert_ne!(none, some);
    }

    #[test]
    fn scopes_serialize_in_camel_case() -> Result<(), serde_json::Error> {
        let scopes = PermissionScopes {
            sign_anything: true,
            only_sign_messages: false,
        };
        let json = serde_json::to_value(scopes)?;
        assert_eq!(
            json,
            serde_json::json!({ "signAnything": true, "onlySignMessages": false })
        );
        Ok(())
    }
}
