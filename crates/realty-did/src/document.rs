use serde::{Deserialize, Serialize};

use crate::derive::KEY_FRAGMENT;
use crate::error::DidError;

/// DID Core context, present on every document.
pub const DID_CORE_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// Suite context added for Ed25519 2020 keys.
pub const ED25519_2020_CONTEXT: &str = "https://w3id.org/security/suites/ed25519-2020/v1";

/// Suite context added for secp256k1 2019 keys.
pub const SECP256K1_2019_CONTEXT: &str = "https://w3id.org/security/suites/secp256k1-2019/v1";

/// A typed reference to public key material usable to authenticate a DID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// Method id: the DID plus the `#key-1` fragment.
    pub id: String,
    /// Key type tag, stored verbatim (e.g. "Ed25519VerificationKey2020").
    #[serde(rename = "type")]
    pub key_type: String,
    /// DID that controls this key.
    pub controller: String,
    /// Public key as a multibase string: `z` + base58btc(raw key bytes).
    #[serde(rename = "publicKeyMultibase")]
    pub public_key_multibase: String,
}

/// A DID Document describing how to authenticate a broker DID.
///
/// Immutable once issued: rebuilding from the same key yields an identical
/// document. Key rotation is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidDocument {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    pub id: String,
    #[serde(rename = "verificationMethod")]
    pub verification_method: Vec<VerificationMethod>,
    pub authentication: Vec<String>,
}

impl DidDocument {
    /// Build the document for a DID and its public key.
    ///
    /// The key type tag is stored verbatim; recognized tags add their suite
    /// context URI, unknown tags add none. The single verification method is
    /// listed under both `verificationMethod` and `authentication`.
    pub fn for_key(did: &str, public_key_bytes: &[u8], key_type: &str) -> Self {
        let mut context = vec![DID_CORE_CONTEXT.to_string()];
        match key_type {
            "Ed25519VerificationKey2020" => context.push(ED25519_2020_CONTEXT.to_string()),
            "EcdsaSecp256k1VerificationKey2019" => context.push(SECP256K1_2019_CONTEXT.to_string()),
            _ => {}
        }

        let method_id = format!("{did}{KEY_FRAGMENT}");
        let public_key_multibase = format!("z{}", bs58::encode(public_key_bytes).into_string());

        Self {
            context,
            id: did.to_string(),
            verification_method: vec![VerificationMethod {
                id: method_id.clone(),
                key_type: key_type.to_string(),
                controller: did.to_string(),
                public_key_multibase,
            }],
            authentication: vec![method_id],
        }
    }

    /// Serialize to pretty-printed JSON for persistence by the caller.
    pub fn to_json(&self) -> Result<String, DidError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a stored document.
    pub fn from_json(json: &str) -> Result<Self, DidError> {
        Ok(serde_json::from_str(json)?)
    }
}
