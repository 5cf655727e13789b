use serde::{Deserialize, Serialize};

use realty_crypto::{CryptoError, SignatureScheme};

use crate::error::CredentialError;

/// Environment variable naming the issuing authority's DID.
pub const ISSUER_DID_VAR: &str = "ISSUER_DID";

/// Environment variable optionally naming the proof scheme tag.
pub const ISSUER_SCHEME_VAR: &str = "ISSUER_PROOF_TYPE";

/// Configuration for the issuing authority consumed by issuer and verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuerConfig {
    /// DID of the issuing authority.
    pub issuer_did: String,
    /// Signature scheme used for proofs.
    pub scheme: SignatureScheme,
}

impl IssuerConfig {
    pub fn new(issuer_did: impl Into<String>, scheme: SignatureScheme) -> Self {
        Self {
            issuer_did: issuer_did.into(),
            scheme,
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// Fails closed: an absent or empty `ISSUER_DID` is an error, never a
    /// default identity. `ISSUER_PROOF_TYPE` may override the default
    /// Ed25519 scheme with any recognized proof type tag.
    pub fn from_env() -> Result<Self, CredentialError> {
        let issuer_did = std::env::var(ISSUER_DID_VAR)
            .ok()
            .filter(|did| !did.is_empty())
            .ok_or(CredentialError::MissingIssuerDid)?;

        let scheme = match std::env::var(ISSUER_SCHEME_VAR) {
            Ok(tag) => SignatureScheme::from_proof_type(&tag)
                .ok_or(CryptoError::UnsupportedScheme(tag))?,
            Err(_) => SignatureScheme::Ed25519,
        };

        Ok(Self { issuer_did, scheme })
    }
}
