use std::sync::Arc;

use chrono::Utc;

use realty_crypto::{CryptoError, KeyProvider, KeyRole, Signature, SignatureScheme};
use realty_did::KEY_FRAGMENT;

use crate::config::IssuerConfig;
use crate::credential::VerifiableCredential;
use crate::error::CredentialError;
use crate::policy;

/// Why a credential was rejected.
///
/// Integrity failures (`MissingProof`, `IssuerMismatch`,
/// `SignatureInvalid`) are distinct from policy failures
/// (`LicenseInvalid`, `DisqualifyingRecord`) so callers can present
/// different user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("credential is not parseable JSON: {0}")]
    MalformedJson(String),

    #[error("credential has no proof or an empty signature")]
    MissingProof,

    #[error("proof verification method {found} does not match expected {expected}")]
    IssuerMismatch { expected: String, found: String },

    #[error("unsupported proof type: {0}")]
    UnsupportedProofType(String),

    #[error("signature does not verify against the canonical payload")]
    SignatureInvalid,

    #[error("credential has expired")]
    Expired,

    #[error("broker license is asserted invalid")]
    LicenseInvalid,

    #[error("disqualifying fraud conviction record asserted")]
    DisqualifyingRecord,
}

/// Outcome of credential verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Verifies broker credentials against the configured issuer.
///
/// Checks run in a fixed order, terminal on the first failure: parse,
/// proof presence, verification-method binding, canonical payload
/// reconstruction, signature verification, expiry, claims policy.
/// Key-provider failures surface as `Err` and are never masked as
/// rejections.
pub struct CredentialVerifier {
    config: IssuerConfig,
    keys: Arc<dyn KeyProvider>,
}

impl CredentialVerifier {
    /// Create a verifier from explicit configuration and an injected key
    /// provider.
    pub fn new(config: IssuerConfig, keys: Arc<dyn KeyProvider>) -> Self {
        Self { config, keys }
    }

    /// Create a verifier from environment configuration; fails closed if
    /// the issuer DID is absent.
    pub fn from_env(keys: Arc<dyn KeyProvider>) -> Result<Self, CredentialError> {
        Ok(Self::new(IssuerConfig::from_env()?, keys))
    }

    /// Verify a serialized credential.
    pub fn verify(&self, credential_json: &str) -> Result<Verdict, CredentialError> {
        let vc = match VerifiableCredential::from_json(credential_json) {
            Ok(vc) => vc,
            Err(e) => return Ok(self.reject(RejectReason::MalformedJson(e.to_string()))),
        };
        self.verify_credential(&vc)
    }

    /// Verify an already-parsed credential.
    pub fn verify_credential(
        &self,
        vc: &VerifiableCredential,
    ) -> Result<Verdict, CredentialError> {
        // Proof presence: a proof block with a non-empty signature.
        let proof = match &vc.proof {
            Some(proof) if !proof.signature_value.is_empty() => proof,
            _ => return Ok(self.reject(RejectReason::MissingProof)),
        };

        // Verification-method binding: the proof must name the configured
        // issuer's key, even if the raw signature would verify under some
        // other key.
        let expected = format!("{}{}", self.config.issuer_did, KEY_FRAGMENT);
        if proof.verification_method != expected {
            return Ok(self.reject(RejectReason::IssuerMismatch {
                expected,
                found: proof.verification_method.clone(),
            }));
        }

        // Scheme dispatch on the proof's type tag.
        let scheme = match SignatureScheme::from_proof_type(&proof.proof_type) {
            Some(scheme) => scheme,
            None => {
                return Ok(self.reject(RejectReason::UnsupportedProofType(
                    proof.proof_type.clone(),
                )))
            }
        };

        // Canonical payload: the credential re-serialized with proof absent.
        let payload = vc.signing_payload()?;

        let signature = match Signature::from_base64(&proof.signature_value) {
            Ok(signature) => signature,
            Err(_) => return Ok(self.reject(RejectReason::SignatureInvalid)),
        };

        // Key-provider I/O failures propagate; they are not rejections.
        let key = self.keys.verifying_key(KeyRole::Issuer)?;
        if key.scheme() != scheme {
            return Ok(self.reject(RejectReason::SignatureInvalid));
        }

        match key.verify(&payload, &signature) {
            Ok(()) => {}
            Err(CryptoError::SignatureVerificationFailed | CryptoError::InvalidInput(_)) => {
                return Ok(self.reject(RejectReason::SignatureInvalid));
            }
            Err(e) => return Err(e.into()),
        }

        // Signature is good; the expiry and claims can now be trusted.
        if let Some(expiration) = vc.expiration_date {
            if Utc::now() > expiration {
                return Ok(self.reject(RejectReason::Expired));
            }
        }

        if let Some(reason) = policy::evaluate(&vc.credential_subject) {
            return Ok(self.reject(reason));
        }

        tracing::info!(
            issuer = %vc.issuer,
            subject = %vc.credential_subject.id,
            credential_id = %vc.id,
            "credential accepted"
        );
        Ok(Verdict::Accepted)
    }

    fn reject(&self, reason: RejectReason) -> Verdict {
        tracing::warn!(issuer = %self.config.issuer_did, reason = %reason, "credential rejected");
        Verdict::Rejected(reason)
    }
}
