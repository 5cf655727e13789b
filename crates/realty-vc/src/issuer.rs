use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use realty_crypto::{KeyProvider, KeyRole};
use realty_did::KEY_FRAGMENT;

use crate::claims::ClaimSet;
use crate::config::IssuerConfig;
use crate::credential::{Proof, VerifiableCredential, PROOF_PURPOSE};
use crate::error::CredentialError;

/// Issues signed broker credentials.
///
/// Stateless aside from its configuration; safe to share across threads.
/// Failure at any step is fatal to the call — no partial credential is
/// ever returned.
pub struct CredentialIssuer {
    config: IssuerConfig,
    keys: Arc<dyn KeyProvider>,
}

impl CredentialIssuer {
    /// Create an issuer from explicit configuration and an injected key
    /// provider.
    pub fn new(config: IssuerConfig, keys: Arc<dyn KeyProvider>) -> Self {
        Self { config, keys }
    }

    /// Create an issuer from environment configuration; fails closed if
    /// the issuer DID is absent.
    pub fn from_env(keys: Arc<dyn KeyProvider>) -> Result<Self, CredentialError> {
        Ok(Self::new(IssuerConfig::from_env()?, keys))
    }

    /// The issuing authority's DID.
    pub fn did(&self) -> &str {
        &self.config.issuer_did
    }

    /// Issue a signed credential for a broker.
    ///
    /// The claim set starts from `{id: subject_did, name: subject_name}`
    /// and overlays `extra_claims` (caller keys win). The credential is
    /// serialized with its proof absent, those exact bytes are signed, and
    /// the proof is attached.
    pub fn issue(
        &self,
        subject_did: &str,
        subject_name: &str,
        extra_claims: BTreeMap<String, Value>,
    ) -> Result<VerifiableCredential, CredentialError> {
        self.issue_credential(subject_did, subject_name, extra_claims, None)
    }

    /// Issue a signed credential that expires at the given instant.
    pub fn issue_with_expiration(
        &self,
        subject_did: &str,
        subject_name: &str,
        extra_claims: BTreeMap<String, Value>,
        expires: DateTime<Utc>,
    ) -> Result<VerifiableCredential, CredentialError> {
        self.issue_credential(subject_did, subject_name, extra_claims, Some(expires))
    }

    fn issue_credential(
        &self,
        subject_did: &str,
        subject_name: &str,
        extra_claims: BTreeMap<String, Value>,
        expiration: Option<DateTime<Utc>>,
    ) -> Result<VerifiableCredential, CredentialError> {
        if self.config.issuer_did.is_empty() {
            return Err(CredentialError::MissingIssuerDid);
        }

        let subject = ClaimSet::new(subject_did, subject_name).with_claims(extra_claims)?;
        let mut vc = VerifiableCredential::new(self.config.issuer_did.clone(), subject);
        vc.expiration_date = expiration;

        let payload = vc.signing_payload()?;
        let key = self.keys.signing_key(KeyRole::Issuer)?;
        // The provider key must match the configured scheme.
        if key.scheme() != self.config.scheme {
            return Err(CredentialError::SchemeMismatch {
                expected: self.config.scheme.proof_type().to_string(),
                actual: key.scheme().proof_type().to_string(),
            });
        }
        let signature = key.sign(&payload)?;

        vc.proof = Some(Proof {
            proof_type: key.scheme().proof_type().to_string(),
            created: Utc::now(),
            verification_method: format!("{}{}", self.config.issuer_did, KEY_FRAGMENT),
            proof_purpose: PROOF_PURPOSE.to_string(),
            signature_value: signature.to_base64(),
        });

        tracing::info!(
            issuer = %self.config.issuer_did,
            subject = subject_did,
            credential_id = %vc.id,
            scheme = key.scheme().proof_type(),
            "credential issued"
        );

        Ok(vc)
    }

    /// Issue a credential and return its JSON serialization.
    pub fn issue_json(
        &self,
        subject_did: &str,
        subject_name: &str,
        extra_claims: BTreeMap<String, Value>,
    ) -> Result<String, CredentialError> {
        self.issue(subject_did, subject_name, extra_claims)?.to_json()
    }
}
