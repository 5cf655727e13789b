use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::claims::ClaimSet;
use crate::error::CredentialError;

/// W3C credentials context, first entry of every credential's `@context`.
pub const CREDENTIALS_V1_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Broker schema context; the version segment is the canonical-layout
/// compatibility boundary for already-issued credentials.
pub const BROKER_SCHEMA_CONTEXT: &str = "https://realty.example/schemas/broker/v1";

/// Base credential type.
pub const BASE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// Domain-specific credential subtype.
pub const BROKER_CREDENTIAL_TYPE: &str = "RealEstateBrokerCredential";

/// Fixed proof purpose tag.
pub const PROOF_PURPOSE: &str = "assertionMethod";

/// The cryptographic envelope attached to a signed credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    /// Signature scheme tag (e.g. "Ed25519Signature2020").
    #[serde(rename = "type")]
    pub proof_type: String,
    pub created: DateTime<Utc>,
    /// Issuer DID plus the `#key-1` fragment.
    pub verification_method: String,
    pub proof_purpose: String,
    /// Base64-encoded signature over the canonical payload.
    pub signature_value: String,
}

/// A broker credential following the W3C VC data model.
///
/// The JSON serialization of every field except `proof` is exactly the
/// byte sequence that gets signed: struct fields serialize in declaration
/// order and all maps are ordered, so the layout is canonical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableCredential {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// Credential-unique URI (`urn:uuid:...`).
    pub id: String,
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,
    /// DID of the issuing authority.
    pub issuer: String,
    pub issuance_date: DateTime<Utc>,
    /// Instant after which the credential must be rejected; a credential
    /// without one never expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    pub credential_subject: ClaimSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl VerifiableCredential {
    /// Create a new unsigned broker credential.
    pub fn new(issuer: String, subject: ClaimSet) -> Self {
        Self {
            context: vec![
                CREDENTIALS_V1_CONTEXT.to_string(),
                BROKER_SCHEMA_CONTEXT.to_string(),
            ],
            id: format!("urn:uuid:{}", Uuid::new_v4()),
            credential_type: vec![
                BASE_CREDENTIAL_TYPE.to_string(),
                BROKER_CREDENTIAL_TYPE.to_string(),
            ],
            issuer,
            issuance_date: Utc::now(),
            expiration_date: None,
            credential_subject: subject,
            proof: None,
        }
    }

    /// Set an expiration instant.
    pub fn with_expiration(mut self, expires: DateTime<Utc>) -> Self {
        self.expiration_date = Some(expires);
        self
    }

    /// The canonical signing payload: this credential serialized with its
    /// proof absent. Issuance signs these bytes; verification must
    /// reconstruct them identically from the received credential.
    pub fn signing_payload(&self) -> Result<Vec<u8>, CredentialError> {
        let mut unsigned = self.clone();
        unsigned.proof = None;
        serde_json::to_vec(&unsigned).map_err(|e| CredentialError::Encoding(e.to_string()))
    }

    /// Whether a proof is attached.
    pub fn is_signed(&self) -> bool {
        self.proof.is_some()
    }

    /// Serialize the full credential for handing to external collaborators.
    pub fn to_json(&self) -> Result<String, CredentialError> {
        serde_json::to_string_pretty(self).map_err(|e| CredentialError::Encoding(e.to_string()))
    }

    /// Parse a received credential.
    pub fn from_json(json: &str) -> Result<Self, CredentialError> {
        serde_json::from_str(json).map_err(|e| CredentialError::Encoding(e.to_string()))
    }
}
