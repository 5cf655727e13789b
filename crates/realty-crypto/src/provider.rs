//! Key material resolution for issuer and subject roles.
//!
//! Key providers are explicit, injected instances: issuers and verifiers
//! are constructed with the provider they should use, so tests and
//! embedders can swap in [`StaticKeyProvider`] without touching process
//! state. Resolution always fails closed — a missing variable, unreadable
//! file, or malformed key is an error, never a fallback key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::keys::{KeyPair, SignatureScheme, SigningKey, VerifyingKey};

/// The role whose key material is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// The credential-issuing authority.
    Issuer,
    /// The credential subject (e.g. a broker authenticating with their DID key).
    Subject,
}

impl KeyRole {
    /// Short label used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issuer => "issuer",
            Self::Subject => "subject",
        }
    }
}

/// Resolves signing and verification keys for a role.
///
/// Reads are idempotent lookups; implementations hold no mutable state and
/// are safe to share across threads.
pub trait KeyProvider: Send + Sync {
    /// Load the private signing key for a role.
    fn signing_key(&self, role: KeyRole) -> Result<SigningKey, CryptoError>;

    /// Load the public verification key for a role.
    fn verifying_key(&self, role: KeyRole) -> Result<VerifyingKey, CryptoError>;
}

/// Environment variable names pointing at key-material files.
///
/// Each variable holds a filesystem path; the file content is the
/// base64-encoded raw key for the provider's scheme.
#[derive(Debug, Clone)]
pub struct KeyLocations {
    pub issuer_signing: String,
    pub issuer_verifying: String,
    pub subject_signing: String,
    pub subject_verifying: String,
}

impl Default for KeyLocations {
    fn default() -> Self {
        Self {
            issuer_signing: "ISSUER_PRIVATE_KEY_PATH".into(),
            issuer_verifying: "ISSUER_PUBLIC_KEY_PATH".into(),
            subject_signing: "SUBJECT_PRIVATE_KEY_PATH".into(),
            subject_verifying: "SUBJECT_PUBLIC_KEY_PATH".into(),
        }
    }
}

/// Loads base64-encoded key files from paths named by environment variables.
pub struct EnvKeyProvider {
    scheme: SignatureScheme,
    locations: KeyLocations,
}

impl EnvKeyProvider {
    /// Provider using the default variable names.
    pub fn new(scheme: SignatureScheme) -> Self {
        Self {
            scheme,
            locations: KeyLocations::default(),
        }
    }

    /// Provider with caller-supplied variable names.
    pub fn with_locations(scheme: SignatureScheme, locations: KeyLocations) -> Self {
        Self { scheme, locations }
    }

    fn var_name(&self, role: KeyRole, signing: bool) -> &str {
        match (role, signing) {
            (KeyRole::Issuer, true) => &self.locations.issuer_signing,
            (KeyRole::Issuer, false) => &self.locations.issuer_verifying,
            (KeyRole::Subject, true) => &self.locations.subject_signing,
            (KeyRole::Subject, false) => &self.locations.subject_verifying,
        }
    }

    /// Resolve a variable to raw key bytes: var → path → base64 file content.
    fn read_key_bytes(&self, var: &str) -> Result<Vec<u8>, CryptoError> {
        let path = std::env::var(var)
            .map_err(|_| CryptoError::KeyMissing(format!("environment variable {var} is not set")))?;
        let encoded = std::fs::read_to_string(&path)
            .map_err(|e| CryptoError::KeyMissing(format!("cannot read key file {path}: {e}")))?;
        BASE64
            .decode(encoded.trim())
            .map_err(|e| CryptoError::KeyMalformed(format!("key file {path} is not valid base64: {e}")))
    }
}

impl KeyProvider for EnvKeyProvider {
    fn signing_key(&self, role: KeyRole) -> Result<SigningKey, CryptoError> {
        let var = self.var_name(role, true).to_string();
        let mut raw = self.read_key_bytes(&var)?;
        let key = SigningKey::from_bytes(self.scheme, &raw);
        raw.zeroize();
        tracing::debug!(role = role.as_str(), var = %var, "resolved signing key");
        key
    }

    fn verifying_key(&self, role: KeyRole) -> Result<VerifyingKey, CryptoError> {
        let var = self.var_name(role, false).to_string();
        let raw = self.read_key_bytes(&var)?;
        VerifyingKey::from_bytes(self.scheme, &raw)
    }
}

/// In-memory key provider for tests and embedders that manage keys themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticKeyProvider {
    issuer: Option<KeyPair>,
    subject: Option<KeyPair>,
}

impl StaticKeyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the issuer key pair.
    pub fn with_issuer(mut self, keypair: KeyPair) -> Self {
        self.issuer = Some(keypair);
        self
    }

    /// Set the subject key pair.
    pub fn with_subject(mut self, keypair: KeyPair) -> Self {
        self.subject = Some(keypair);
        self
    }

    fn keypair(&self, role: KeyRole) -> Result<&KeyPair, CryptoError> {
        let keypair = match role {
            KeyRole::Issuer => self.issuer.as_ref(),
            KeyRole::Subject => self.subject.as_ref(),
        };
        keypair.ok_or_else(|| {
            CryptoError::KeyMissing(format!("no {} key pair configured", role.as_str()))
        })
    }
}

impl KeyProvider for StaticKeyProvider {
    fn signing_key(&self, role: KeyRole) -> Result<SigningKey, CryptoError> {
        Ok(self.keypair(role)?.signing_key().clone())
    }

    fn verifying_key(&self, role: KeyRole) -> Result<VerifyingKey, CryptoError> {
        Ok(self.keypair(role)?.public_key())
    }
}
