use realty_crypto::CryptoError;

/// Credential issuance and verification errors.
///
/// Rejections of an untrusted credential are not errors — see
/// [`crate::verifier::Verdict`]. These variants cover defects in the
/// caller's own configuration or in key-material resolution.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("issuer DID is not configured")]
    MissingIssuerDid,

    #[error("credential encoding failed: {0}")]
    Encoding(String),

    #[error("claim {0} must be a string")]
    InvalidClaim(String),

    #[error("key provider returned a {actual} key but the issuer is configured for {expected}")]
    SchemeMismatch { expected: String, actual: String },

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
