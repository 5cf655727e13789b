/// Cryptographic operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("key material not configured: {0}")]
    KeyMissing(String),

    #[error("malformed key material: {0}")]
    KeyMalformed(String),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("signing failed: {0}")]
    SigningError(String),

    #[error("signature verification failed")]
    SignatureVerificationFailed,

    #[error("unsupported signature scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
