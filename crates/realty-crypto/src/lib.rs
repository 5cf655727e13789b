//! Realty Crypto — Signature-scheme-agile signing and key material resolution.

pub mod error;
pub mod hashing;
pub mod keys;
pub mod provider;

pub use error::CryptoError;
pub use hashing::{sha256, Hash};
pub use keys::{KeyPair, Signature, SignatureScheme, SigningKey, VerifyingKey};
pub use provider::{EnvKeyProvider, KeyLocations, KeyProvider, KeyRole, StaticKeyProvider};
