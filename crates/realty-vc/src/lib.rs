//! Realty VC — Broker credential issuance, verification, and claims policy.
//!
//! The issuer signs the canonical JSON serialization of a credential with
//! its proof absent; the verifier reconstructs those exact bytes from a
//! received credential before checking the signature, then evaluates the
//! claims policy. Both sides resolve key material through an injected
//! [`realty_crypto::KeyProvider`].

pub mod claims;
pub mod config;
pub mod credential;
pub mod error;
pub mod issuer;
pub mod policy;
pub mod verifier;

pub use claims::ClaimSet;
pub use config::IssuerConfig;
pub use credential::{Proof, VerifiableCredential};
pub use error::CredentialError;
pub use issuer::CredentialIssuer;
pub use verifier::{CredentialVerifier, RejectReason, Verdict};
