//! Realty DID — Deterministic identifier derivation and DID Documents.

pub mod derive;
pub mod document;
pub mod error;

pub use derive::{derive_did, DID_NAMESPACE, KEY_FRAGMENT};
pub use document::{DidDocument, VerificationMethod};
pub use error::DidError;
