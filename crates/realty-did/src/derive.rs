use realty_crypto::sha256;

/// DID method namespace for broker identifiers.
pub const DID_NAMESPACE: &str = "realestate";

/// Fragment appended to a DID to name its single verification method.
pub const KEY_FRAGMENT: &str = "#key-1";

/// Derive the DID for a public key: `did:realestate:<sha256-hex(key)>`.
///
/// Pure and total — the same key always yields the same identifier, and
/// any byte string is hashable.
pub fn derive_did(public_key_bytes: &[u8]) -> String {
    let digest = sha256(public_key_bytes);
    format!("did:{}:{}", DID_NAMESPACE, hex::encode(digest))
}
