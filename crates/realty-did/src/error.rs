/// DID document errors.
#[derive(Debug, thiserror::Error)]
pub enum DidError {
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
