use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signer, Verifier};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Supported proof signature schemes.
///
/// The scheme is carried verbatim in a credential proof's `type` field and
/// drives dispatch at verification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureScheme {
    #[serde(rename = "Ed25519Signature2020")]
    Ed25519,
    #[serde(rename = "EcdsaSecp256k1Signature2019")]
    EcdsaSecp256k1,
}

impl SignatureScheme {
    /// The proof `type` tag for this scheme.
    pub fn proof_type(&self) -> &'static str {
        match self {
            Self::Ed25519 => "Ed25519Signature2020",
            Self::EcdsaSecp256k1 => "EcdsaSecp256k1Signature2019",
        }
    }

    /// The verification-method `type` tag for keys of this scheme.
    pub fn verification_key_type(&self) -> &'static str {
        match self {
            Self::Ed25519 => "Ed25519VerificationKey2020",
            Self::EcdsaSecp256k1 => "EcdsaSecp256k1VerificationKey2019",
        }
    }

    /// Resolve a proof `type` tag back to a scheme, if recognized.
    pub fn from_proof_type(tag: &str) -> Option<Self> {
        match tag {
            "Ed25519Signature2020" => Some(Self::Ed25519),
            "EcdsaSecp256k1Signature2019" => Some(Self::EcdsaSecp256k1),
            _ => None,
        }
    }
}

/// A detached signature over a canonical byte payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    /// Wrap raw signature bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encode as standard base64 (the credential wire encoding).
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// Decode from standard base64.
    pub fn from_base64(encoded: &str) -> Result<Self, CryptoError> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| CryptoError::InvalidInput(format!("invalid base64 signature: {e}")))?;
        Ok(Self { bytes })
    }
}

/// A private signing key, tagged with its scheme.
#[derive(Clone)]
pub enum SigningKey {
    Ed25519(ed25519_dalek::SigningKey),
    EcdsaSecp256k1(k256::ecdsa::SigningKey),
}

impl SigningKey {
    /// The scheme this key signs under.
    pub fn scheme(&self) -> SignatureScheme {
        match self {
            Self::Ed25519(_) => SignatureScheme::Ed25519,
            Self::EcdsaSecp256k1(_) => SignatureScheme::EcdsaSecp256k1,
        }
    }

    /// Construct from raw key bytes for the given scheme.
    ///
    /// Ed25519 accepts a 32-byte seed or a 64-byte seed+public pair;
    /// ECDSA secp256k1 accepts a 32-byte scalar.
    pub fn from_bytes(scheme: SignatureScheme, bytes: &[u8]) -> Result<Self, CryptoError> {
        match scheme {
            SignatureScheme::Ed25519 => match bytes.len() {
                32 => {
                    let seed: [u8; 32] = bytes
                        .try_into()
                        .map_err(|_| CryptoError::KeyMalformed("bad ed25519 seed".into()))?;
                    Ok(Self::Ed25519(ed25519_dalek::SigningKey::from_bytes(&seed)))
                }
                64 => {
                    let pair: [u8; 64] = bytes
                        .try_into()
                        .map_err(|_| CryptoError::KeyMalformed("bad ed25519 keypair".into()))?;
                    ed25519_dalek::SigningKey::from_keypair_bytes(&pair)
                        .map(Self::Ed25519)
                        .map_err(|e| CryptoError::KeyMalformed(format!("inconsistent ed25519 keypair: {e}")))
                }
                actual => Err(CryptoError::InvalidKeyLength {
                    expected: 32,
                    actual,
                }),
            },
            SignatureScheme::EcdsaSecp256k1 => k256::ecdsa::SigningKey::from_slice(bytes)
                .map(Self::EcdsaSecp256k1)
                .map_err(|e| CryptoError::KeyMalformed(format!("bad secp256k1 scalar: {e}"))),
        }
    }

    /// Raw key bytes (the ed25519 seed, or the secp256k1 scalar).
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Ed25519(key) => key.to_bytes().to_vec(),
            Self::EcdsaSecp256k1(key) => key.to_bytes().to_vec(),
        }
    }

    /// The corresponding public verification key.
    pub fn verifying_key(&self) -> VerifyingKey {
        match self {
            Self::Ed25519(key) => VerifyingKey::Ed25519(key.verifying_key()),
            Self::EcdsaSecp256k1(key) => VerifyingKey::EcdsaSecp256k1(key.verifying_key().clone()),
        }
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, CryptoError> {
        match self {
            Self::Ed25519(key) => {
                let sig: ed25519_dalek::Signature = key
                    .try_sign(message)
                    .map_err(|e| CryptoError::SigningError(e.to_string()))?;
                Ok(Signature::from_bytes(sig.to_bytes().to_vec()))
            }
            Self::EcdsaSecp256k1(key) => {
                let sig: k256::ecdsa::Signature = key
                    .try_sign(message)
                    .map_err(|e| CryptoError::SigningError(e.to_string()))?;
                Ok(Signature::from_bytes(sig.to_bytes().to_vec()))
            }
        }
    }
}

impl std::fmt::Debug for SigningKey {
    /// Never prints key material.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("scheme", &self.scheme())
            .finish_non_exhaustive()
    }
}

/// A public verification key, tagged with its scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyingKey {
    Ed25519(ed25519_dalek::VerifyingKey),
    EcdsaSecp256k1(k256::ecdsa::VerifyingKey),
}

impl VerifyingKey {
    /// The scheme this key verifies under.
    pub fn scheme(&self) -> SignatureScheme {
        match self {
            Self::Ed25519(_) => SignatureScheme::Ed25519,
            Self::EcdsaSecp256k1(_) => SignatureScheme::EcdsaSecp256k1,
        }
    }

    /// Construct from raw key bytes for the given scheme.
    ///
    /// Ed25519 expects 32 compressed-point bytes; ECDSA secp256k1 expects a
    /// SEC1-encoded point (33 or 65 bytes).
    pub fn from_bytes(scheme: SignatureScheme, bytes: &[u8]) -> Result<Self, CryptoError> {
        match scheme {
            SignatureScheme::Ed25519 => {
                let raw: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                    expected: 32,
                    actual: bytes.len(),
                })?;
                ed25519_dalek::VerifyingKey::from_bytes(&raw)
                    .map(Self::Ed25519)
                    .map_err(|e| CryptoError::KeyMalformed(format!("bad ed25519 point: {e}")))
            }
            SignatureScheme::EcdsaSecp256k1 => k256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
                .map(Self::EcdsaSecp256k1)
                .map_err(|e| CryptoError::KeyMalformed(format!("bad SEC1 point: {e}"))),
        }
    }

    /// Raw key bytes (ed25519 compressed point, or compressed SEC1 point).
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Ed25519(key) => key.to_bytes().to_vec(),
            Self::EcdsaSecp256k1(key) => key.to_encoded_point(true).as_bytes().to_vec(),
        }
    }

    /// Verify a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        match self {
            Self::Ed25519(key) => {
                let raw: [u8; 64] = signature.as_bytes().try_into().map_err(|_| {
                    CryptoError::InvalidInput(format!(
                        "ed25519 signature must be 64 bytes, got {}",
                        signature.as_bytes().len()
                    ))
                })?;
                let sig = ed25519_dalek::Signature::from_bytes(&raw);
                key.verify(message, &sig)
                    .map_err(|_| CryptoError::SignatureVerificationFailed)
            }
            Self::EcdsaSecp256k1(key) => {
                let sig = k256::ecdsa::Signature::from_slice(signature.as_bytes())
                    .map_err(|e| CryptoError::InvalidInput(format!("bad ECDSA signature: {e}")))?;
                key.verify(message, &sig)
                    .map_err(|_| CryptoError::SignatureVerificationFailed)
            }
        }
    }
}

/// A signing/verification key pair.
#[derive(Debug, Clone)]
pub struct KeyPair {
    signing: SigningKey,
}

impl KeyPair {
    /// Generate a fresh key pair for the given scheme using the OS CSPRNG.
    pub fn generate(scheme: SignatureScheme) -> Self {
        let signing = match scheme {
            SignatureScheme::Ed25519 => {
                SigningKey::Ed25519(ed25519_dalek::SigningKey::generate(&mut OsRng))
            }
            SignatureScheme::EcdsaSecp256k1 => {
                SigningKey::EcdsaSecp256k1(k256::ecdsa::SigningKey::random(&mut OsRng))
            }
        };
        Self { signing }
    }

    /// Deterministic ed25519 key pair from a 32-byte seed.
    pub fn ed25519_from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing: SigningKey::Ed25519(ed25519_dalek::SigningKey::from_bytes(seed)),
        }
    }

    /// Wrap an existing signing key.
    pub fn from_signing_key(signing: SigningKey) -> Self {
        Self { signing }
    }

    /// The scheme of this pair.
    pub fn scheme(&self) -> SignatureScheme {
        self.signing.scheme()
    }

    /// The private half.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing
    }

    /// The public half.
    pub fn public_key(&self) -> VerifyingKey {
        self.signing.verifying_key()
    }
}
