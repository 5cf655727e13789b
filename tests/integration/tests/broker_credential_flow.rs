//! Integration test: broker onboarding and credential flow across crates.
//!
//! Exercises DID derivation, DID document construction, credential
//! issuance, and verification together, the way the registration and
//! login paths consume them.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use realty_crypto::{KeyPair, SignatureScheme, StaticKeyProvider};
use realty_did::{derive_did, DidDocument};
use realty_vc::{
    CredentialIssuer, CredentialVerifier, IssuerConfig, RejectReason, VerifiableCredential,
    Verdict,
};

const ISSUER_DID: &str = "did:realestate:platform-issuer";

/// Helper: issuer and verifier sharing one static key provider.
fn trust_layer(scheme: SignatureScheme) -> (CredentialIssuer, CredentialVerifier) {
    let provider = Arc::new(StaticKeyProvider::new().with_issuer(KeyPair::generate(scheme)));
    let config = IssuerConfig::new(ISSUER_DID, scheme);
    (
        CredentialIssuer::new(config.clone(), provider.clone()),
        CredentialVerifier::new(config, provider),
    )
}

fn kim_jungsang_claims(fraud_status: &str) -> BTreeMap<String, Value> {
    [
        ("licenseNumber".to_string(), json!("110-2025-00001")),
        ("isLicensedBroker".to_string(), json!(true)),
        ("fraudConvictionRecordStatus".to_string(), json!(fraud_status)),
    ]
    .into_iter()
    .collect()
}

// =========================================================================
// Broker registration: key → DID → DID document
// =========================================================================

#[test]
fn test_did_matches_sha256_of_public_key() {
    // Scenario A, identifier half: did:realestate:<sha256-hex(b1)>.
    let b1 = [0x42u8; 32];
    let expected = format!("did:realestate:{}", hex::encode(Sha256::digest(b1)));
    assert_eq!(derive_did(&b1), expected);
    assert_eq!(derive_did(&b1), derive_did(&b1));
}

#[test]
fn test_registration_produces_stable_document() {
    let broker = KeyPair::generate(SignatureScheme::Ed25519);
    let key_bytes = broker.public_key().to_bytes();
    let did = derive_did(&key_bytes);

    let doc = DidDocument::for_key(&did, &key_bytes, "Ed25519VerificationKey2020");
    assert_eq!(doc.id, did);
    assert_eq!(doc.authentication, vec![format!("{did}#key-1")]);

    // Persisting and re-deriving yields the identical document.
    let stored = doc.to_json().unwrap();
    let rebuilt = DidDocument::for_key(&did, &key_bytes, "Ed25519VerificationKey2020");
    assert_eq!(DidDocument::from_json(&stored).unwrap(), rebuilt);
}

// =========================================================================
// Issuance → verification round trips
// =========================================================================

#[test]
fn test_licensed_broker_credential_accepted() {
    // Scenario A, credential half.
    let (issuer, verifier) = trust_layer(SignatureScheme::Ed25519);
    let broker_did = derive_did(&[0x42u8; 32]);

    let json = issuer
        .issue_json(&broker_did, "Kim Jungsang", kim_jungsang_claims("None"))
        .unwrap();
    assert_eq!(verifier.verify(&json).unwrap(), Verdict::Accepted);

    // Claims survive the round trip: caller claims merged over defaults.
    let vc = VerifiableCredential::from_json(&json).unwrap();
    let subject = &vc.credential_subject;
    assert_eq!(subject.id, broker_did);
    assert_eq!(subject.name, "Kim Jungsang");
    assert_eq!(subject.license_number.as_deref(), Some("110-2025-00001"));
    assert_eq!(subject.is_licensed_broker, Some(true));
    assert_eq!(subject.fraud_conviction_record_status.as_deref(), Some("None"));
}

#[test]
fn test_roundtrip_under_ecdsa_scheme() {
    let (issuer, verifier) = trust_layer(SignatureScheme::EcdsaSecp256k1);
    let json = issuer
        .issue_json("did:realestate:broker", "Kim Jungsang", kim_jungsang_claims("None"))
        .unwrap();
    assert_eq!(verifier.verify(&json).unwrap(), Verdict::Accepted);
}

#[test]
fn test_json_key_order_does_not_affect_verification() {
    // Transport may reorder object keys; the verifier reconstructs the
    // canonical payload from the parsed credential, not the wire bytes.
    let (issuer, verifier) = trust_layer(SignatureScheme::Ed25519);
    let json = issuer
        .issue_json("did:realestate:broker", "Kim Jungsang", kim_jungsang_claims("None"))
        .unwrap();

    let reordered: Value = serde_json::from_str(&json).unwrap();
    let reordered_json = serde_json::to_string(&reordered).unwrap();
    assert_eq!(verifier.verify(&reordered_json).unwrap(), Verdict::Accepted);
}

// =========================================================================
// Rejection scenarios
// =========================================================================

#[test]
fn test_fraud_record_blocks_login() {
    // Scenario B: same subject, fraudConvictionRecordStatus = "Exists".
    let (issuer, verifier) = trust_layer(SignatureScheme::Ed25519);
    let json = issuer
        .issue_json("did:realestate:broker", "Kim Jungsang", kim_jungsang_claims("Exists"))
        .unwrap();
    assert_eq!(
        verifier.verify(&json).unwrap(),
        Verdict::Rejected(RejectReason::DisqualifyingRecord)
    );
}

#[test]
fn test_stripped_proof_rejected() {
    // Scenario C: the proof object removed from the credential JSON.
    let (issuer, verifier) = trust_layer(SignatureScheme::Ed25519);
    let json = issuer
        .issue_json("did:realestate:broker", "Kim Jungsang", kim_jungsang_claims("None"))
        .unwrap();

    let mut value: Value = serde_json::from_str(&json).unwrap();
    value.as_object_mut().unwrap().remove("proof");
    let stripped = serde_json::to_string(&value).unwrap();

    assert_eq!(
        verifier.verify(&stripped).unwrap(),
        Verdict::Rejected(RejectReason::MissingProof)
    );
}

#[test]
fn test_rebound_verification_method_rejected() {
    // Scenario D: valid signature, verificationMethod rewritten to another
    // issuer's key id.
    let (issuer, verifier) = trust_layer(SignatureScheme::Ed25519);
    let json = issuer
        .issue_json("did:realestate:broker", "Kim Jungsang", kim_jungsang_claims("None"))
        .unwrap();

    let mut value: Value = serde_json::from_str(&json).unwrap();
    value["proof"]["verificationMethod"] = json!("did:realestate:impostor#key-1");
    let rebound = serde_json::to_string(&value).unwrap();

    assert!(matches!(
        verifier.verify(&rebound).unwrap(),
        Verdict::Rejected(RejectReason::IssuerMismatch { .. })
    ));
}

#[test]
fn test_tampered_claim_rejected() {
    // Any post-signing change to credentialSubject invalidates the proof.
    let (issuer, verifier) = trust_layer(SignatureScheme::Ed25519);
    let json = issuer
        .issue_json("did:realestate:broker", "Kim Jungsang", kim_jungsang_claims("None"))
        .unwrap();

    let mut value: Value = serde_json::from_str(&json).unwrap();
    value["credentialSubject"]["licenseNumber"] = json!("110-2025-00002");
    let tampered = serde_json::to_string(&value).unwrap();

    assert_eq!(
        verifier.verify(&tampered).unwrap(),
        Verdict::Rejected(RejectReason::SignatureInvalid)
    );
}

#[test]
fn test_laundered_fraud_status_rejected_as_tampering() {
    // Editing "Exists" to "None" after signing fails the signature check,
    // not the policy check.
    let (issuer, verifier) = trust_layer(SignatureScheme::Ed25519);
    let json = issuer
        .issue_json("did:realestate:broker", "Kim Jungsang", kim_jungsang_claims("Exists"))
        .unwrap();

    let mut value: Value = serde_json::from_str(&json).unwrap();
    value["credentialSubject"]["fraudConvictionRecordStatus"] = json!("None");
    let laundered = serde_json::to_string(&value).unwrap();

    assert_eq!(
        verifier.verify(&laundered).unwrap(),
        Verdict::Rejected(RejectReason::SignatureInvalid)
    );
}

#[test]
fn test_expired_credential_blocks_login() {
    let (issuer, verifier) = trust_layer(SignatureScheme::Ed25519);
    let json = issuer
        .issue_with_expiration(
            "did:realestate:broker",
            "Kim Jungsang",
            kim_jungsang_claims("None"),
            Utc::now() - Duration::hours(1),
        )
        .unwrap()
        .to_json()
        .unwrap();
    assert_eq!(
        verifier.verify(&json).unwrap(),
        Verdict::Rejected(RejectReason::Expired)
    );
}

#[test]
fn test_mistyped_broker_flag_still_verifies() {
    // A non-bool isLicensedBroker travels as an extension claim and must
    // survive the wire round trip.
    let (issuer, verifier) = trust_layer(SignatureScheme::Ed25519);
    let mut claims = kim_jungsang_claims("None");
    claims.insert("isLicensedBroker".into(), json!("yes"));
    let json = issuer
        .issue_json("did:realestate:broker", "Kim Jungsang", claims)
        .unwrap();
    assert_eq!(verifier.verify(&json).unwrap(), Verdict::Accepted);
}

#[test]
fn test_credential_from_foreign_issuer_rejected() {
    // A complete, self-consistent credential from a different issuer DID
    // fails the verification-method binding.
    let provider = Arc::new(StaticKeyProvider::new().with_issuer(KeyPair::generate(
        SignatureScheme::Ed25519,
    )));
    let foreign = CredentialIssuer::new(
        IssuerConfig::new("did:realestate:foreign", SignatureScheme::Ed25519),
        provider.clone(),
    );
    let verifier = CredentialVerifier::new(
        IssuerConfig::new(ISSUER_DID, SignatureScheme::Ed25519),
        provider,
    );

    let json = foreign
        .issue_json("did:realestate:broker", "Kim Jungsang", kim_jungsang_claims("None"))
        .unwrap();
    assert!(matches!(
        verifier.verify(&json).unwrap(),
        Verdict::Rejected(RejectReason::IssuerMismatch { .. })
    ));
}

// =========================================================================
// Extension claims
// =========================================================================

#[test]
fn test_extension_claims_pass_through_and_verify() {
    let (issuer, verifier) = trust_layer(SignatureScheme::Ed25519);
    let mut claims = kim_jungsang_claims("None");
    claims.insert("phone".into(), json!("010-1234-5678"));
    claims.insert("agencyName".into(), json!("Seoul Estates"));
    claims.insert(
        "serviceArea".into(),
        json!({"city": "Seoul", "districts": ["Gangnam", "Seocho"]}),
    );

    let json = issuer
        .issue_json("did:realestate:broker", "Kim Jungsang", claims)
        .unwrap();
    assert_eq!(verifier.verify(&json).unwrap(), Verdict::Accepted);

    let vc = VerifiableCredential::from_json(&json).unwrap();
    assert_eq!(vc.credential_subject.phone.as_deref(), Some("010-1234-5678"));
    assert_eq!(
        vc.credential_subject.get_extra("agencyName"),
        Some(&json!("Seoul Estates"))
    );
    assert_eq!(
        vc.credential_subject.get_extra("serviceArea"),
        Some(&json!({"city": "Seoul", "districts": ["Gangnam", "Seocho"]}))
    );
}
