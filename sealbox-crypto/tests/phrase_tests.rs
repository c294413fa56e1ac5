//! Tests for Argon2id code-phrase hashing.

use sealbox_crypto::{CryptoError, PhraseCost, PhraseHasher};

fn hasher() -> PhraseHasher {
    PhraseHasher::new(PhraseCost::fast())
}

#[test]
fn verify_accepts_correct_phrase() {
    let h = hasher();
    let encoded = h.hash("swordfish").unwrap();
    assert!(h.verify(&encoded, "swordfish").unwrap());
}

#[test]
fn verify_rejects_wrong_phrase() {
    let h = hasher();
    let encoded = h.hash("swordfish").unwrap();
    assert!(!h.verify(&encoded, "Swordfish").unwrap());
    assert!(!h.verify(&encoded, "").unwrap());
    assert!(!h.verify(&encoded, "swordfish ").unwrap());
}

#[test]
fn encoding_is_self_describing_phc() {
    let encoded = hasher().hash("phrase").unwrap();
    assert!(
        encoded.starts_with("$argon2id$"),
        "expected PHC string, got: {encoded}"
    );
    // Salt is embedded, so the raw phrase never appears.
    assert!(!encoded.contains("phrase"));
}

#[test]
fn same_phrase_hashes_differently_each_time() {
    let h = hasher();
    let a = h.hash("phrase").unwrap();
    let b = h.hash("phrase").unwrap();
    assert_ne!(a, b, "random salt must differ per hash");
}

#[test]
fn verify_works_across_cost_presets() {
    // Params live in the stored encoding, so a hasher configured with a
    // different cost must still verify older hashes.
    let encoded = PhraseHasher::new(PhraseCost::fast()).hash("phrase").unwrap();
    assert!(PhraseHasher::default().verify(&encoded, "phrase").unwrap());
}

#[test]
fn non_ascii_phrases_roundtrip() {
    let h = hasher();
    let encoded = h.hash("правильная лошадь 🐴").unwrap();
    assert!(h.verify(&encoded, "правильная лошадь 🐴").unwrap());
    assert!(!h.verify(&encoded, "правильная лошадь").unwrap());
}

#[test]
fn malformed_stored_hash_is_error_not_mismatch() {
    let err = hasher().verify("not-a-phc-string", "phrase").unwrap_err();
    assert!(matches!(err, CryptoError::Hash(_)), "got: {err:?}");
}
