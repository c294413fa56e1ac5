//! End-to-end tests for the one-time-secret lifecycle: exactly-once
//! disclosure, the wrong-phrase self-loop, the no-oracle NotFound
//! category, and TTL expiry.

use sealbox_core::{MasterKey, MemoryStore, SecretError, Secrets, SecretsConfig};
use std::sync::Arc;
use std::time::Duration;

fn engine() -> Secrets {
    Secrets::new(
        Arc::new(MemoryStore::new()),
        MasterKey::generate(),
        SecretsConfig::fast(),
    )
}

#[tokio::test]
async fn deposit_then_disclose_exactly_once() {
    let engine = engine();
    let key = engine.create("the payload", "open sesame", None).await.unwrap();

    assert_eq!(engine.retrieve(&key, "open sesame").await.unwrap(), "the payload");

    let err = engine.retrieve(&key, "open sesame").await.unwrap_err();
    assert!(matches!(err, SecretError::NotFound), "got: {err:?}");
}

#[tokio::test]
async fn scenario_launch_codes() {
    let engine = engine();
    let key = engine.create("launch codes", "swordfish", None).await.unwrap();

    assert!(matches!(
        engine.retrieve(&key, "wrong").await,
        Err(SecretError::WrongPhrase)
    ));
    assert_eq!(engine.retrieve(&key, "swordfish").await.unwrap(), "launch codes");
    assert!(matches!(
        engine.retrieve(&key, "swordfish").await,
        Err(SecretError::NotFound)
    ));
}

#[tokio::test]
async fn wrong_phrase_leaves_secret_retrievable() {
    let engine = engine();
    let key = engine.create("payload", "correct", None).await.unwrap();

    for _ in 0..3 {
        assert!(matches!(
            engine.retrieve(&key, "incorrect").await,
            Err(SecretError::WrongPhrase)
        ));
    }
    assert_eq!(engine.retrieve(&key, "correct").await.unwrap(), "payload");
}

#[tokio::test]
async fn unknown_key_is_indistinguishable_from_consumed() {
    let engine = engine();
    let key = engine.create("payload", "phrase", None).await.unwrap();
    engine.retrieve(&key, "phrase").await.unwrap();

    let consumed = engine.retrieve(&key, "phrase").await.unwrap_err();
    let unknown = engine
        .retrieve(&"A".repeat(32), "phrase")
        .await
        .unwrap_err();

    assert!(matches!(consumed, SecretError::NotFound));
    assert!(matches!(unknown, SecretError::NotFound));
    // Same category AND same message — no existence oracle.
    assert_eq!(consumed.to_string(), unknown.to_string());
    assert_eq!(unknown.to_string(), "wrong secret key");
}

#[tokio::test]
async fn malformed_key_is_not_found() {
    let engine = engine();
    for key in ["", "short", "has spaces has spaces has space!", "ключключключключключключключключ"] {
        let err = engine.retrieve(key, "phrase").await.unwrap_err();
        assert!(matches!(err, SecretError::NotFound), "key {key:?}: {err:?}");
    }
}

#[tokio::test]
async fn generated_key_shape() {
    let engine = engine();
    let key = engine.create("payload", "phrase", None).await.unwrap();
    assert_eq!(key.len(), 32);
    assert!(key.bytes().all(|b| b.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn non_ascii_secret_and_phrase_roundtrip() {
    let engine = engine();
    let key = engine
        .create("секретный план 🚀", "правильная лошадь", None)
        .await
        .unwrap();
    assert_eq!(
        engine.retrieve(&key, "правильная лошадь").await.unwrap(),
        "секретный план 🚀"
    );
}

#[tokio::test]
async fn create_validation_rejections() {
    let engine = engine();

    for (secret, phrase, ttl) in [
        ("", "phrase", None),
        ("secret", "", None),
        ("secret", "phrase", Some(0)),
    ] {
        let err = engine.create(secret, phrase, ttl).await.unwrap_err();
        assert!(matches!(err, SecretError::Validation(_)), "got: {err:?}");
    }

    let oversized = "a".repeat(SecretsConfig::fast().max_secret_bytes + 1);
    let err = engine.create(&oversized, "phrase", None).await.unwrap_err();
    assert!(matches!(err, SecretError::Validation(_)));
}

#[tokio::test]
async fn unstampable_ttl_is_a_validation_error() {
    let engine = engine();

    // Lifetimes the clock cannot represent must be rejected up front,
    // never panic or surface as an internal storage fault.
    for ttl in [100_000_000_000_000, u64::MAX] {
        let err = engine.create("secret", "phrase", Some(ttl)).await.unwrap_err();
        assert!(matches!(err, SecretError::Validation(_)), "ttl {ttl}: {err:?}");
    }
}

#[tokio::test]
async fn retrieve_rejects_empty_phrase() {
    let engine = engine();
    let key = engine.create("payload", "phrase", None).await.unwrap();
    let err = engine.retrieve(&key, "").await.unwrap_err();
    assert!(matches!(err, SecretError::Validation(_)));
    // And the record is untouched.
    assert_eq!(engine.retrieve(&key, "phrase").await.unwrap(), "payload");
}

#[tokio::test]
async fn ttl_secret_vanishes_without_retrieval() {
    let store = MemoryStore::new();
    let engine = Secrets::new(
        Arc::new(store.clone()),
        MasterKey::generate(),
        SecretsConfig::fast(),
    );
    let sweeper = engine.spawn_sweeper();

    let key = engine.create("ephemeral", "phrase", Some(1)).await.unwrap();

    tokio::time::sleep(Duration::from_millis(2500)).await;

    // The sweeper physically removed the record, not just hid it.
    assert!(store.is_empty().await);
    assert!(matches!(
        engine.retrieve(&key, "phrase").await,
        Err(SecretError::NotFound)
    ));
    sweeper.shutdown().await;
}

#[tokio::test]
async fn ttl_secret_is_hidden_even_without_sweeper() {
    let engine = engine();
    let key = engine.create("ephemeral", "phrase", Some(1)).await.unwrap();

    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert!(matches!(
        engine.retrieve(&key, "phrase").await,
        Err(SecretError::NotFound)
    ));
}

#[tokio::test]
async fn ttl_secret_retrievable_before_expiry() {
    let engine = engine();
    let key = engine.create("payload", "phrase", Some(3600)).await.unwrap();
    assert_eq!(engine.retrieve(&key, "phrase").await.unwrap(), "payload");
}

#[tokio::test]
async fn error_categories() {
    assert!(!SecretError::NotFound.is_internal());
    assert!(!SecretError::WrongPhrase.is_internal());
    assert!(!SecretError::Validation("x".into()).is_internal());
    assert!(SecretError::KeySpaceExhausted { attempts: 5 }.is_internal());
    assert!(SecretError::Integrity.is_internal());
    assert!(SecretError::Task("x".into()).is_internal());
}
