// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jitsi_token::jwt::{FixedClock, IssuerSettings, JoinRequest, JwtIssuer};
use jitsi_token::TokenCreationError;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};
use std::sync::Once;

static INIT: Once = Once::new();

/// Setup logger for tests
fn setup() {
    INIT.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .init();
    });
}

const SECRET: &[u8] = b"CHANGE_ME_TO_SECURE_RANDOM_STRING_MIN_32_CHARS";
const NOW: i64 = 1_700_000_000;

fn settings() -> IssuerSettings {
    IssuerSettings {
        issuer: "openemr".to_string(),
        audience: "openemr_telehealth".to_string(),
        subject: "telehealth.example.com".to_string(),
    }
}

fn issuer_at(now: i64) -> JwtIssuer {
    JwtIssuer::new(settings(), SECRET)
        .expect("Failed to create issuer")
        .with_clock(FixedClock(now))
}

/// Decode a JWT segment without verifying the signature
fn decode_segment(token: &str, index: usize) -> Value {
    let segment = token.split('.').nth(index).expect("Missing JWT segment");
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .expect("Segment is not base64url");
    serde_json::from_slice(&bytes).expect("Segment is not JSON")
}

#[test]
fn test_consultation_scenario() {
    setup();
    let request = JoinRequest::new(
        "patient-consultation-123",
        "Dr. Smith",
        "dr.smith@clinic.com",
        true,
    );
    let token = issuer_at(NOW).issue(&request).unwrap();

    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3, "JWT should have 3 segments");

    let header = decode_segment(&token, 0);
    assert_eq!(header["alg"], json!("HS256"));
    assert_eq!(header["typ"], json!("JWT"));

    let payload = decode_segment(&token, 1);
    assert_eq!(
        payload,
        json!({
            "iss": "openemr",
            "aud": "openemr_telehealth",
            "sub": "telehealth.example.com",
            "room": "patient-consultation-123",
            "context": {
                "user": {
                    "name": "Dr. Smith",
                    "email": "dr.smith@clinic.com",
                    "moderator": "true"
                }
            },
            "iat": 1_700_000_000,
            "exp": 1_700_003_600,
            "nbf": 1_699_999_990
        })
    );
}

#[test]
fn test_moderator_defaults_to_false_string() {
    let request = JoinRequest::new("room", "Nurse", "nurse@clinic.com", false);
    let payload = decode_segment(&issuer_at(NOW).issue(&request).unwrap(), 1);

    assert_eq!(payload["context"]["user"]["moderator"], json!("false"));
    assert!(payload["context"]["user"]["moderator"].is_string());
}

#[test]
fn test_time_invariants_hold_for_any_time() {
    let request = JoinRequest::new("room", "Alice", "alice@example.com", false);
    for now in [0, 1, 86_399, NOW, 4_102_444_800] {
        let payload = decode_segment(&issuer_at(now).issue(&request).unwrap(), 1);
        let iat = payload["iat"].as_i64().unwrap();
        let nbf = payload["nbf"].as_i64().unwrap();
        let exp = payload["exp"].as_i64().unwrap();

        assert_eq!(iat, now);
        assert!(nbf < iat && iat < exp);
        assert_eq!(exp - nbf, 3610);
    }
}

#[test]
fn test_identity_is_embedded_verbatim() {
    let cases = [
        ("Salle d'attente / Pédiatrie", "Dr. Zoë O'Brien", "not-an-email"),
        ("  spaced  ", "", "UPPER@CASE.ORG"),
        ("診察室-7", "山田 太郎", "yamada@例え.jp"),
    ];

    for (room, name, email) in cases {
        let request = JoinRequest::new(room, name, email, false);
        let payload = decode_segment(&issuer_at(NOW).issue(&request).unwrap(), 1);

        assert_eq!(payload["room"], json!(room));
        assert_eq!(payload["context"]["user"]["name"], json!(name));
        assert_eq!(payload["context"]["user"]["email"], json!(email));
    }
}

#[test]
fn test_tokens_are_deterministic() {
    let request = JoinRequest::new("room", "Alice", "alice@example.com", true);
    let first = issuer_at(NOW).issue(&request).unwrap();
    let second = issuer_at(NOW).issue(&request).unwrap();
    assert_eq!(first, second);

    let later = issuer_at(NOW + 1).issue(&request).unwrap();
    assert_ne!(first, later);
}

#[test]
fn test_signature_verifies_only_with_the_same_secret() {
    setup();
    let request = JoinRequest::new("room", "Alice", "alice@example.com", false);
    let token = issuer_at(NOW).issue(&request).unwrap();

    // Independent verification, as the conferencing server would do it
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.set_audience(&["openemr_telehealth"]);
    validation.set_issuer(&["openemr"]);

    let decoded = jsonwebtoken::decode::<Value>(
        &token,
        &DecodingKey::from_secret(SECRET),
        &validation,
    );
    assert!(decoded.is_ok(), "Should be able to verify the token");

    let wrong = jsonwebtoken::decode::<Value>(
        &token,
        &DecodingKey::from_secret(b"another-secret-of-the-same-kind-32!!"),
        &validation,
    );
    assert!(wrong.is_err(), "Verification with another secret must fail");

    // Same through the issuer's self-check
    let claims = issuer_at(NOW).verify(&token).unwrap();
    assert_eq!(claims.room, "room");
    assert!(!claims.is_moderator());

    let other = JwtIssuer::new(settings(), b"another-secret-of-the-same-kind-32!!")
        .unwrap()
        .with_clock(FixedClock(NOW));
    assert!(matches!(
        other.verify(&token),
        Err(TokenCreationError::VerificationError { .. })
    ));
}

#[test]
fn test_tampered_payload_is_rejected() {
    let request = JoinRequest::new("room", "Alice", "alice@example.com", false);
    let token = issuer_at(NOW).issue(&request).unwrap();

    let mut payload = decode_segment(&token, 1);
    payload["context"]["user"]["moderator"] = json!("true");
    let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());

    let parts: Vec<&str> = token.split('.').collect();
    let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
    assert!(issuer_at(NOW).verify(&forged).is_err());
}

#[test]
fn test_issuer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JwtIssuer>();

    let issuer = issuer_at(NOW);
    let expected = issuer
        .issue(&JoinRequest::new("room", "Alice", "alice@example.com", false))
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let issuer = issuer.clone();
            std::thread::spawn(move || {
                issuer
                    .issue(&JoinRequest::new("room", "Alice", "alice@example.com", false))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
