use super::*;
use crate::test_support::jwt;

#[test]
fn decode_claims_reads_sub_and_exp() {
    let token = jwt(&serde_json::json!({ "sub": "alice", "exp": 1_700_000_000 }));
    let claims = decode_claims(&token).expect("claims");
    assert_eq!(claims.sub, Some(serde_json::json!("alice")));
    assert_eq!(claims.exp, Some(1_700_000_000.0));
}

#[test]
fn decode_claims_accepts_padded_payload() {
    let token = jwt(&serde_json::json!({ "sub": "ab" }));
    let mut parts: Vec<&str> = token.split('.').collect();
    let padded = format!("{}==", parts[1]);
    parts[1] = &padded;
    let claims = decode_claims(&parts.join(".")).expect("claims");
    assert_eq!(claims.sub, Some(serde_json::json!("ab")));
}

#[test]
fn decode_claims_rejects_wrong_segment_count() {
    assert!(matches!(decode_claims("opaque"), Err(TokenError::Malformed)));
    assert!(matches!(decode_claims("a.b"), Err(TokenError::Malformed)));
    assert!(matches!(decode_claims("a.b.c.d"), Err(TokenError::Malformed)));
}

#[test]
fn decode_claims_rejects_non_json_payload() {
    let payload = URL_SAFE_NO_PAD.encode(b"not json");
    let err = decode_claims(&format!("h.{payload}.s")).expect_err("should fail");
    assert!(matches!(err, TokenError::Claims(_)));
}

#[test]
fn decode_claims_rejects_bad_base64() {
    let err = decode_claims("h.!!!.s").expect_err("should fail");
    assert!(matches!(err, TokenError::Encoding(_)));
}

#[test]
fn token_expiring_now_is_still_valid() {
    let token = jwt(&serde_json::json!({ "exp": 100 }));
    assert!(is_unexpired(&token, 100));
    assert!(!is_unexpired(&token, 101));
}

#[test]
fn token_without_exp_never_expires() {
    let token = jwt(&serde_json::json!({ "sub": "bob" }));
    assert!(is_unexpired(&token, i64::MAX));
}

#[test]
fn enforce_policy_rejects_expired_and_garbage_tokens() {
    let expired = jwt(&serde_json::json!({ "exp": 10 }));
    assert!(!is_valid(&expired, 11, ExpiryPolicy::Enforce));
    assert!(!is_valid("garbage", 0, ExpiryPolicy::Enforce));
}

#[test]
fn ignore_policy_accepts_any_non_empty_token() {
    let expired = jwt(&serde_json::json!({ "exp": 10 }));
    assert!(is_valid(&expired, 11, ExpiryPolicy::Ignore));
    assert!(is_valid("garbage", 0, ExpiryPolicy::Ignore));
    assert!(!is_valid("", 0, ExpiryPolicy::Ignore));
}

#[test]
fn numeric_subject_is_accepted() {
    let token = jwt(&serde_json::json!({ "sub": 42, "exp": 4_102_444_800_i64 }));
    let claims = decode_claims(&token).expect("claims");
    assert_eq!(claims.sub, Some(serde_json::json!(42)));
    assert!(is_valid(&token, 1_700_000_000, ExpiryPolicy::Enforce));
}

#[test]
fn fractional_exp_is_compared_numerically() {
    let token = jwt(&serde_json::json!({ "sub": "a", "exp": 100.5 }));
    assert!(is_unexpired(&token, 100));
    assert!(!is_unexpired(&token, 101));
    let far = jwt(&serde_json::json!({ "sub": "a", "exp": 4_102_444_800.5 }));
    assert!(is_valid(&far, 1_700_000_000, ExpiryPolicy::Enforce));
}

#[test]
fn non_object_payload_has_no_claims() {
    let token = jwt(&serde_json::json!("just a string"));
    assert_eq!(decode_claims(&token).expect("claims"), TokenClaims { sub: None, exp: None });
    assert!(is_unexpired(&token, i64::MAX));
}

#[test]
fn non_numeric_exp_is_ignored() {
    let token = jwt(&serde_json::json!({ "exp": "soon" }));
    assert_eq!(decode_claims(&token).expect("claims").exp, None);
}
