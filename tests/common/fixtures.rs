//! 단위 테스트와 통합 테스트가 함께 쓰는 키 픽스처
//!
//! 크레이트 타입에 의존하지 않으므로 `src/test_support.rs`와
//! `tests/common/mod.rs` 양쪽에서 모듈로 포함합니다.

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use rsa::RsaPrivateKey;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use serde_json::{Value, json};

pub const APP_ID: &str = "com.example.web";
pub const TEAM_ID: &str = "TEAM123456";
pub const CLIENT_ID: &str = "KEY1234567";
pub const CALLBACK_URL: &str = "https://example.com/api/v1/auth/apple/callback";
pub const APPLE_KID: &str = "W6WcOKB";
pub const SUBJECT: &str = "001234.8f2a6c1e5d3b4a7f9e0c.1234";

pub const CLIENT_SECRET_KEY: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/client_secret_key.p8"));
pub const CLIENT_SECRET_PUBLIC_KEY: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/client_secret_key.pub.pem"));
pub const UNRELATED_EC_PUBLIC_KEY: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/unrelated_ec_key.pub.pem"));
pub const APPLE_SIGNING_KEY: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/apple_signing_key.pem"));
pub const FORGED_SIGNING_KEY: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/forged_signing_key.pem"));
const APPLE_CERTIFICATE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/apple_signing_cert.der.b64"));

fn apple_private_key() -> RsaPrivateKey {
    RsaPrivateKey::from_pkcs1_pem(APPLE_SIGNING_KEY).unwrap()
}

/// 서명키의 base64url `(n, e)`
pub fn apple_key_components() -> (String, String) {
    let public_key = apple_private_key().to_public_key();
    (
        general_purpose::URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
        general_purpose::URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
    )
}

pub fn apple_public_key_pem() -> String {
    apple_private_key()
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .unwrap()
}

/// 같은 서명키로 만든 자체 서명 인증서 (base64 DER)
pub fn apple_certificate_base64() -> String {
    APPLE_CERTIFICATE.trim().to_string()
}

pub fn rsa_jwk(kid: &str) -> Value {
    let (n, e) = apple_key_components();
    json!({ "kty": "RSA", "kid": kid, "use": "sig", "alg": "RS256", "n": n, "e": e })
}

pub fn cert_jwk(kid: &str) -> Value {
    json!({
        "kty": "RSA",
        "kid": kid,
        "use": "sig",
        "alg": "RS256",
        "x5c": [apple_certificate_base64()]
    })
}

pub fn jwks_body(keys: Vec<Value>) -> String {
    json!({ "keys": keys }).to_string()
}

/// 한 시간 뒤 만료되는 정상 클레임
pub fn identity_claims() -> Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "iss": "https://appleid.apple.com",
        "aud": APP_ID,
        "sub": SUBJECT,
        "iat": now,
        "exp": now + 3600,
        "email": "jane@privaterelay.appleid.com",
        "email_verified": "true",
        "is_private_email": "true",
        "auth_time": now
    })
}

pub fn sign_identity_token(claims: &Value, kid: &str, private_key_pem: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());

    jsonwebtoken::encode(
        &header,
        claims,
        &EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).unwrap(),
    )
    .unwrap()
}
