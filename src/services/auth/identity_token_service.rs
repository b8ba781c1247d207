//! Apple identity token 검증 서비스
//!
//! Apple이 발급한 identity token(JWT, RS256)을 Apple 공개키로 검증하고
//! 정규화된 사용자([`AppleUser`])로 변환합니다.
//!
//! # 검증 단계
//!
//! 1. 서명 검증 없이 헤더를 읽어 `kid` 추출
//! 2. [`SigningKeyService`]로 `kid`의 공개키 조회
//! 3. 서명, issuer(`https://appleid.apple.com`), audience(App ID), 만료 검증
//! 4. 클레임 반환
//!
//! 1~3 단계의 실패는 모두 [`AppError::TokenVerificationFailed`] 하나로 보고합니다.
//! 구체적인 사유는 로그에만 남습니다. 단, Apple 키 세트 조회 실패
//! ([`AppError::KeyFetchFailed`])는 토큰 문제가 아니므로 그대로 전달합니다.
//!
//! 만료 검증에는 clock leeway를 두지 않습니다.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};

use crate::config::APPLE_ISSUER;
use crate::domain::models::oauth::{AppleIdTokenClaims, AppleUser, EmailVerificationState};
use crate::errors::{AppError, AppResult};
use crate::services::auth::signing_key_service::SigningKeyService;

pub struct IdentityTokenService {
    app_id: String,
    signing_keys: Arc<SigningKeyService>,
}

impl IdentityTokenService {
    pub fn new(app_id: impl Into<String>, signing_keys: Arc<SigningKeyService>) -> Self {
        Self {
            app_id: app_id.into(),
            signing_keys,
        }
    }

    /// identity token을 검증하고 클레임을 반환합니다.
    pub async fn verify(&self, token: &str) -> AppResult<AppleIdTokenClaims> {
        let header = decode_header(token).map_err(|e| rejected(format!("malformed token: {}", e)))?;
        let kid = header.kid.ok_or_else(|| rejected("token header has no kid"))?;

        let pem = match self.signing_keys.get_signing_key(&kid).await {
            Ok(pem) => pem,
            Err(AppError::SigningKeyNotFound(kid)) => {
                return Err(rejected(format!("no signing key for kid {}", kid)));
            }
            Err(e) => return Err(e),
        };

        let key = DecodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| rejected(format!("unusable signing key {}: {}", kid, e)))?;

        decode::<AppleIdTokenClaims>(token, &key, &self.validation())
            .map(|data| data.claims)
            .map_err(rejected)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        validation.set_issuer(&[APPLE_ISSUER]);
        validation.set_audience(&[self.app_id.as_str()]);
        validation
    }
}

fn rejected(reason: impl std::fmt::Display) -> AppError {
    log::warn!("⚠️ Apple identity token 검증 실패: {}", reason);
    AppError::TokenVerificationFailed
}

/// 검증된 클레임을 정규화된 사용자로 변환합니다.
pub fn project_user<T>(claims: AppleIdTokenClaims, token: T) -> AppleUser<T> {
    let name = match (claims.first_name(), claims.last_name()) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        (Some(first), None) => first.to_string(),
        (None, Some(last)) => last.to_string(),
        (None, None) => String::new(),
    };

    let email_verification_state = if claims.is_email_verified() {
        EmailVerificationState::Verified
    } else {
        EmailVerificationState::Unverified
    };

    AppleUser {
        id: claims.sub.clone(),
        nick_name: claims.sub.clone(),
        name,
        email: claims.email.clone(),
        email_verification_state,
        avatar_url: None,
        original: claims,
        token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;

    use crate::caching::key_cache::CachePolicy;
    use crate::domain::models::oauth::{BearerToken, EmbeddedName, EmbeddedUserClaims};
    use crate::test_support::{self, APP_ID, APPLE_KID, SUBJECT};

    async fn keys_server() -> (mockito::ServerGuard, mockito::Mock) {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/auth/keys")
            .with_status(200)
            .with_body(test_support::jwks_body(vec![test_support::rsa_jwk(APPLE_KID)]))
            .create_async()
            .await;
        (server, mock)
    }

    fn verifier(server_url: &str) -> IdentityTokenService {
        let keys = SigningKeyService::new(
            format!("{}/auth/keys", server_url),
            CachePolicy::default().with_requests_per_minute(None),
            Duration::from_secs(5),
        )
        .unwrap();
        IdentityTokenService::new(APP_ID, Arc::new(keys))
    }

    fn claims_with_name(first: Option<&str>, last: Option<&str>) -> AppleIdTokenClaims {
        let mut claims: AppleIdTokenClaims =
            serde_json::from_value(test_support::identity_claims()).unwrap();
        claims.user = Some(EmbeddedUserClaims {
            name: Some(EmbeddedName {
                first_name: first.map(str::to_string),
                last_name: last.map(str::to_string),
            }),
            email: None,
        });
        claims
    }

    #[actix_web::test]
    async fn test_valid_token_returns_claims() {
        let (server, _mock) = keys_server().await;
        let token = test_support::sign_identity_token(
            &test_support::identity_claims(),
            APPLE_KID,
            test_support::APPLE_SIGNING_KEY,
        );

        let claims = verifier(&server.url()).verify(&token).await.unwrap();

        assert_eq!(claims.sub, SUBJECT);
        assert_eq!(claims.aud, APP_ID);
        assert!(claims.is_email_verified());
    }

    #[actix_web::test]
    async fn test_audience_mismatch_fails() {
        let (server, _mock) = keys_server().await;
        let mut claims = test_support::identity_claims();
        claims["aud"] = json!("com.other.app");
        let token = test_support::sign_identity_token(&claims, APPLE_KID, test_support::APPLE_SIGNING_KEY);

        let result = verifier(&server.url()).verify(&token).await;

        assert!(matches!(result, Err(AppError::TokenVerificationFailed)));
    }

    #[actix_web::test]
    async fn test_issuer_mismatch_fails() {
        let (server, _mock) = keys_server().await;
        let mut claims = test_support::identity_claims();
        claims["iss"] = json!("https://accounts.google.com");
        let token = test_support::sign_identity_token(&claims, APPLE_KID, test_support::APPLE_SIGNING_KEY);

        let result = verifier(&server.url()).verify(&token).await;

        assert!(matches!(result, Err(AppError::TokenVerificationFailed)));
    }

    #[actix_web::test]
    async fn test_expired_token_fails() {
        let (server, _mock) = keys_server().await;
        let mut claims = test_support::identity_claims();
        let now = chrono::Utc::now().timestamp();
        claims["iat"] = json!(now - 7200);
        claims["exp"] = json!(now - 3600);
        let token = test_support::sign_identity_token(&claims, APPLE_KID, test_support::APPLE_SIGNING_KEY);

        let result = verifier(&server.url()).verify(&token).await;

        assert!(matches!(result, Err(AppError::TokenVerificationFailed)));
    }

    #[actix_web::test]
    async fn test_recently_expired_token_fails() {
        let (server, _mock) = keys_server().await;
        let mut claims = test_support::identity_claims();
        let now = chrono::Utc::now().timestamp();
        claims["iat"] = json!(now - 600);
        claims["exp"] = json!(now - 30);
        let token = test_support::sign_identity_token(&claims, APPLE_KID, test_support::APPLE_SIGNING_KEY);

        let result = verifier(&server.url()).verify(&token).await;

        assert!(matches!(result, Err(AppError::TokenVerificationFailed)));
    }

    #[actix_web::test]
    async fn test_forged_signature_fails() {
        let (server, _mock) = keys_server().await;
        let token = test_support::sign_identity_token(
            &test_support::identity_claims(),
            APPLE_KID,
            test_support::FORGED_SIGNING_KEY,
        );

        let result = verifier(&server.url()).verify(&token).await;

        assert!(matches!(result, Err(AppError::TokenVerificationFailed)));
    }

    #[actix_web::test]
    async fn test_unknown_kid_fails() {
        let (server, _mock) = keys_server().await;
        let token = test_support::sign_identity_token(
            &test_support::identity_claims(),
            "rotated-kid",
            test_support::APPLE_SIGNING_KEY,
        );

        let result = verifier(&server.url()).verify(&token).await;

        assert!(matches!(result, Err(AppError::TokenVerificationFailed)));
    }

    #[actix_web::test]
    async fn test_malformed_token_fails_without_fetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/auth/keys")
            .expect(0)
            .create_async()
            .await;

        let result = verifier(&server.url()).verify("not-a-jwt").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(AppError::TokenVerificationFailed)));
    }

    #[actix_web::test]
    async fn test_key_fetch_failure_propagates() {
        let token = test_support::sign_identity_token(
            &test_support::identity_claims(),
            APPLE_KID,
            test_support::APPLE_SIGNING_KEY,
        );

        let result = verifier("http://127.0.0.1:1").verify(&token).await;

        assert!(matches!(result, Err(AppError::KeyFetchFailed(_))));
    }

    #[actix_web::test]
    async fn test_key_set_outage_propagates() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/auth/keys")
            .with_status(503)
            .create_async()
            .await;
        let token = test_support::sign_identity_token(
            &test_support::identity_claims(),
            APPLE_KID,
            test_support::APPLE_SIGNING_KEY,
        );

        let result = verifier(&server.url()).verify(&token).await;

        assert!(matches!(result, Err(AppError::KeyFetchFailed(_))));
    }

    #[test]
    fn test_project_user_name_from_both_parts() {
        let user = project_user(claims_with_name(Some("Jane"), Some("Appleseed")), ());

        assert_eq!(user.name, "Jane Appleseed");
    }

    #[test]
    fn test_project_user_name_from_first_only() {
        let user = project_user(claims_with_name(Some("Jane"), None), ());

        assert_eq!(user.name, "Jane");
    }

    #[test]
    fn test_project_user_without_name() {
        let claims: AppleIdTokenClaims =
            serde_json::from_value(test_support::identity_claims()).unwrap();

        let user = project_user(claims, BearerToken::new("eyJ.a.b"));

        assert_eq!(user.name, "");
        assert_eq!(user.id, SUBJECT);
        assert_eq!(user.nick_name, SUBJECT);
        assert_eq!(user.email.as_deref(), Some("jane@privaterelay.appleid.com"));
        assert_eq!(user.avatar_url, None);
        assert_eq!(user.token.token_type, "bearer");
    }

    #[test]
    fn test_project_user_email_verification() {
        let mut claims: AppleIdTokenClaims =
            serde_json::from_value(test_support::identity_claims()).unwrap();
        assert_eq!(
            project_user(claims.clone(), ()).email_verification_state,
            EmailVerificationState::Verified
        );

        claims.email_verified = Some(json!(true));
        assert_eq!(
            project_user(claims.clone(), ()).email_verification_state,
            EmailVerificationState::Unverified
        );

        claims.email_verified = None;
        assert_eq!(
            project_user(claims, ()).email_verification_state,
            EmailVerificationState::Unverified
        );
    }
}
