//! Apple client secret 서명 서비스
//!
//! Apple 토큰 엔드포인트는 정적인 client secret 대신, Apple Developer 계정의
//! 개인키(.p8)로 서명한 ES256 JWT를 요구합니다.
//!
//! # 토큰 구조
//!
//! ```text
//! Header:  { "alg": "ES256", "kid": <APPLE_CLIENT_ID> }
//! Claims:  { "iss": <APPLE_TEAM_ID>, "aud": "https://appleid.apple.com",
//!            "sub": <APPLE_APP_ID>, "iat": now, "exp": now + 60 }
//! ```
//!
//! 유효 기간이 짧으므로 캐시하지 않고 토큰 교환마다 새로 서명합니다.
//!
//! # 키 준비
//!
//! ```bash
//! # Apple Developer > Keys 에서 받은 AuthKey_XXXXXXXXXX.p8 을 그대로 사용
//! export APPLE_CLIENT_SECRET="$(cat AuthKey_KEY1234567.p8)"
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::config::{APPLE_ISSUER, AppleProviderConfig};
use crate::errors::{AppError, AppResult};

/// client secret 유효 기간 (초)
pub const CLIENT_SECRET_TTL_SECONDS: i64 = 60;

/// client secret JWT 클레임
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSecretClaims {
    /// Team ID
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// 항상 `https://appleid.apple.com`
    pub aud: String,
    /// App ID (Services ID)
    pub sub: String,
}

/// ES256 client secret 서명기
///
/// 개인키는 생성 시 한 번 파싱하며, 잘못된 키는 이 시점에
/// [`AppError::ConfigurationError`]로 드러납니다.
pub struct ClientSecretService {
    team_id: String,
    app_id: String,
    key_id: String,
    encoding_key: EncodingKey,
}

impl ClientSecretService {
    pub fn new(config: &AppleProviderConfig) -> AppResult<Self> {
        let encoding_key = EncodingKey::from_ec_pem(config.client_secret.as_bytes())
            .map_err(|e| AppError::ConfigurationError(format!("invalid Apple private key: {}", e)))?;

        Ok(Self {
            team_id: config.team_id.clone(),
            app_id: config.app_id.clone(),
            key_id: config.client_id.clone(),
            encoding_key,
        })
    }

    /// 현재 시각 기준으로 새 client secret을 서명합니다.
    pub fn generate_client_secret(&self) -> AppResult<String> {
        self.generate_client_secret_at(Utc::now().timestamp())
    }

    pub fn generate_client_secret_at(&self, issued_at: i64) -> AppResult<String> {
        let claims = ClientSecretClaims {
            iss: self.team_id.clone(),
            iat: issued_at,
            exp: issued_at + CLIENT_SECRET_TTL_SECONDS,
            aud: APPLE_ISSUER.to_string(),
            sub: self.app_id.clone(),
        };

        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.key_id.clone());

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| AppError::ConfigurationError(format!("failed to sign client secret: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, APP_ID, CLIENT_ID, TEAM_ID};
    use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};

    fn service() -> ClientSecretService {
        ClientSecretService::new(&test_support::provider_config("http://127.0.0.1:1")).unwrap()
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::ES256);
        validation.set_audience(&[APPLE_ISSUER]);
        validation.set_issuer(&[TEAM_ID]);
        validation
    }

    #[test]
    fn test_client_secret_verifies_with_matching_public_key() {
        let token = service().generate_client_secret().unwrap();

        let key = DecodingKey::from_ec_pem(test_support::CLIENT_SECRET_PUBLIC_KEY.as_bytes()).unwrap();
        let data = decode::<ClientSecretClaims>(&token, &key, &validation()).unwrap();

        assert_eq!(data.claims.iss, TEAM_ID);
        assert_eq!(data.claims.sub, APP_ID);
        assert_eq!(data.claims.aud, "https://appleid.apple.com");
        assert_eq!(data.claims.exp - data.claims.iat, 60);
    }

    #[test]
    fn test_client_secret_header() {
        let token = service().generate_client_secret().unwrap();

        let header = decode_header(&token).unwrap();

        assert_eq!(header.alg, Algorithm::ES256);
        assert_eq!(header.kid.as_deref(), Some(CLIENT_ID));
    }

    #[test]
    fn test_client_secret_fails_with_unrelated_key() {
        let token = service().generate_client_secret().unwrap();

        let key = DecodingKey::from_ec_pem(test_support::UNRELATED_EC_PUBLIC_KEY.as_bytes()).unwrap();

        assert!(decode::<ClientSecretClaims>(&token, &key, &validation()).is_err());
    }

    #[test]
    fn test_each_call_signs_a_fresh_token() {
        let service = service();

        let first = service.generate_client_secret_at(1_700_000_000).unwrap();
        let second = service.generate_client_secret_at(1_700_000_030).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_private_key_is_configuration_error() {
        let mut config = test_support::provider_config("http://127.0.0.1:1");
        config.client_secret = "not a private key".to_string();

        let result = ClientSecretService::new(&config);

        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }
}
