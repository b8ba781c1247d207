//! 통합 테스트 공용 픽스처

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use std::sync::Arc;

use apple_auth_driver::caching::key_cache::CachePolicy;
use apple_auth_driver::config::AppleProviderConfig;
use apple_auth_driver::services::auth::{AppleAuthService, SigningKeyService};

/// 모든 Apple 엔드포인트를 `server_url` 아래로 돌린 드라이버
pub fn apple_auth_service(server_url: &str) -> AppleAuthService {
    let config = AppleProviderConfig::new(APP_ID, TEAM_ID, CLIENT_ID, CLIENT_SECRET_KEY, CALLBACK_URL)
        .with_endpoints(
            format!("{}/auth/authorize", server_url),
            format!("{}/auth/token", server_url),
            format!("{}/auth/keys", server_url),
        )
        .with_key_cache_policy(CachePolicy::default().with_requests_per_minute(None));

    let signing_keys = SigningKeyService::from_config(&config).unwrap();
    AppleAuthService::new(config, Arc::new(signing_keys)).unwrap()
}
