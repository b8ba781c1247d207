//! 단위 테스트 공용 픽스처
//!
//! 키 픽스처는 통합 테스트와 같은 `tests/common/fixtures.rs`를 사용합니다.

#[path = "../tests/common/fixtures.rs"]
mod fixtures;

pub use fixtures::*;

use crate::caching::key_cache::CachePolicy;
use crate::config::AppleProviderConfig;

/// 모든 Apple 엔드포인트를 `server_url` 아래로 돌린 설정
pub fn provider_config(server_url: &str) -> AppleProviderConfig {
    AppleProviderConfig::new(APP_ID, TEAM_ID, CLIENT_ID, CLIENT_SECRET_KEY, CALLBACK_URL)
        .with_endpoints(
            format!("{}/auth/authorize", server_url),
            format!("{}/auth/token", server_url),
            format!("{}/auth/keys", server_url),
        )
        .with_key_cache_policy(CachePolicy::default().with_requests_per_minute(None))
}
