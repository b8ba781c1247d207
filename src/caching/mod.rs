//! 캐싱 계층 모듈
//!
//! Apple 서명키(JWKS)를 위한 프로세스 내 캐시와 조회 속도 제한을 제공합니다.
//!
//! # 주요 기능
//!
//! - kid 기준 키 캐시 ([`key_cache::KeyCache`])
//! - 최대 엔트리 수 / 최대 보관 시간 정책 ([`key_cache::CachePolicy`])
//! - 분당 조회 횟수 제한 ([`key_cache::FetchRateLimiter`])
//!
//! # 환경 설정
//!
//! ```bash
//! APPLE_JWKS_CACHE_MAX_ENTRIES=100         # 기본값
//! APPLE_JWKS_CACHE_MAX_AGE_SECONDS=86400   # 기본값 (24시간)
//! APPLE_JWKS_REQUESTS_PER_MINUTE=10        # 기본값, 0이면 제한 없음
//! ```

pub mod key_cache;

pub use key_cache::*;
