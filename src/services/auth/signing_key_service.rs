//! Apple 서명키 조회 서비스
//!
//! identity token 헤더의 `kid`로 Apple 공개키(PEM)를 찾습니다.
//! 키 세트는 프로세스 수명 동안 [`KeyCache`]에 보관하며, 캐시 미스나
//! 만료 시에만 Apple JWKS 엔드포인트를 호출합니다.
//!
//! # 조회 흐름
//!
//! ```text
//! get_signing_key(kid)
//!   ├─ 캐시 적중 (max_age 이내) ──────────────► PEM 반환
//!   └─ 미스/만료
//!        ├─ 속도 제한 초과 ───────────────────► KeyFetchFailed
//!        ├─ GET /auth/keys 실패 ───────────────► KeyFetchFailed
//!        └─ 사용 가능한 키 전부 캐시에 저장
//!             ├─ kid 있음 ─────────────────────► PEM 반환
//!             └─ kid 없음 (키 교체 등) ─────────► SigningKeyNotFound
//! ```
//!
//! 동시에 여러 요청이 미스를 내면 키 세트를 중복 조회할 수 있습니다.
//! 락은 `.await` 너머로 잡지 않습니다.

use std::sync::Arc;
use std::time::{Duration, Instant};

use once_cell::sync::OnceCell;

use crate::caching::key_cache::{CachePolicy, FetchRateLimiter, KeyCache};
use crate::config::AppleProviderConfig;
use crate::domain::models::oauth::{JwkSet, SigningKey};
use crate::errors::{AppError, AppResult};

static SHARED_SIGNING_KEY_SERVICE: OnceCell<Arc<SigningKeyService>> = OnceCell::new();

/// kid → PEM 공개키 리졸버
pub struct SigningKeyService {
    keys_url: String,
    http: reqwest::Client,
    cache: KeyCache<String>,
    rate_limiter: FetchRateLimiter,
}

impl SigningKeyService {
    pub fn new(keys_url: impl Into<String>, policy: CachePolicy, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigurationError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            keys_url: keys_url.into(),
            http,
            rate_limiter: FetchRateLimiter::new(policy.requests_per_minute),
            cache: KeyCache::new(policy),
        })
    }

    pub fn from_config(config: &AppleProviderConfig) -> AppResult<Self> {
        Self::new(
            config.keys_url.clone(),
            config.key_cache_policy.clone(),
            config.http_timeout,
        )
    }

    /// 프로세스 전역 인스턴스
    ///
    /// 드라이버를 요청마다 만들어도 키 캐시는 하나를 공유합니다.
    /// 첫 호출의 설정으로 초기화되며 이후 호출의 설정은 무시됩니다.
    pub fn shared(config: &AppleProviderConfig) -> AppResult<Arc<Self>> {
        SHARED_SIGNING_KEY_SERVICE
            .get_or_try_init(|| Self::from_config(config).map(Arc::new))
            .cloned()
    }

    pub fn cache(&self) -> &KeyCache<String> {
        &self.cache
    }

    /// kid에 해당하는 PEM 공개키를 반환합니다.
    ///
    /// # Errors
    ///
    /// - `SigningKeyNotFound` - 최신 키 세트에도 kid가 없음
    /// - `KeyFetchFailed` - 네트워크 오류, 2xx가 아닌 응답, 해석할 수 없는 본문, 속도 제한 초과
    pub async fn get_signing_key(&self, kid: &str) -> AppResult<String> {
        if let Some(pem) = self.cache.get(kid) {
            log::debug!("Apple 서명키 캐시 적중: {}", kid);
            return Ok(pem);
        }

        let keys = self.fetch_keys().await?;

        keys.into_iter()
            .find(|(key_id, _)| key_id == kid)
            .map(|(_, pem)| pem)
            .ok_or_else(|| {
                log::warn!("⚠️ Apple 키 세트에 kid가 없습니다: {}", kid);
                AppError::SigningKeyNotFound(kid.to_string())
            })
    }

    async fn fetch_keys(&self) -> AppResult<Vec<(String, String)>> {
        if !self.rate_limiter.try_acquire() {
            log::warn!("⚠️ Apple 키 세트 조회 속도 제한 초과");
            return Err(AppError::KeyFetchFailed(
                "key set fetch rate limit exceeded".to_string(),
            ));
        }

        log::info!("🔑 Apple 서명키 세트 조회: {}", self.keys_url);

        let response = self
            .http
            .get(&self.keys_url)
            .send()
            .await
            .map_err(|e| AppError::KeyFetchFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::KeyFetchFailed(format!("HTTP {}", status)));
        }

        let key_set = response
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::KeyFetchFailed(format!("invalid key set body: {}", e)))?;

        let fetched_at = Instant::now();
        let mut keys = Vec::with_capacity(key_set.keys.len());

        for jwk in &key_set.keys {
            let Some(key) = SigningKey::from_jwk(jwk) else {
                log::debug!("서명에 사용할 수 없는 키 건너뜀: {:?}", jwk.kid);
                continue;
            };

            match key.public_key_pem() {
                Ok(pem) => {
                    self.cache.insert_at(key.kid.clone(), pem.clone(), fetched_at);
                    keys.push((key.kid, pem));
                }
                Err(e) => log::warn!("⚠️ {}", e),
            }
        }

        log::info!("✅ Apple 서명키 {}개 로드", keys.len());
        Ok(keys)
    }
}
