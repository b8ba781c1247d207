//! # 서명키 인메모리 캐시
//!
//! Apple JWKS에서 받은 공개키를 kid 기준으로 보관하는 프로세스 단위 캐시입니다.
//! 캐시 동작(최대 엔트리 수, 최대 보관 시간, 조회 속도 제한)은 외부 캐시
//! 라이브러리의 기본값에 맡기지 않고 [`CachePolicy`] 값 객체로 명시합니다.
//!
//! ## 동시성
//!
//! - `RwLock`은 맵 연산 동안에만 잡고 `.await` 너머로 들고 가지 않습니다.
//! - 동시에 캐시 미스가 나면 키 세트를 중복으로 가져올 수 있으며, 마지막 쓰기가 남습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::key_cache::{CachePolicy, KeyCache};
//!
//! let cache: KeyCache<String> = KeyCache::new(CachePolicy::default());
//! cache.insert("W6WcOKB".to_string(), public_key_pem);
//!
//! let cached = cache.get("W6WcOKB");
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

/// 기본 최대 엔트리 수
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// 기본 최대 보관 시간 (24시간)
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24);

/// 기본 분당 키 세트 조회 허용 횟수
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 10;

const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// 서명키 캐시 정책
///
/// 캐시 크기, 신선도, 그리고 장애 시 Apple 엔드포인트를 두드리지 않기 위한
/// 조회 속도 제한을 하나로 묶습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    /// 캐시에 보관할 최대 키 수
    pub max_entries: usize,
    /// 키를 신선하다고 간주하는 최대 시간
    pub max_age: Duration,
    /// 분당 키 세트 조회 허용 횟수 (`None`이면 제한 없음)
    pub requests_per_minute: Option<u32>,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_age: DEFAULT_MAX_AGE,
            requests_per_minute: Some(DEFAULT_REQUESTS_PER_MINUTE),
        }
    }
}

impl CachePolicy {
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_requests_per_minute(mut self, requests_per_minute: Option<u32>) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    fn is_fresh(&self, inserted_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(inserted_at) < self.max_age
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// kid → 값 캐시
///
/// 오래된 엔트리는 읽을 때 무시되고 다음 쓰기에서 정리됩니다.
/// 용량이 가득 차면 가장 먼저 들어온 엔트리부터 밀어냅니다.
#[derive(Debug)]
pub struct KeyCache<V> {
    policy: CachePolicy,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> KeyCache<V> {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// 신선한 엔트리가 있으면 복제해서 반환합니다.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        entries
            .get(key)
            .filter(|entry| self.policy.is_fresh(entry.inserted_at, now))
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: String, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn insert_at(&self, key: String, value: V, now: Instant) {
        if self.policy.max_entries == 0 {
            return;
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, entry| self.policy.is_fresh(entry.inserted_at, now));

        while entries.len() >= self.policy.max_entries && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(key, _)| key.clone());

            match oldest {
                Some(oldest) => {
                    entries.remove(&oldest);
                }
                None => break,
            }
        }

        entries.insert(key, CacheEntry { value, inserted_at: now });
    }

    /// 저장된 엔트리 수 (오래된 엔트리 포함)
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// 키 세트 조회 속도 제한기
///
/// 최근 1분 동안의 조회 시각을 기록하는 슬라이딩 윈도우 방식입니다.
#[derive(Debug)]
pub struct FetchRateLimiter {
    limit: Option<u32>,
    hits: Mutex<VecDeque<Instant>>,
}

impl FetchRateLimiter {
    pub fn new(requests_per_minute: Option<u32>) -> Self {
        Self {
            limit: requests_per_minute,
            hits: Mutex::new(VecDeque::new()),
        }
    }

    /// 조회가 허용되면 기록하고 `true`를 반환합니다.
    pub fn try_acquire(&self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    pub fn try_acquire_at(&self, now: Instant) -> bool {
        let Some(limit) = self.limit else {
            return true;
        };

        let mut hits = self.hits.lock().unwrap_or_else(PoisonError::into_inner);
        while let Some(&oldest) = hits.front() {
            if now.saturating_duration_since(oldest) >= RATE_LIMIT_WINDOW {
                hits.pop_front();
            } else {
                break;
            }
        }

        if hits.len() >= limit as usize {
            return false;
        }

        hits.push_back(now);
        true
    }
}
