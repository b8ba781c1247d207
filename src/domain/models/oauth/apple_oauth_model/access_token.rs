//! 토큰 교환 결과 모델

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::dto::apple::response::AppleTokenResponse;
use crate::errors::{AppError, AppResult};

/// Apple 토큰 엔드포인트에서 받은 토큰 묶음
///
/// `expires_at`은 응답을 받은 시각에 `expires_in`을 더한 절대 시각입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppleAccessToken {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub id_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}

impl AppleAccessToken {
    /// `expires_in`이 시각 범위를 벗어나면 `TokenExchangeFailed` 입니다.
    pub fn from_response(response: AppleTokenResponse, fetched_at: DateTime<Utc>) -> AppResult<Self> {
        let expires_at = TimeDelta::try_seconds(response.expires_in)
            .and_then(|lifetime| fetched_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::TokenExchangeFailed(format!(
                    "expires_in out of range: {}",
                    response.expires_in
                ))
            })?;

        Ok(Self {
            expires_at,
            token: response.access_token,
            token_type: response.token_type.to_lowercase(),
            id_token: response.id_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
