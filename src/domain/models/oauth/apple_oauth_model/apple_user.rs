//! 정규화된 Apple 사용자 모델

use serde::{Deserialize, Serialize};

use super::id_token_claims::AppleIdTokenClaims;

/// 토큰 타입 문자열
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// 이메일 인증 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailVerificationState {
    Verified,
    Unverified,
}

/// 호출자가 직접 제공한 identity token
///
/// 토큰 교환 없이 사용자 정보를 얻는 경우(`user_from_token`) 사용자에 붙는 토큰입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerToken {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: BEARER_TOKEN_TYPE.to_string(),
        }
    }
}

/// 검증된 identity token에서 만든 사용자 레코드
///
/// 서명, issuer, audience 검증을 통과한 클레임으로만 만들어집니다.
/// `T`는 사용자를 얻을 때 쓰인 토큰으로, 인가 코드 플로우에서는
/// `AppleAccessToken`, 토큰 직접 검증에서는 [`BearerToken`] 입니다.
#[derive(Debug, Clone, Serialize)]
pub struct AppleUser<T> {
    /// Apple 사용자 식별자 (`sub`)
    pub id: String,
    /// Apple은 닉네임을 제공하지 않아 `sub`를 그대로 사용
    pub nick_name: String,
    /// `"First Last"`, 이름 정보가 없으면 빈 문자열
    pub name: String,
    pub email: Option<String>,
    pub email_verification_state: EmailVerificationState,
    /// Apple은 프로필 이미지를 제공하지 않음
    pub avatar_url: Option<String>,
    /// 검증된 원본 클레임
    pub original: AppleIdTokenClaims,
    pub token: T,
}
