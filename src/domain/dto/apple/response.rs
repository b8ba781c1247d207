//! Sign in with Apple 응답 DTO 모듈
//!
//! Apple 토큰 엔드포인트의 응답 본문과 클라이언트에 돌려주는 로그인 URL 응답을
//! 정의합니다.

use serde::{Deserialize, Serialize};

/// Apple 토큰 교환 응답
///
/// `POST https://appleid.apple.com/auth/token` 성공 시 반환되는 본문입니다.
#[derive(Debug, Clone, Deserialize)]
pub struct AppleTokenResponse {
    /// Apple 액세스 토큰
    pub access_token: String,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
    /// 토큰 만료 시간 (초 단위)
    pub expires_in: i64,
    /// 리프레시 토큰 (선택사항)
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// 사용자 정보를 담은 identity token (JWT)
    pub id_token: String,
}

/// OAuth 로그인 URL 응답
///
/// Apple 인가 페이지로의 리다이렉트 URL과 CSRF 방지용 state 값을 포함합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthLoginUrlResponse {
    /// Apple 인가 페이지 URL
    pub login_url: String,

    /// CSRF 방지용 state 파라미터
    ///
    /// 콜백에서 받은 state와 반드시 일치 확인해야 합니다.
    pub state: String,
}
