//! Sign in with Apple 요청 DTO 모듈

use serde::Deserialize;
use validator::Validate;

use crate::domain::models::oauth::AuthorizationState;

/// Apple `form_post` 콜백 본문
///
/// `user`는 최초 인가 시에만 전달되는 JSON 문자열입니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppleCallbackForm {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

impl AppleCallbackForm {
    /// 저장해 둔 state와 합쳐 콜백 스냅샷을 만듭니다.
    pub fn into_authorization_state(self, stored_state: Option<String>) -> AuthorizationState {
        AuthorizationState::new(self.code, self.state, self.error, stored_state)
    }
}

/// identity token 직접 검증 요청
///
/// 네이티브 앱처럼 클라이언트가 이미 identity token을 받은 경우 사용합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IdTokenRequest {
    #[validate(length(min = 1, message = "id_token is required"))]
    pub id_token: String,
}
