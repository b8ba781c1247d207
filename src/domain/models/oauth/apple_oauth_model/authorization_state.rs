//! 인가 콜백 상태
//!
//! Apple이 `form_post`로 돌려보낸 `code`, `state`, `error`와 호스트가 리다이렉트
//! 직전에 저장해 둔 state를 요청 단위 스냅샷으로 묶습니다. 호스트 프레임워크는
//! [`AuthorizationCallback`]만 구현하면 되고, 쿠키나 세션 같은 저장 방식은
//! 드라이버가 알지 못합니다.

/// 사용자가 동의 화면에서 취소했을 때 Apple이 보내는 에러 코드
pub const USER_DENIED_ERROR: &str = "user_denied";

/// 호스트가 제공하는 콜백 요청 뷰
pub trait AuthorizationCallback {
    fn code(&self) -> Option<&str>;
    fn error(&self) -> Option<&str>;
    fn state(&self) -> Option<&str>;
    /// 리다이렉트 시 저장해 둔 state
    fn stored_state(&self) -> Option<&str>;
}

/// 콜백 요청의 읽기 전용 스냅샷
///
/// 빈 문자열은 값이 없는 것으로 취급합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationState {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    stored_state: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl AuthorizationState {
    pub fn new(
        code: Option<String>,
        state: Option<String>,
        error: Option<String>,
        stored_state: Option<String>,
    ) -> Self {
        Self {
            code: non_empty(code),
            state: non_empty(state),
            error: non_empty(error),
            stored_state: non_empty(stored_state),
        }
    }

    pub fn from_callback(callback: &impl AuthorizationCallback) -> Self {
        Self::new(
            callback.code().map(str::to_string),
            callback.state().map(str::to_string),
            callback.error().map(str::to_string),
            callback.stored_state().map(str::to_string),
        )
    }

    /// 사용자가 인가를 거부했는지 여부
    pub fn access_denied(&self) -> bool {
        self.error.as_deref() == Some(USER_DENIED_ERROR)
    }

    /// 에러가 있거나 code가 없으면 참
    pub fn has_error(&self) -> bool {
        self.error.is_some() || self.code.is_none()
    }

    /// 저장된 state와 받은 state 중 하나라도 없거나 서로 다르면 참
    ///
    /// stateless 모드에서는 항상 거짓입니다.
    pub fn state_mismatch(&self, stateless: bool) -> bool {
        if stateless {
            return false;
        }

        match (&self.stored_state, &self.state) {
            (Some(stored), Some(received)) => stored != received,
            _ => true,
        }
    }
}

impl AuthorizationCallback for AuthorizationState {
    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    fn stored_state(&self) -> Option<&str> {
        self.stored_state.as_deref()
    }
}
