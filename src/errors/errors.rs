//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! Sign in with Apple 플로우에서 발생할 수 있는 실패를 하나의 열거형으로 모읍니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `AccessDenied` | 403 Forbidden | 사용자가 Apple 동의 화면에서 거부 |
//! | `MissingAuthorizationCode` | 400 Bad Request | 콜백에 code 없음 또는 error 포함 |
//! | `StateMismatch` | 400 Bad Request | CSRF state 불일치 |
//! | `SigningKeyNotFound` | 401 Unauthorized | JWKS에 해당 kid 없음 |
//! | `KeyFetchFailed` | 502 Bad Gateway | Apple JWKS 조회 실패 |
//! | `TokenVerificationFailed` | 401 Unauthorized | identity token 검증 실패 |
//! | `TokenExchangeFailed` | 502 Bad Gateway | Apple 토큰 엔드포인트 오류 |
//! | `ConfigurationError` | 500 Internal Server Error | 잘못된 설정/개인키 |
//! | `ValidationError` | 400 Bad Request | 요청 본문 검증 실패 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! let code = callback.code()
//!     .ok_or(AppError::MissingAuthorizationCode)?;
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 모든 변형은 호출자에게 그대로 전달되며, 익명 사용자로 대체되거나
/// 자동으로 재시도되지 않습니다. 재시도하려면 리다이렉트부터 다시 시작해야 합니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 사용자가 인증을 거부함 (`error=user_denied`, 403 Forbidden)
    #[error("Access denied: the user declined the authorization request")]
    AccessDenied,

    /// 콜백에 authorization code가 없음 (400 Bad Request)
    #[error("Missing authorization code")]
    MissingAuthorizationCode,

    /// CSRF state 파라미터가 없거나 저장된 값과 다름 (400 Bad Request)
    #[error("OAuth state mismatch")]
    StateMismatch,

    /// Apple 키 세트에 요청한 kid가 없음 (401 Unauthorized)
    #[error("Signing key not found for kid: {0}")]
    SigningKeyNotFound(String),

    /// Apple 키 세트 조회 실패 (502 Bad Gateway)
    #[error("Failed to fetch Apple signing keys: {0}")]
    KeyFetchFailed(String),

    /// identity token 서명/issuer/audience/만료 검증 실패 (401 Unauthorized)
    ///
    /// 실패 사유는 로그에만 남기고 호출자에게는 구분하지 않습니다.
    #[error("Identity token verification failed")]
    TokenVerificationFailed,

    /// Apple 토큰 엔드포인트가 2xx가 아닌 응답을 반환함 (502 Bad Gateway)
    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    /// 설정값 또는 개인키 오류 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::MissingAuthorizationCode
            | AppError::StateMismatch
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::SigningKeyNotFound(_) | AppError::TokenVerificationFailed => {
                StatusCode::UNAUTHORIZED
            }
            AppError::KeyFetchFailed(_) | AppError::TokenExchangeFailed(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::ConfigurationError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 모든 에러 응답은 `{"error": "..."}` 형식의 JSON 본문을 가집니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
