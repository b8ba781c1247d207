//! Authentication HTTP Handlers
//!
//! Sign in with Apple 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 드라이버([`AppleAuthService`])는 `web::Data`로 주입받으며,
//! CSRF state는 `apple_oauth_state` 쿠키에 보관합니다.
//!
//! # Endpoints
//!
//! - `GET /apple/login` - Apple 인가 페이지로 302 리다이렉트
//! - `GET /apple/login-url` - 인가 URL과 state를 JSON으로 반환
//! - `POST /apple/callback` - Apple `form_post` 콜백 처리
//! - `POST /apple/token` - 클라이언트가 받은 identity token 검증
//!
//! # State 쿠키
//!
//! Apple의 `form_post` 콜백은 다른 사이트에서 오는 POST이므로 쿠키가 함께
//! 전송되려면 `SameSite=None; Secure`가 필요합니다. 콜백 처리 후에는
//! 성공 여부와 관계없이 쿠키를 지웁니다.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, ResponseError, get, post, web};
use validator::Validate;

use crate::domain::dto::apple::request::{AppleCallbackForm, IdTokenRequest};
use crate::errors::AppError;
use crate::services::auth::AppleAuthService;

/// CSRF state 쿠키 이름
pub const STATE_COOKIE: &str = "apple_oauth_state";

const STATE_COOKIE_MAX_AGE_MINUTES: i64 = 10;

fn state_cookie(state: String) -> Cookie<'static> {
    Cookie::build(STATE_COOKIE, state)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(Duration::minutes(STATE_COOKIE_MAX_AGE_MINUTES))
        .finish()
}

/// Apple 인가 페이지로 리다이렉트합니다.
#[get("/apple/login")]
pub async fn apple_login(
    apple_auth: web::Data<AppleAuthService>,
) -> Result<HttpResponse, AppError> {
    let redirect = apple_auth.flow().redirect();

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, redirect.login_url))
        .cookie(state_cookie(redirect.state))
        .finish())
}

/// 인가 URL을 JSON으로 반환합니다.
///
/// SPA처럼 클라이언트가 직접 이동을 처리하는 경우 사용합니다.
#[get("/apple/login-url")]
pub async fn apple_login_url(
    apple_auth: web::Data<AppleAuthService>,
) -> Result<HttpResponse, AppError> {
    let redirect = apple_auth.flow().redirect();

    Ok(HttpResponse::Ok()
        .cookie(state_cookie(redirect.state.clone()))
        .json(redirect))
}

/// Apple `form_post` 콜백을 처리합니다.
///
/// 성공하면 정규화된 사용자와 Apple 토큰을 JSON으로 반환합니다.
#[post("/apple/callback")]
pub async fn apple_callback(
    req: HttpRequest,
    apple_auth: web::Data<AppleAuthService>,
    form: web::Form<AppleCallbackForm>,
) -> Result<HttpResponse, AppError> {
    let stored_state = req.cookie(STATE_COOKIE).map(|cookie| cookie.value().to_string());
    let callback = form.into_inner().into_authorization_state(stored_state);

    let mut response = match apple_auth.flow().user(&callback).await {
        Ok(user) => {
            log::info!("✅ Apple 로그인 성공: {}", user.id);
            HttpResponse::Ok().json(user)
        }
        Err(e) => e.error_response(),
    };

    response
        .add_removal_cookie(&state_cookie(String::new()))
        .map_err(|e| AppError::InternalError(format!("쿠키 설정 실패: {}", e)))?;

    Ok(response)
}

/// 클라이언트가 가진 identity token으로 사용자를 확인합니다.
#[post("/apple/token")]
pub async fn apple_user_from_token(
    apple_auth: web::Data<AppleAuthService>,
    payload: web::Json<IdTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = apple_auth.user_from_token(&payload.id_token).await?;

    log::info!("✅ Apple identity token 확인: {}", user.id);
    Ok(HttpResponse::Ok().json(user))
}
