//! API 라우트 설정 모듈
//!
//! Sign in with Apple 엔드포인트와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Routes
//!
//! - `GET /health` - 헬스체크
//! - `GET /api/v1/auth/apple/login` - Apple 인가 페이지로 리다이렉트
//! - `GET /api/v1/auth/apple/login-url` - 인가 URL JSON
//! - `POST /api/v1/auth/apple/callback` - Apple `form_post` 콜백
//! - `POST /api/v1/auth/apple/token` - identity token 직접 검증
//!
//! 핸들러는 `web::Data<AppleAuthService>`가 앱에 등록되어 있어야 합니다.

use actix_web::web;
use serde_json::json;

use crate::handlers;

/// 모든 라우트를 설정합니다
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new()
///     .app_data(web::Data::new(AppleAuthService::from_env()?))
///     .configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// # Examples
///
/// ```bash
/// # Apple 로그인 시작
/// curl -i http://localhost:8080/api/v1/auth/apple/login
///
/// # 네이티브 앱에서 받은 identity token 검증
/// curl -X POST http://localhost:8080/api/v1/auth/apple/token \
///   -H "Content-Type: application/json" \
///   -d '{"id_token":"eyJraWQiOiJXNldjT0tCIiwiYWxnIjoiUlMyNTYifQ..."}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            // Sign in with Apple
            .service(handlers::auth::apple_login)
            .service(handlers::auth::apple_login_url)
            .service(handlers::auth::apple_callback)
            .service(handlers::auth::apple_user_from_token),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "apple_auth_driver",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "provider": "Sign in with Apple",
            "key_cache": "in-memory"
        }
    }))
}
