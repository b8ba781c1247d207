//! # apple_auth_driver
//!
//! Sign in with Apple OAuth2 드라이버와 actix-web 어댑터입니다.
//!
//! ## 구성
//!
//! ```text
//! handlers/routes  (actix-web 어댑터)
//!        │
//!        ▼
//! services::auth
//! ├── AppleAuthService / AppleFlow   - 리다이렉트, 콜백 검증, 코드 교환
//! ├── ClientSecretService            - ES256 client secret 서명
//! ├── IdentityTokenService           - identity token 검증, 사용자 정규화
//! └── SigningKeyService              - Apple JWKS 조회 (caching::key_cache)
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use apple_auth_driver::routes::configure_all_routes;
//! use apple_auth_driver::services::auth::AppleAuthService;
//!
//! let apple_auth = web::Data::new(AppleAuthService::from_env()?);
//! let app = App::new()
//!     .app_data(apple_auth.clone())
//!     .configure(configure_all_routes);
//! ```

pub mod caching;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
