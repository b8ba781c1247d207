//! 인증 서비스 모듈
//!
//! Sign in with Apple 인가 코드 플로우와 identity token 검증을 담당하는
//! 서비스들을 제공합니다.
//!
//! # Features
//!
//! - ES256 client secret 서명 (`ClientSecretService`)
//! - Apple JWKS 조회 및 캐싱 (`SigningKeyService`)
//! - identity token 검증과 사용자 정규화 (`IdentityTokenService`, `project_user`)
//! - 플로우 조율 (`AppleAuthService`, `AppleFlow`)
//!
//! # Security
//!
//! - CSRF 방지 (OAuth State 매개변수, stateless 모드 제외)
//! - 서명/issuer/audience/만료 검증을 통과한 클레임만 사용자로 변환
//! - 외부 호출 타임아웃
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::AppleAuthService;
//!
//! let apple_auth = AppleAuthService::from_env()?;
//! let redirect = apple_auth.flow().redirect();
//! ```

pub mod apple_auth_service;
pub mod client_secret_service;
pub mod identity_token_service;
pub mod signing_key_service;

pub use apple_auth_service::*;
pub use client_secret_service::*;
pub use identity_token_service::*;
pub use signing_key_service::*;
