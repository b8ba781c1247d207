//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 외부 프로바이더(Apple)와의 통신과 인증 규칙을 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::AppleAuthService;
//!
//! let apple_auth = AppleAuthService::from_env()?;
//! ```

pub mod auth;
