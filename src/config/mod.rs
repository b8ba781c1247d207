//! # Configuration Module
//!
//! 드라이버와 서버의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`apple_config`] - Sign in with Apple 식별자, 개인키, 엔드포인트, 키 캐시 정책
//! - [`server_config`] - HTTP 서버 바인딩 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공하고 로그에 남기지 않습니다
//! - 필수 설정값 누락은 패닉 대신 `AppError::ConfigurationError`로 보고합니다
//! - 프로바이더 설정은 생성 시 `validator`로 한 번 검증한 뒤 불변으로 사용합니다
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AppleProviderConfig, ServerConfig};
//!
//! let apple = AppleProviderConfig::from_env()?;
//! println!("Server will bind to {}", ServerConfig::bind_address());
//! ```
//!
//! ## 프로필
//!
//! `PROFILE=dev` 이면 `.env.dev`, `PROFILE=prod` 이면 `.env.prod` 를 읽고,
//! 그 외에는 `.env` 를 읽습니다 (`main.rs` 참고).

pub mod apple_config;
pub mod server_config;

pub use apple_config::*;
pub use server_config::*;
