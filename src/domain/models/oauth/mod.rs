//! # OAuth Domain Models Module
//!
//! OAuth 2.0 인증 플로우와 관련된 도메인 모델들을 정의하는 모듈입니다.
//! 현재는 Sign in with Apple 모델만 포함합니다.

pub mod apple_oauth_model;

pub use apple_oauth_model::*;
