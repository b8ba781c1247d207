//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈로, Apple 프로바이더와 주고받는 데이터와
//! 도메인 규칙을 담당합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── DTOs         - HTTP 요청/응답 및 Apple API 응답 본문
//! └── Models       - OAuth 플로우 값 객체 (토큰, 서명키, 클레임, 사용자)
//!      │
//!      ▼
//! Application Layer (Services)
//! ```

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
