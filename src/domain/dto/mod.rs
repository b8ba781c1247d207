//! # Data Transfer Objects
//!
//! HTTP 계층과 Apple API 사이를 오가는 요청/응답 본문입니다.

pub mod apple;

pub use apple::*;
