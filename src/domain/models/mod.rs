//! # Domain Models Module
//!
//! 외부 프로바이더와 주고받는 값 객체와 그 변환 규칙을 정의합니다.
//! 영속성이 없는 불변 값으로 설계되었습니다.

pub mod oauth;

pub use oauth::*;
