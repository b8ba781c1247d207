//! HTTP 요청 핸들러 모듈
//!
//! 호스트 프레임워크(actix-web)와 드라이버 사이의 얇은 어댑터입니다.

pub mod auth;
