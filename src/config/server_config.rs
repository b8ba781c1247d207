//! 서버 바인딩 설정

use std::env;

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 바인딩할 포트 (기본값 8080)
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 바인딩할 호스트 (기본값 127.0.0.1)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}
