//! Sign in with Apple 인증 서버 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 Apple 드라이버를 초기화합니다.
//! 설정 오류가 있으면 서버를 띄우지 않고 종료합니다.

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use apple_auth_driver::config::{AppleOAuthConfig, ServerConfig};
use apple_auth_driver::routes::configure_all_routes;
use apple_auth_driver::services::auth::AppleAuthService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 Sign in with Apple 인증 서버 시작중...");

    let apple_auth = initialize_apple_auth()?;

    info!("✅ Apple 드라이버가 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(apple_auth).await
}

/// Apple 드라이버를 환경 변수로 초기화합니다
///
/// # Errors
///
/// * 필수 환경 변수 누락, 잘못된 개인키 등 설정 오류
fn initialize_apple_auth() -> std::io::Result<web::Data<AppleAuthService>> {
    let service = AppleAuthService::from_env().map_err(|e| {
        error!("❌ Apple 드라이버 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    let service = if AppleOAuthConfig::stateless() {
        info!("state 검증 비활성화 (stateless 모드)");
        service.stateless()
    } else {
        service
    };

    Ok(web::Data::new(service))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
///
/// # Examples
///
/// ```rust,ignore
/// // 서버는 기본적으로 127.0.0.1:8080에서 실행됩니다
/// // Health check: http://127.0.0.1:8080/health
/// // 로그인: http://127.0.0.1:8080/api/v1/auth/apple/login
/// ```
async fn start_http_server(apple_auth: web::Data<AppleAuthService>) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Apple 로그인: http://{}/api/v1/auth/apple/login", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(apple_auth.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// # Examples
///
/// ```bash
/// PROFILE=prod cargo run
/// ```
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=apple_auth_driver::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}
