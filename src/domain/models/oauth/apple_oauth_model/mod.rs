//! # Sign in with Apple Domain Models
//!
//! Apple 인가 코드 플로우와 identity token 검증에 쓰이는 도메인 모델입니다.
//!
//! ## 주요 구성 요소
//!
//! - **`redirect_request`**: 인가 엔드포인트 리다이렉트 URL 빌더 (`RedirectRequest`)
//! - **`authorization_state`**: 콜백 요청 스냅샷과 호스트 인터페이스 (`AuthorizationState`, `AuthorizationCallback`)
//! - **`access_token`**: 토큰 교환 결과 (`AppleAccessToken`)
//! - **`signing_key`**: Apple JWKS와 PEM 공개키 변환 (`JwkSet`, `SigningKey`)
//! - **`id_token_claims`**: identity token 클레임 (`AppleIdTokenClaims`)
//! - **`apple_user`**: 정규화된 사용자 (`AppleUser<T>`)
//!
//! ## 인가 코드 플로우
//!
//! ```text
//! 1. 사용자 → Apple 인가 URL로 리다이렉트 (response_mode=form_post)
//! 2. Apple → code, state, (error), (user)를 콜백 URL로 POST
//! 3. 서버 → error/state 확인 후 ES256 client secret으로 code 교환
//! 4. 서버 → id_token을 Apple JWKS로 검증하고 AppleUser로 변환
//! ```

pub mod access_token;
pub mod apple_user;
pub mod authorization_state;
pub mod id_token_claims;
pub mod redirect_request;
pub mod signing_key;

pub use access_token::*;
pub use apple_user::*;
pub use authorization_state::*;
pub use id_token_claims::*;
pub use redirect_request::*;
pub use signing_key::*;
