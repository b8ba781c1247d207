//! Sign in with Apple 인증 서비스
//!
//! Apple 인가 코드 플로우 전체를 조율합니다. 리다이렉트 URL 생성, 콜백 검증,
//! 코드 교환, identity token 검증을 거쳐 [`AppleUser`]를 만듭니다.
//!
//! # 플로우 상태
//!
//! ```text
//! Redirecting ─► AwaitingCallback ─► ExchangingCode ─► VerifyingToken ─► Completed
//!                       │                   │                 │
//!                       └───────────────────┴─────────────────┴────────► Failed
//! ```
//!
//! 콜백의 `error`와 `state`는 네트워크 호출 전에 확인합니다.
//! 실패한 플로우는 재시도하지 않으며, 다시 시작하려면 새 리다이렉트가 필요합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let service = AppleAuthService::from_env()?;
//!
//! // 1. 로그인 시작
//! let mut flow = service.flow();
//! let redirect = flow.redirect();
//! // redirect.state 를 쿠키 등에 저장하고 redirect.login_url 로 보냄
//!
//! // 2. 콜백 처리 (Apple이 form_post로 호출)
//! let callback = form.into_authorization_state(stored_state);
//! let user = service.flow().user(&callback).await?;
//! ```

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::AppleProviderConfig;
use crate::domain::dto::apple::response::{AppleTokenResponse, OAuthLoginUrlResponse};
use crate::domain::models::oauth::{
    AppleAccessToken, AppleUser, AuthorizationCallback, AuthorizationState, BearerToken,
    RedirectRequest,
};
use crate::errors::{AppError, AppResult};
use crate::services::auth::client_secret_service::ClientSecretService;
use crate::services::auth::identity_token_service::{IdentityTokenService, project_user};
use crate::services::auth::signing_key_service::SigningKeyService;

/// 인가 시도 하나의 진행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Redirecting,
    AwaitingCallback,
    ExchangingCode,
    VerifyingToken,
    Completed,
    Failed,
}

/// Sign in with Apple 드라이버
///
/// 설정은 생성 시 한 번 검증되며 이후 바뀌지 않습니다.
/// 서명키 캐시는 [`SigningKeyService`]를 통해 다른 드라이버 인스턴스와 공유할 수 있습니다.
pub struct AppleAuthService {
    config: AppleProviderConfig,
    client_secrets: ClientSecretService,
    identity_tokens: IdentityTokenService,
    http: reqwest::Client,
    stateless: bool,
}

impl AppleAuthService {
    pub fn new(config: AppleProviderConfig, signing_keys: Arc<SigningKeyService>) -> AppResult<Self> {
        let config = config.validated()?;

        let client_secrets = ClientSecretService::new(&config)?;
        let identity_tokens = IdentityTokenService::new(config.app_id.clone(), signing_keys);
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::ConfigurationError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client_secrets,
            identity_tokens,
            http,
            stateless: false,
        })
    }

    /// 환경 변수 설정과 프로세스 전역 서명키 캐시로 드라이버를 만듭니다.
    pub fn from_env() -> AppResult<Self> {
        let config = AppleProviderConfig::from_env()?;
        let signing_keys = SigningKeyService::shared(&config)?;

        Self::new(config, signing_keys)
    }

    /// state 검증을 건너뛰는 모드 (API/모바일 클라이언트용)
    pub fn stateless(mut self) -> Self {
        self.stateless = true;
        self
    }

    pub fn is_stateless(&self) -> bool {
        self.stateless
    }

    pub fn config(&self) -> &AppleProviderConfig {
        &self.config
    }

    /// CSRF 방지용 state 값을 생성합니다.
    pub fn generate_state() -> String {
        Uuid::new_v4().to_string()
    }

    /// 리다이렉트 요청에 Apple 전용 파라미터와 스코프를 채웁니다.
    ///
    /// 스코프가 설정되지 않았으면 `email`만 요청합니다. Apple은 결과를
    /// 쿼리스트링이 아닌 POST로 돌려주므로 `response_mode=form_post`가 필요합니다.
    pub fn configure_redirect_request(&self, request: &mut RedirectRequest, state: &str) {
        request
            .set_scopes(self.config.effective_scopes())
            .set_param("client_id", self.config.app_id.as_str())
            .set_param("redirect_uri", self.config.callback_url.as_str())
            .set_param("response_type", "code")
            .set_param("response_mode", "form_post")
            .set_param("grant_type", "authorization_code")
            .set_param("state", state);
    }

    pub fn redirect_request(&self, state: &str) -> RedirectRequest {
        let mut request = RedirectRequest::new(self.config.authorize_url.as_str());
        self.configure_redirect_request(&mut request, state);
        request
    }

    /// 새 인가 시도를 시작합니다.
    pub fn flow(&self) -> AppleFlow<'_> {
        AppleFlow {
            service: self,
            state: FlowState::Redirecting,
        }
    }

    /// 콜백을 검증하고 authorization code를 반환합니다.
    ///
    /// 네트워크 호출 전에 수행되며, 순서는 거부 → 에러/코드 누락 → state 불일치 입니다.
    pub fn validate_callback<'c>(&self, callback: &'c AuthorizationState) -> AppResult<&'c str> {
        if callback.access_denied() {
            log::info!("🚫 사용자가 Apple 로그인을 거부했습니다");
            return Err(AppError::AccessDenied);
        }

        if callback.has_error() {
            log::warn!(
                "⚠️ Apple 콜백 에러 또는 code 누락: {}",
                callback.error().unwrap_or("missing code")
            );
            return Err(AppError::MissingAuthorizationCode);
        }

        if callback.state_mismatch(self.stateless) {
            log::warn!("⚠️ Apple 콜백 state 불일치");
            return Err(AppError::StateMismatch);
        }

        callback.code().ok_or(AppError::MissingAuthorizationCode)
    }

    /// authorization code를 토큰으로 교환합니다.
    ///
    /// 요청마다 새 client secret을 서명합니다.
    pub async fn exchange_code(&self, code: &str) -> AppResult<AppleAccessToken> {
        let client_secret = self.client_secrets.generate_client_secret()?;

        let params = [
            ("client_id", self.config.app_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.callback_url.as_str()),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::TokenExchangeFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("⚠️ Apple 토큰 교환 실패: HTTP {}", status);
            return Err(AppError::TokenExchangeFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let token_response = response
            .json::<AppleTokenResponse>()
            .await
            .map_err(|e| AppError::TokenExchangeFailed(format!("invalid token response: {}", e)))?;

        let token = AppleAccessToken::from_response(token_response, Utc::now())?;

        log::info!("✅ Apple 토큰 교환 성공");
        Ok(token)
    }

    /// 호출자가 가진 identity token을 직접 검증해 사용자를 만듭니다.
    pub async fn user_from_token(&self, token: &str) -> AppResult<AppleUser<BearerToken>> {
        let claims = self.identity_tokens.verify(token).await?;

        Ok(project_user(claims, BearerToken::new(token)))
    }
}

/// 인가 시도 하나
///
/// 요청 핸들러 하나가 소유하며 여러 호출자가 공유하지 않습니다.
pub struct AppleFlow<'a> {
    service: &'a AppleAuthService,
    state: FlowState,
}

impl AppleFlow<'_> {
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// 새 state로 리다이렉트 URL을 만들고 콜백 대기 상태로 넘어갑니다.
    pub fn redirect(&mut self) -> OAuthLoginUrlResponse {
        let state = AppleAuthService::generate_state();
        let login_url = self.service.redirect_request(&state).url();

        self.state = FlowState::AwaitingCallback;
        OAuthLoginUrlResponse { login_url, state }
    }

    /// 콜백을 검증하고 code를 토큰으로 교환합니다.
    pub async fn access_token(
        &mut self,
        callback: &impl AuthorizationCallback,
    ) -> AppResult<AppleAccessToken> {
        self.ensure_accepts_callback()?;

        let result = self.exchange(callback).await;
        self.settle(result)
    }

    /// 토큰 교환 후 identity token을 검증해 사용자를 만듭니다.
    pub async fn user(
        &mut self,
        callback: &impl AuthorizationCallback,
    ) -> AppResult<AppleUser<AppleAccessToken>> {
        self.ensure_accepts_callback()?;

        let result = self.resolve_user(callback).await;
        self.settle(result)
    }

    async fn exchange(&mut self, callback: &impl AuthorizationCallback) -> AppResult<AppleAccessToken> {
        self.state = FlowState::AwaitingCallback;

        let snapshot = AuthorizationState::from_callback(callback);
        let code = self.service.validate_callback(&snapshot)?;

        self.state = FlowState::ExchangingCode;
        self.service.exchange_code(code).await
    }

    async fn resolve_user(
        &mut self,
        callback: &impl AuthorizationCallback,
    ) -> AppResult<AppleUser<AppleAccessToken>> {
        let token = self.exchange(callback).await?;

        self.state = FlowState::VerifyingToken;
        let claims = self.service.identity_tokens.verify(&token.id_token).await?;

        Ok(project_user(claims, token))
    }

    fn ensure_accepts_callback(&self) -> AppResult<()> {
        match self.state {
            FlowState::Redirecting | FlowState::AwaitingCallback => Ok(()),
            other => Err(AppError::InternalError(format!(
                "authorization flow cannot accept a callback in state {:?}",
                other
            ))),
        }
    }

    fn settle<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        self.state = if result.is_ok() {
            FlowState::Completed
        } else {
            FlowState::Failed
        };
        result
    }
}
