//! 인가 리다이렉트 URL 빌더

use crate::config::AppleScope;

/// Apple 인가 엔드포인트로 보낼 리다이렉트 요청
///
/// 파라미터는 추가한 순서대로 쿼리스트링에 들어갑니다.
/// 스코프는 공백으로 구분된 `scope` 파라미터 하나로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRequest {
    endpoint: String,
    scopes: Vec<AppleScope>,
    params: Vec<(String, String)>,
}

impl RedirectRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            scopes: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn set_scopes(&mut self, scopes: Vec<AppleScope>) -> &mut Self {
        self.scopes = scopes;
        self
    }

    /// 같은 이름의 파라미터가 있으면 값을 교체합니다.
    pub fn set_param(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.params.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((name.to_string(), value)),
        }
        self
    }

    pub fn scopes(&self) -> &[AppleScope] {
        &self.scopes
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn url(&self) -> String {
        let mut query: Vec<String> = self
            .params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();

        if !self.scopes.is_empty() {
            let scope = self
                .scopes
                .iter()
                .map(AppleScope::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            query.push(format!("scope={}", urlencoding::encode(&scope)));
        }

        if query.is_empty() {
            return self.endpoint.clone();
        }

        format!("{}?{}", self.endpoint, query.join("&"))
    }
}
