//! Apple identity token 클레임

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 검증된 Apple identity token의 클레임
///
/// `email_verified`와 `is_private_email`은 Apple이 문자열(`"true"`) 또는
/// 불리언으로 보낼 수 있어 원본 JSON 값 그대로 보관합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppleIdTokenClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub exp: i64,
    pub iat: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private_email: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_time: Option<i64>,

    /// 최초 인가 시 함께 전달되는 사용자 정보
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<EmbeddedUserClaims>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedUserClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<EmbeddedName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl AppleIdTokenClaims {
    pub fn first_name(&self) -> Option<&str> {
        self.embedded_name()
            .and_then(|name| name.first_name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn last_name(&self) -> Option<&str> {
        self.embedded_name()
            .and_then(|name| name.last_name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// `email_verified`가 문자열 `"true"`일 때만 참입니다.
    pub fn is_email_verified(&self) -> bool {
        matches!(&self.email_verified, Some(Value::String(value)) if value == "true")
    }

    fn embedded_name(&self) -> Option<&EmbeddedName> {
        self.user.as_ref().and_then(|user| user.name.as_ref())
    }
}
