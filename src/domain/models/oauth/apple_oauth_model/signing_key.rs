//! Apple 공개키 세트(JWKS) 모델
//!
//! `https://appleid.apple.com/auth/keys` 응답과, 그 안의 개별 키를 검증에
//! 사용할 PEM 공개키로 바꾸는 로직을 담습니다.
//!
//! 키 세트는 RSA 모듈러스/지수(`n`, `e`) 또는 X.509 인증서 체인(`x5c`)으로
//! 키를 공개할 수 있습니다. 어느 쪽이든 [`SigningKey::public_key_pem`]은
//! 같은 SPKI `PUBLIC KEY` PEM을 돌려주므로 호출자는 형태를 알 필요가 없습니다.

use base64::Engine;
use base64::engine::general_purpose;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::{BigUint, RsaPublicKey};
use serde::{Deserialize, Serialize};
use x509_cert::Certificate;
use x509_cert::der::{Decode, Encode};

use crate::errors::{AppError, AppResult};

/// JWKS 응답 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// JWKS의 개별 키
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default)]
    pub kid: Option<String>,
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
    #[serde(default)]
    pub x5c: Option<Vec<String>>,
}

/// 서명키의 공개키 재료
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningKeyMaterial {
    /// base64url 인코딩된 모듈러스와 지수
    Rsa { n: String, e: String },
    /// base64 인코딩된 DER 인증서 (`x5c`의 첫 번째 항목)
    Certificate { x5c: String },
}

/// identity token 서명 검증에 사용할 수 있는 키
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey {
    pub kid: String,
    pub alg: Option<String>,
    pub material: SigningKeyMaterial,
}

impl SigningKey {
    /// 서명 용도의 RSA 키만 받아들입니다.
    ///
    /// kid가 없거나, `use`가 `sig`가 아니거나, 공개키 재료가 없으면 `None` 입니다.
    /// 인증서와 RSA 구성요소가 모두 있으면 인증서를 우선합니다.
    pub fn from_jwk(jwk: &Jwk) -> Option<Self> {
        let kid = jwk.kid.as_ref().filter(|kid| !kid.is_empty())?.clone();

        if !jwk.kty.eq_ignore_ascii_case("RSA") {
            return None;
        }
        if jwk.key_use.as_deref().is_some_and(|key_use| key_use != "sig") {
            return None;
        }

        let certificate = jwk
            .x5c
            .as_ref()
            .and_then(|chain| chain.first())
            .filter(|cert| !cert.is_empty());

        let material = match (certificate, &jwk.n, &jwk.e) {
            (Some(cert), _, _) => SigningKeyMaterial::Certificate { x5c: cert.clone() },
            (None, Some(n), Some(e)) => SigningKeyMaterial::Rsa {
                n: n.clone(),
                e: e.clone(),
            },
            _ => return None,
        };

        Some(Self {
            kid,
            alg: jwk.alg.clone(),
            material,
        })
    }

    /// SPKI `PUBLIC KEY` PEM 문자열로 변환합니다.
    pub fn public_key_pem(&self) -> AppResult<String> {
        let public_key = match &self.material {
            SigningKeyMaterial::Rsa { n, e } => {
                let n = decode_base64url(n)?;
                let e = decode_base64url(e)?;

                RsaPublicKey::new(BigUint::from_bytes_be(&n), BigUint::from_bytes_be(&e))
                    .map_err(|err| self.invalid_material(err))?
            }
            SigningKeyMaterial::Certificate { x5c } => {
                let der = general_purpose::STANDARD
                    .decode(x5c.trim())
                    .map_err(|err| self.invalid_material(err))?;
                let certificate =
                    Certificate::from_der(&der).map_err(|err| self.invalid_material(err))?;
                let spki = certificate
                    .tbs_certificate
                    .subject_public_key_info
                    .to_der()
                    .map_err(|err| self.invalid_material(err))?;

                RsaPublicKey::from_public_key_der(&spki).map_err(|err| self.invalid_material(err))?
            }
        };

        public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|err| self.invalid_material(err))
    }

    fn invalid_material(&self, reason: impl std::fmt::Display) -> AppError {
        AppError::KeyFetchFailed(format!("invalid key material for kid {}: {}", self.kid, reason))
    }
}

fn decode_base64url(value: &str) -> AppResult<Vec<u8>> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(value.trim_end_matches('='))
        .map_err(|e| AppError::KeyFetchFailed(format!("invalid base64url component: {}", e)))
}
