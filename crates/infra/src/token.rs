//! # トークン署名
//!
//! クレームを HS256 で署名し、JWS コンパクト形式の文字列を発行する。
//!
//! 有効期限の判定は jsonwebtoken の組み込み検証（leeway あり）を使わず、
//! [`Clock`] の時刻と `exp` を直接比較する。

use std::{fmt, sync::Arc};

use identity_domain::{
    clock::Clock,
    token::{SignedToken, TokenClaims},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::InfraError;

/// 署名鍵（共有秘密）
///
/// Debug 出力では値をマスクする。
#[derive(Clone)]
pub struct SigningSecret(String);

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[REDACTED]").finish()
    }
}

impl SigningSecret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// トークンの署名と検証を担当するトレイト
pub trait TokenSigner: Send + Sync {
    /// クレームに署名する
    fn sign(&self, claims: &TokenClaims) -> Result<SignedToken, InfraError>;

    /// 署名と有効期限を検証し、クレームを取り出す
    ///
    /// # Errors
    ///
    /// - 署名不一致・形式不正: [`InfraErrorKind::Token`](crate::InfraErrorKind::Token)
    /// - 有効期限切れ: [`InfraErrorKind::TokenExpired`](crate::InfraErrorKind::TokenExpired)
    fn verify(&self, token: &str) -> Result<TokenClaims, InfraError>;
}

/// HS256 による署名の実装
pub struct JwtTokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock:        Arc<dyn Clock>,
}

impl JwtTokenSigner {
    pub fn new(secret: &SigningSecret, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign(&self, claims: &TokenClaims) -> Result<SignedToken, InfraError> {
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?;
        Ok(SignedToken::new(token))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, InfraError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &Self::validation())?;

        if data.claims.is_expired_at(self.clock.now()) {
            return Err(InfraError::token_expired());
        }

        Ok(data.claims)
    }
}
