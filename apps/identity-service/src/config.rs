//! # Identity Service 設定
//!
//! 環境変数からサーバー・データベース・秘密値の設定を読み込む。
//! 起動時に一度だけ構築し、以降は変更しない。

use std::env;

use identity_domain::password::Pepper;
use identity_infra::{SigningSecret, db::DatabaseConfig};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8081;
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("環境変数 {0} が設定されていません")]
    Missing(&'static str),

    #[error("環境変数 {name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("環境変数 {0} は空にできません")]
    Empty(&'static str),
}

/// Identity Service の設定
///
/// 秘密値（DB パスワード・ペッパー・署名鍵）は Debug 出力でマスクされる。
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// バインドアドレス
    pub host:       String,
    /// ポート番号
    pub port:       u16,
    /// データベース接続設定
    pub database:   DatabaseConfig,
    /// パスワード検証前に連結するペッパー（空文字列も許容）
    pub pepper:     Pepper,
    /// トークン署名鍵
    pub jwt_secret: SigningSecret,
}

impl IdentityConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Empty("JWT_SECRET"));
        }

        Ok(Self {
            host:       lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port:       parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            database:   DatabaseConfig {
                host:            required("DB_HOST")?,
                port:            parse_or(&lookup, "DB_PORT", DEFAULT_DB_PORT)?,
                user:            required("DB_USER")?,
                password:        lookup("DB_PASSWORD").unwrap_or_default(),
                database:        required("DB_NAME")?,
                max_connections: parse_or(
                    &lookup,
                    "DB_MAX_CONNECTIONS",
                    DEFAULT_DB_MAX_CONNECTIONS,
                )?,
            },
            pepper:     Pepper::new(required("DB_PASSWORD_PEPPER")?),
            jwt_secret: SigningSecret::new(jwt_secret),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
