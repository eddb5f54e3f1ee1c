//! # インフラ層エラー定義
//!
//! データベース、パスワードハッシュ、トークン署名で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターン:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! `From` 実装と convenience constructor はいずれも生成時点の [`SpanTrace`] を捕捉する。

use std::fmt;

use derive_more::Display;
use identity_domain::DomainError;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// 種別に応じた処理には [`kind()`](InfraError::kind) を使用する:
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::TokenExpired => { /* 期限切れ */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// 接続失敗、プールのタイムアウト、クエリ実行失敗など。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 永続化済みレコードの不整合
    #[error("レコード不整合: {0}")]
    CorruptRecord(#[source] DomainError),

    /// 保存されたパスワードハッシュを解釈できない
    ///
    /// 形式不正、未対応のハッシュ方式など。ユーザーの入力ではなくデータ側の問題。
    #[error("不正なパスワードハッシュ: {0}")]
    InvalidHash(String),

    /// トークンの署名・検証エラー
    #[error("トークンエラー: {0}")]
    Token(#[source] jsonwebtoken::errors::Error),

    /// トークンの有効期限切れ
    #[error("トークンの有効期限が切れています")]
    TokenExpired,

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    fn capture(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    // ===== Convenience constructors =====

    /// 不正なパスワードハッシュエラーを生成する
    pub fn invalid_hash(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::InvalidHash(msg.into()))
    }

    /// 有効期限切れエラーを生成する
    pub fn token_expired() -> Self {
        Self::capture(InfraErrorKind::TokenExpired)
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::capture(InfraErrorKind::Unexpected(msg.into()))
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self::capture(InfraErrorKind::Database(source))
    }
}

impl From<DomainError> for InfraError {
    fn from(source: DomainError) -> Self {
        Self::capture(InfraErrorKind::CorruptRecord(source))
    }
}

impl From<jsonwebtoken::errors::Error> for InfraError {
    fn from(source: jsonwebtoken::errors::Error) -> Self {
        Self::capture(InfraErrorKind::Token(source))
    }
}
