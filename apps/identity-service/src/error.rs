//! # Identity Service エラー定義
//!
//! ログイン処理の失敗種別と、HTTP レスポンスへの変換を定義する。
//!
//! | エラー | ステータス | `message` |
//! |--------|-----------|-----------|
//! | `InvalidInput` | 400 | `Email and password are required.` |
//! | `UserNotFound` | 401 | `Authentication failed: User not found.` |
//! | `InvalidPassword` | 401 | `Authentication failed: Incorrect password.` |
//! | `StoreUnavailable` / `SigningFailure` / `Internal` | 500 | `An error occurred during login.` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use identity_infra::InfraError;
use identity_shared::ErrorResponse;
use thiserror::Error;

/// ログイン処理で発生するエラー
#[derive(Debug, Error)]
pub enum AuthError {
    /// メールアドレスまたはパスワードが空、もしくはリクエストボディが不正
    #[error("入力が不正です: {0}")]
    InvalidInput(String),

    /// 該当するユーザーが存在しない
    #[error("ユーザーが見つかりません")]
    UserNotFound,

    /// パスワードが一致しない
    #[error("パスワードが一致しません")]
    InvalidPassword,

    /// ユーザーストアに到達できない
    #[error("ユーザーストアエラー: {0}")]
    StoreUnavailable(#[source] InfraError),

    /// トークンの署名に失敗した
    #[error("トークン署名エラー: {0}")]
    SigningFailure(#[source] InfraError),

    /// 上記以外の想定外の状態（保存済みハッシュの形式不正など）
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl AuthError {
    /// クライアントに返すメッセージ
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::InvalidInput(_) => "Email and password are required.",
            AuthError::UserNotFound => "Authentication failed: User not found.",
            AuthError::InvalidPassword => "Authentication failed: Incorrect password.",
            AuthError::StoreUnavailable(_)
            | AuthError::SigningFailure(_)
            | AuthError::Internal(_) => "An error occurred during login.",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound | AuthError::InvalidPassword => StatusCode::UNAUTHORIZED,
            AuthError::StoreUnavailable(_)
            | AuthError::SigningFailure(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 500 系のログは発生箇所（ユースケース）で出力済みのため、ここでは変換のみ行う
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorResponse::new(self.client_message())),
        )
            .into_response()
    }
}
