//! # 認証ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/auth/login` - メールアドレスとパスワードでログインし、トークンを返す
//!
//! ```text
//! → { "email": "alice@example.com", "password": "secret123" }
//! ← 200 { "token": "<jws>" }
//! ← 401 { "message": "Authentication failed: User not found." }
//! ```

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{error::AuthError, usecase::AuthUseCase};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub usecase: Arc<dyn AuthUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ログインリクエスト
///
/// 欠けたフィールドは空文字列として扱い、ユースケース側で入力不正とする。
/// パスワードを含むため Debug は実装しない。
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email:    String,
    #[serde(default)]
    pub password: String,
}

/// ログインレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// --- ハンドラ ---

/// POST /api/auth/login
///
/// JSON として解釈できないボディは 400 として扱う。
pub async fn login(
    State(state): State<Arc<AuthState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(req) = payload.map_err(|e| AuthError::InvalidInput(e.body_text()))?;

    let token = state.usecase.authenticate(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token: token.into_string(),
    }))
}
