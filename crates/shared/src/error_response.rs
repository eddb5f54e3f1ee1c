//! # エラーレスポンス
//!
//! 認証 API が失敗時に返す JSON ボディ。クライアントは `message` のみを参照する。
//!
//! ```json
//! { "message": "Authentication failed: User not found." }
//! ```

use serde::{Deserialize, Serialize};

/// エラーレスポンスボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
