//! # ユースケース層
//!
//! ログインのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラはトレイト経由で呼び出し、テストではスタブに差し替える
//! - **依存性注入**: リポジトリ・パスワード検証器・署名器・時計を外部から注入

pub mod auth;

use async_trait::async_trait;
pub use auth::AuthUseCaseImpl;
use identity_domain::token::SignedToken;

use crate::error::AuthError;

/// 認証ユースケーストレイト
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// メールアドレスとパスワードを検証し、署名済みトークンを発行する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(SignedToken)`: 有効期限 1 時間のトークン
    /// - `Err(AuthError)`: 入力不正、認証失敗、または内部エラー
    async fn authenticate(&self, email: &str, password: &str) -> Result<SignedToken, AuthError>;
}

#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    async fn authenticate(&self, email: &str, password: &str) -> Result<SignedToken, AuthError> {
        self.authenticate(email, password).await
    }
}
