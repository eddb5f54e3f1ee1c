//! # 認証ユースケース
//!
//! メールアドレスとパスワードを検証し、署名済みトークンを発行する。
//!
//! ## 処理の流れ
//!
//! 1. 入力検証（メールアドレス・パスワードが空でないこと）
//! 2. メールアドレスでユーザーを検索
//! 3. `password + pepper` を保存済みハッシュと照合
//! 4. 身元情報のクレームを組み立て、有効期限 1 時間で署名
//!
//! ## タイミング攻撃対策
//!
//! ユーザーが存在しない場合もダミーハッシュで検証を実行し、処理時間を均一化する。
//! レスポンスのメッセージは区別されるため完全な対策ではないが、
//! ハッシュ計算の有無による差は生じない。

use std::sync::Arc;

use identity_domain::{
    clock::Clock,
    password::{PasswordHash, PasswordVerifyResult, Pepper, PlainPassword},
    token::{SignedToken, TokenClaims, token_ttl},
    user::Email,
};
use identity_infra::{InfraError, PasswordChecker, TokenSigner, repository::UserRepository};
use identity_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};
use tokio::task::JoinError;

use crate::error::AuthError;

/// ユーザーが存在しない場合の検証に使うダミーハッシュ（有効な bcrypt 形式）
///
/// コストは 10 固定。`user` テーブルの既存ハッシュと同じコストでなければ
/// 処理時間は揃わないため、保存側のコストを変えた場合はここも合わせること。
const DUMMY_HASH: &str = "$2b$10$.....................................................";

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    user_repository:  Arc<dyn UserRepository>,
    password_checker: Arc<dyn PasswordChecker>,
    token_signer:     Arc<dyn TokenSigner>,
    clock:            Arc<dyn Clock>,
    pepper:           Pepper,
}

impl AuthUseCaseImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_checker: Arc<dyn PasswordChecker>,
        token_signer: Arc<dyn TokenSigner>,
        clock: Arc<dyn Clock>,
        pepper: Pepper,
    ) -> Self {
        Self {
            user_repository,
            password_checker,
            token_signer,
            clock,
            pepper,
        }
    }

    /// メールアドレスとパスワードでログインする
    #[tracing::instrument(skip_all, fields(email = %email))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<SignedToken, AuthError> {
        let password = PlainPassword::new(password);
        let email = match Email::new(email) {
            Ok(email) if !password.is_empty() => email,
            _ => {
                log_business_event!(
                    event.category = event::category::AUTH,
                    event.action = event::action::LOGIN_FAILURE,
                    event.result = event::result::FAILURE,
                    event.reason = event::reason::INVALID_INPUT,
                    "ログイン失敗: 入力不正"
                );
                return Err(AuthError::InvalidInput(
                    "メールアドレスとパスワードは必須です".to_string(),
                ));
            }
        };

        let user = self
            .user_repository
            .find_by_email(&email)
            .await
            .map_err(|e| {
                tracing::error!(
                    error.category = log_error::category::INFRASTRUCTURE,
                    error.kind = log_error::kind::DATABASE,
                    email = %email,
                    "ユーザーストアエラー: {}\n{}",
                    e,
                    e.span_trace()
                );
                AuthError::StoreUnavailable(e)
            })?;

        let candidate = self.pepper.apply(&password);

        let Some(user) = user else {
            self.dummy_verification(candidate).await;
            log_business_event!(
                event.category = event::category::AUTH,
                event.action = event::action::LOGIN_FAILURE,
                event.result = event::result::FAILURE,
                event.reason = event::reason::USER_NOT_FOUND,
                "ログイン失敗: ユーザー不明"
            );
            return Err(AuthError::UserNotFound);
        };

        let verified = self
            .check_password(&email, candidate, user.password_hash().clone())
            .await?;

        if verified.is_mismatch() {
            log_business_event!(
                event.category = event::category::AUTH,
                event.action = event::action::LOGIN_FAILURE,
                event.entity_type = event::entity_type::USER,
                event.entity_id = %user.id(),
                event.result = event::result::FAILURE,
                event.reason = event::reason::INVALID_PASSWORD,
                "ログイン失敗: パスワード不一致"
            );
            return Err(AuthError::InvalidPassword);
        }

        let claims = TokenClaims::issue(&user, self.clock.now(), token_ttl());
        let token = self
            .token_signer
            .sign(&claims)
            .map_err(|e| {
                tracing::error!(
                    error.category = log_error::category::INFRASTRUCTURE,
                    error.kind = log_error::kind::TOKEN_SIGNING,
                    email = %email,
                    "トークン署名エラー: {}\n{}",
                    e,
                    e.span_trace()
                );
                AuthError::SigningFailure(e)
            })?;

        log_business_event!(
            event.category = event::category::AUTH,
            event.action = event::action::LOGIN_SUCCESS,
            event.entity_type = event::entity_type::USER,
            event.entity_id = %user.id(),
            event.result = event::result::SUCCESS,
            "ログイン成功"
        );

        Ok(token)
    }

    /// 保存済みハッシュと照合する
    ///
    /// 保存済みハッシュが解釈できない場合は認証失敗ではなく内部エラーとする。
    async fn check_password(
        &self,
        email: &Email,
        candidate: PlainPassword,
        hash: PasswordHash,
    ) -> Result<PasswordVerifyResult, AuthError> {
        match self.run_checker(candidate, hash).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::error!(
                    error.category = log_error::category::INFRASTRUCTURE,
                    error.kind = log_error::kind::PASSWORD_VERIFICATION,
                    email = %email,
                    "パスワード検証エラー: {}\n{}",
                    e,
                    e.span_trace()
                );
                Err(AuthError::Internal(format!("パスワード検証に失敗しました: {e}")))
            }
            Err(e) => {
                tracing::error!(
                    error.category = log_error::category::INFRASTRUCTURE,
                    error.kind = log_error::kind::INTERNAL,
                    email = %email,
                    "パスワード検証タスクが異常終了しました: {}",
                    e
                );
                Err(AuthError::Internal(format!(
                    "パスワード検証タスクが異常終了しました: {e}"
                )))
            }
        }
    }

    /// ブロッキングスレッドで検証器を実行する
    async fn run_checker(
        &self,
        candidate: PlainPassword,
        hash: PasswordHash,
    ) -> Result<Result<PasswordVerifyResult, InfraError>, JoinError> {
        let checker = Arc::clone(&self.password_checker);

        tokio::task::spawn_blocking(move || checker.verify(&candidate, &hash)).await
    }

    /// ダミーハッシュで検証を実行する
    ///
    /// 固定 sleep ではなく実際に検証することで、負荷による変動も含めて同じ時間特性になる。
    async fn dummy_verification(&self, candidate: PlainPassword) {
        // 結果は無視する
        let _ = self
            .run_checker(candidate, PasswordHash::new(DUMMY_HASH))
            .await;
    }
}
