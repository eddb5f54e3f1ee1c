//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! identity-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use identity_domain::user::{Email, UserRecord};

use crate::{error::InfraError, repository::UserRepository};

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users:       Arc<Mutex<Vec<UserRecord>>>,
    unavailable: Arc<Mutex<bool>>,
    lookups:     Arc<Mutex<Vec<String>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// ユーザーを追加する
    ///
    /// 同じメールアドレスで複数回追加した場合、検索では先に追加した方が返る。
    pub fn add_user(&self, user: UserRecord) {
        self.users.lock().unwrap().push(user);
    }

    /// 以降の検索をデータベースエラーにする
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// これまでに検索されたメールアドレス
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, InfraError> {
        self.lookups.lock().unwrap().push(email.as_str().to_string());

        if *self.unavailable.lock().unwrap() {
            return Err(sqlx::Error::PoolTimedOut.into());
        }

        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }
}
