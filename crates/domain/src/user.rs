//! # ユーザー
//!
//! ログイン対象となるユーザーレコードと、それに関連する値オブジェクトを定義する。
//!
//! ユーザーレコードは外部のリレーショナルストア（`user` テーブル）が所有しており、
//! このサービスからは読み取り専用で扱う。
//!
//! ## 使用例
//!
//! ```rust
//! use identity_domain::{
//!     password::PasswordHash,
//!     user::{Email, Role, UserId, UserRecord},
//! };
//!
//! let user = UserRecord::from_db(
//!     UserId::new(1),
//!     Email::new("alice@example.com").unwrap(),
//!     PasswordHash::new("$2b$10$..."),
//!     "Alice Example".to_string(),
//!     "+81-90-0000-0000".to_string(),
//!     Role::from_column(Some("admin".to_string())),
//! );
//!
//! assert_eq!(user.role().map(Role::as_str), Some("admin"));
//! ```

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PasswordHash};

/// ユーザー ID
///
/// `user.id` カラム（自動採番の整数）をラップする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

/// メールアドレス（ログイン ID）
///
/// ルックアップキーとしてそのまま完全一致で使用する。
/// トリムや小文字化などの正規化は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// 空文字列のみを拒否する。形式の検証は行わず、
    /// 存在しないアドレスはルックアップの結果として扱う。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ロール
///
/// `user.roles` カラムの値。未設定のユーザーもいるため、
/// [`UserRecord`] では `Option<Role>` で保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Role(String);

impl Role {
    /// カラム値からロールを復元する
    ///
    /// NULL と空文字列はどちらも「ロールなし」として扱う。
    pub fn from_column(value: Option<String>) -> Option<Self> {
        value.filter(|v| !v.is_empty()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// ユーザーレコード
///
/// # 不変条件
///
/// - `email` はルックアップキー。同一アドレスのレコードが複数ある場合は
///   ストアが最初に返した 1 件のみを扱う
/// - `password_hash` は `password + pepper` に対するソルト付きハッシュ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id:            UserId,
    email:         Email,
    password_hash: PasswordHash,
    full_name:     String,
    phone_number:  String,
    role:          Option<Role>,
}

impl UserRecord {
    /// データベースの行からレコードを復元する
    pub fn from_db(
        id: UserId,
        email: Email,
        password_hash: PasswordHash,
        full_name: String,
        phone_number: String,
        role: Option<Role>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            full_name,
            phone_number,
            role,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }
}
