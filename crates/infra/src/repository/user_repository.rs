//! # UserRepository
//!
//! `user` テーブルからログイン対象のユーザーを取得する。
//!
//! テーブルは外部が所有しており、このサービスは読み取りのみ行う。
//!
//! ```sql
//! SELECT id, email, password, full_name, phone_number, roles
//! FROM `user` WHERE email = ? LIMIT 1
//! ```

use async_trait::async_trait;
use identity_domain::{
    DomainError,
    password::PasswordHash,
    user::{Email, Role, UserId, UserRecord},
};
use sqlx::MySqlPool;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// メールアドレスでユーザーを検索する
    ///
    /// メールアドレスは完全一致で比較する（照合順序はテーブル定義に従う）。
    /// 同じアドレスの行が複数ある場合は、ストアが最初に返した 1 件のみを返す。
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: データベースエラー、またはレコードの不整合
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, InfraError>;
}

/// `user` テーブルの行
#[derive(sqlx::FromRow)]
struct UserRow {
    id:           i64,
    email:        String,
    password:     String,
    full_name:    String,
    phone_number: String,
    roles:        Option<String>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord::from_db(
            UserId::new(row.id),
            Email::new(row.email).map_err(|e| DomainError::CorruptRecord {
                entity_type: "User",
                reason:      e.to_string(),
            })?,
            PasswordHash::new(row.password),
            row.full_name,
            row.phone_number,
            Role::from_column(row.roles),
        ))
    }
}

/// MySQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, full_name, phone_number, roles
            FROM `user`
            WHERE email = ?
            LIMIT 1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRecord::try_from).transpose()
    }
}
