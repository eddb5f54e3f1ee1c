//! # MySQL データベース接続管理
//!
//! `user` テーブルを持つ MySQL への接続プールを作成する。
//!
//! 接続情報は URL ではなく個別の値（ホスト・ポート・ユーザー・パスワード・DB 名）で受け取り、
//! [`MySqlConnectOptions`] に組み立てる。パスワードに記号が含まれていても
//! URL エンコードを意識せずに済む。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use identity_infra::db::{self, DatabaseConfig};
//!
//! let pool = db::create_pool(&config).await?;
//! db::ping(&pool).await?;
//! ```

use std::{fmt, time::Duration};

use sqlx::{
    MySqlPool,
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
};

use crate::InfraError;

/// 接続取得のタイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// データベース接続設定
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host:            String,
    pub port:            u16,
    pub user:            String,
    pub password:        String,
    pub database:        String,
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseConfig {
    /// sqlx の接続オプションに変換する
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }

    fn pool_options(&self) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
    }
}

/// MySQL 接続プールを作成する
///
/// 起動時に一度だけ呼び出し、作成したプールをアプリケーション全体で共有する。
/// 接続は最初のクエリまで確立しない（lazy）。起動時の疎通確認には [`ping`] を使う。
pub fn create_pool(config: &DatabaseConfig) -> MySqlPool {
    config.pool_options().connect_lazy_with(config.connect_options())
}

/// データベースへの疎通を確認する
///
/// Readiness Check とサービス起動時に使用する。
pub async fn ping(pool: &MySqlPool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> DatabaseConfig {
        DatabaseConfig {
            host:            "db.internal".to_string(),
            port:            3307,
            user:            "identity".to_string(),
            password:        "p@ss/word".to_string(),
            database:        "accounts".to_string(),
            max_connections: 4,
        }
    }

    #[test]
    fn test_接続オプションに各値が反映される() {
        let options = config().connect_options();

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 3307);
        assert_eq!(options.get_username(), "identity");
        assert_eq!(options.get_database(), Some("accounts"));
    }

    #[test]
    fn test_debug出力でパスワードはマスクされる() {
        let debug = format!("{:?}", config());

        assert!(!debug.contains("p@ss/word"));
        assert!(debug.contains("db.internal"));
    }

    #[tokio::test]
    async fn test_到達できないホストへのpingはデータベースエラー() {
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..config()
        };
        let pool = MySqlPoolOptions::new()
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy_with(config.connect_options());

        let err = ping(&pool).await.unwrap_err();

        assert!(matches!(err.kind(), crate::InfraErrorKind::Database(_)));
    }
}
