//! # トークン
//!
//! ログイン成功時に発行する署名付きトークンのクレームを定義する。
//!
//! ## クレーム
//!
//! | クレーム | 内容 |
//! |---------|------|
//! | `id` | ユーザー ID |
//! | `email` | メールアドレス |
//! | `full_name` | 氏名 |
//! | `phone_number` | 電話番号 |
//! | `role` | ロール（未設定のユーザーでは省略） |
//! | `iat` | 発行時刻（UNIX 秒） |
//! | `exp` | 有効期限（UNIX 秒） |
//! | `jti` | トークン ID（発行ごとに一意） |
//!
//! トークンはサーバー側で保持しない（セッションストアなし）。

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::{UserId, UserRecord};

/// トークンの有効期間（秒）
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// トークンの有効期間
pub fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECONDS)
}

/// トークンに埋め込む身元情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id:           UserId,
    pub email:        String,
    pub full_name:    String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role:         Option<String>,
    pub iat:          i64,
    pub exp:          i64,
    pub jti:          String,
}

impl TokenClaims {
    /// ユーザーレコードからクレームを組み立てる
    ///
    /// `exp` は `issued_at + ttl`。`jti` は発行ごとに新しい UUID を振るため、
    /// 同じ秒に同じユーザーへ発行しても別のトークンになる。
    pub fn issue(user: &UserRecord, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            id: user.id(),
            email: user.email().as_str().to_string(),
            full_name: user.full_name().to_string(),
            phone_number: user.phone_number().to_string(),
            role: user.role().map(|r| r.as_str().to_string()),
            iat,
            exp: iat + ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// 有効期限を過ぎているか
    ///
    /// `exp` ちょうどの時刻は期限切れとみなす。
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// 署名済みトークン（JWS コンパクト形式）
///
/// ベアラー資格情報であるため、Debug 出力では値をマスクする。
#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken(String);

impl fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignedToken").field(&"[REDACTED]").finish()
    }
}

impl SignedToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{
        password::PasswordHash,
        user::{Email, Role},
    };

    fn user_with_role(role: Option<&str>) -> UserRecord {
        UserRecord::from_db(
            UserId::new(7),
            Email::new("alice@example.com").unwrap(),
            PasswordHash::new("$2b$04$dummy"),
            "Alice Example".to_string(),
            "090-0000-0000".to_string(),
            Role::from_column(role.map(str::to_string)),
        )
    }

    #[fixture]
    fn issued_at() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[rstest]
    fn test_クレームにユーザーの身元情報が入る(issued_at: DateTime<Utc>) {
        let claims = TokenClaims::issue(&user_with_role(Some("admin")), issued_at, token_ttl());

        assert_eq!(claims.id, UserId::new(7));
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.full_name, "Alice Example");
        assert_eq!(claims.phone_number, "090-0000-0000");
        assert_eq!(claims.role.as_deref(), Some("admin"));
    }

    #[rstest]
    fn test_有効期限は発行から1時間後(issued_at: DateTime<Utc>) {
        let claims = TokenClaims::issue(&user_with_role(None), issued_at, token_ttl());

        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_003_600);
    }

    #[rstest]
    #[case(0, false)]
    #[case(3599, false)]
    #[case(3600, true)]
    #[case(3601, true)]
    fn test_期限切れ判定(
        issued_at: DateTime<Utc>,
        #[case] elapsed_seconds: i64,
        #[case] expired: bool,
    ) {
        let claims = TokenClaims::issue(&user_with_role(None), issued_at, token_ttl());
        let now = issued_at + Duration::seconds(elapsed_seconds);

        assert_eq!(claims.is_expired_at(now), expired);
    }

    #[rstest]
    fn test_同じ時刻に発行してもjtiは異なる(issued_at: DateTime<Utc>) {
        let user = user_with_role(None);
        let first = TokenClaims::issue(&user, issued_at, token_ttl());
        let second = TokenClaims::issue(&user, issued_at, token_ttl());

        assert_ne!(first.jti, second.jti);
    }

    #[rstest]
    fn test_ロールなしではroleクレームを省略する(issued_at: DateTime<Utc>) {
        let claims = TokenClaims::issue(&user_with_role(None), issued_at, token_ttl());
        let json = serde_json::to_value(&claims).unwrap();

        assert!(json.get("role").is_none());
        assert_eq!(json["full_name"], "Alice Example");
        assert_eq!(json["phone_number"], "090-0000-0000");
        assert_eq!(json["id"], 7);
    }

    #[rstest]
    fn test_署名済みトークンのdebug出力はマスクされる() {
        let token = SignedToken::new("header.payload.signature");
        assert!(!format!("{token:?}").contains("payload"));
    }
}
