//! # Identity インフラ層
//!
//! ドメイン層のモデルを外部システム（MySQL、ハッシュ実装、トークン署名）に接続する。
//!
//! ## 責務
//!
//! - **データベース接続**: MySQL への接続プール管理
//! - **リポジトリ実装**: `user` テーブルからのユーザー取得
//! - **パスワード検証**: bcrypt / Argon2id ハッシュとの照合
//! - **トークン署名**: HS256 による JWS の発行と検証
//!
//! ## 依存関係
//!
//! ```text
//! identity-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - MySQL 接続設定とプール
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワード検証器
//! - [`repository`] - リポジトリ実装
//! - [`token`] - トークン署名器

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;
pub mod token;

pub use error::{InfraError, InfraErrorKind};
pub use password::{
    Argon2PasswordChecker,
    BcryptPasswordChecker,
    HashSchemeDispatcher,
    PasswordChecker,
};
pub use token::{JwtTokenSigner, SigningSecret, TokenSigner};
