//! # Identity ドメイン層
//!
//! ログイン（資格情報の検証とトークン発行）に関わるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: メールアドレス、パスワード、ペッパーなどを Newtype で表現
//! - **秘匿値の保護**: 平文パスワード・ペッパーは Debug 出力でマスクする
//! - **インフラ非依存**: DB・ハッシュ実装・署名実装には依存しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! identity-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`password`] - 平文パスワード、ハッシュ、ペッパー
//! - [`user`] - ユーザーレコードと識別子
//! - [`token`] - トークンのクレームと署名済みトークン
//! - [`clock`] - 時刻プロバイダ
//!
//! ## 使用例
//!
//! ```rust
//! use identity_domain::{
//!     password::{Pepper, PlainPassword},
//!     user::Email,
//! };
//!
//! let email = Email::new("alice@example.com").unwrap();
//! let candidate = Pepper::new("pepper").apply(&PlainPassword::new("secret123"));
//!
//! assert_eq!(email.as_str(), "alice@example.com");
//! assert_eq!(candidate.as_str(), "secret123pepper");
//! ```

pub mod clock;
pub mod error;
pub mod password;
pub mod token;
pub mod user;

pub use error::DomainError;
