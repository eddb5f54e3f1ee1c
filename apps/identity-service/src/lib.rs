//! # Identity Service ライブラリ
//!
//! メールアドレスとパスワードを検証し、有効期限 1 時間の署名済みトークンを発行する。
//! `main.rs` と結合テストから利用するため、ハンドラ・ユースケース・ルーター構築を公開する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
