//! # リポジトリ実装
//!
//! ユースケース層が依存するリポジトリトレイトと、その MySQL 実装を提供する。

pub mod user_repository;

pub use user_repository::{MySqlUserRepository, UserRepository};
