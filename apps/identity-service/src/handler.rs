//! # HTTP リクエストハンドラ
//!
//! ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲する。
//!
//! - `auth`: ログイン
//! - `health`: ヘルスチェック

pub mod auth;
pub mod health;

pub use auth::{AuthState, LoginRequest, LoginResponse, login};
pub use health::{ReadinessState, health_check, readiness_check};
