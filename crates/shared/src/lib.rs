//! # Identity 共有ユーティリティ
//!
//! ドメイン・インフラ・サービスの各クレートから共通で使うユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - tracing / tower に依存する部分は `observability` feature で有効化する

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
