//! # ビジネスイベントログとエラーコンテキスト
//!
//! ログイン結果などのビジネスイベントを `jq` で抽出しやすい形で出力するための
//! マクロとフィールド定数を提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] は `event.kind = "business_event"` を自動付与する。
//!
//! ```text
//! jq 'select(.["event.kind"] == "business_event")'
//! ```
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` と `error.kind` を付与する。定数は [`error`] モジュール。

/// ビジネスイベントを `info` レベルで出力する
///
/// 慣例として `event.category` / `event.action` / `event.result` を指定する。
/// 失敗時は `event.reason` に [`event::reason`] の定数を入れる。
///
/// 呼び出し側のクレートが `tracing` に依存している必要がある。
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    pub mod category {
        pub const AUTH: &str = "auth";
    }

    pub mod action {
        pub const LOGIN_SUCCESS: &str = "auth.login_success";
        pub const LOGIN_FAILURE: &str = "auth.login_failure";
    }

    pub mod entity_type {
        pub const USER: &str = "user";
    }

    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }

    /// ログイン失敗理由
    pub mod reason {
        pub const USER_NOT_FOUND: &str = "user_not_found";
        pub const INVALID_PASSWORD: &str = "invalid_password";
        pub const INVALID_INPUT: &str = "invalid_input";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    pub mod category {
        /// データベース・ハッシュ計算など自サービス内の基盤
        pub const INFRASTRUCTURE: &str = "infrastructure";
    }

    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const TOKEN_SIGNING: &str = "token_signing";
        pub const PASSWORD_VERIFICATION: &str = "password_verification";
        pub const INTERNAL: &str = "internal";
    }
}
