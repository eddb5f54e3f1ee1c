//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成やデータベースからの復元で発生するエラー。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `CorruptRecord` | 500 Internal Server Error | 永続化済みデータが不正 |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// リクエスト由来の値がドメインの制約を満たさない場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 永続化済みレコードの不整合
    ///
    /// データベースから読み出した値が値オブジェクトの制約を満たさない場合に使用する。
    /// クライアントの入力ではなくデータ側の問題であるため、API 層では 500 として扱う。
    #[error("{entity_type} のレコードが不正です: {reason}")]
    CorruptRecord {
        /// エンティティの種類
        entity_type: &'static str,
        /// 不正と判断した理由
        reason:      String,
    },
}
