//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | ログイン時の入力値 |
//! | [`PasswordHash`] | パスワードハッシュ | `user.password` カラムに保存された値 |
//! | [`PasswordVerifyResult`] | 検証結果 | パスワード検証の成否 |
//! | [`Pepper`] | ペッパー | 検証前に平文へ連結するサーバー側の秘密値 |

use std::fmt;

/// 平文パスワード（ログイン時の入力値）
///
/// # セキュリティ
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

impl PlainPassword {
    /// パスワードを作成する
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 空文字列かどうか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// パスワードハッシュ
///
/// ソルト付きの適応型ハッシュ（bcrypt / Argon2id）をラップする。
/// ハッシュ形式の判定はインフラ層の検証器が行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// ハッシュ文字列からインスタンスを作成する
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// パスワード検証結果
///
/// bool ではなく専用の型を使い、呼び出し側での取り違えを防ぐ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    /// パスワードが一致した
    Match,
    /// パスワードが一致しなかった
    Mismatch,
}

impl PasswordVerifyResult {
    /// 一致したかどうかを返す
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// 一致しなかったかどうかを返す
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Mismatch }
    }
}

/// ペッパー
///
/// 全ユーザー共通のサーバー側秘密値。プロセス起動時に一度だけ読み込み、
/// プロセスの生存期間中は変更しない。ユーザー入力から導出してはならない。
///
/// 保存済みハッシュは `password + pepper` に対して計算されているため、
/// 検証時も同じ順序で連結する。
#[derive(Clone)]
pub struct Pepper(String);

impl fmt::Debug for Pepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pepper").field(&"[REDACTED]").finish()
    }
}

impl Pepper {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 平文パスワードの末尾にペッパーを連結した検証用の値を返す
    pub fn apply(&self, password: &PlainPassword) -> PlainPassword {
        let mut candidate = String::with_capacity(password.as_str().len() + self.0.len());
        candidate.push_str(password.as_str());
        candidate.push_str(&self.0);
        PlainPassword(candidate)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_平文パスワードのdebug出力はマスクされる() {
        let password = PlainPassword::new("secret");
        let debug = format!("{:?}", password);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }

    #[rstest]
    #[case("", true)]
    #[case("x", false)]
    fn test_平文パスワードの空判定(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(PlainPassword::new(value).is_empty(), expected);
    }

    #[rstest]
    fn test_ペッパーは末尾に連結される() {
        let pepper = Pepper::new("-pepper");
        let candidate = pepper.apply(&PlainPassword::new("secret123"));
        assert_eq!(candidate.as_str(), "secret123-pepper");
    }

    #[rstest]
    fn test_空のペッパーは平文をそのまま返す() {
        let candidate = Pepper::new("").apply(&PlainPassword::new("secret123"));
        assert_eq!(candidate.as_str(), "secret123");
    }

    #[rstest]
    fn test_ペッパーのdebug出力はマスクされる() {
        let debug = format!("{:?}", Pepper::new("top-secret-pepper"));
        assert!(!debug.contains("top-secret-pepper"));
    }

    #[rstest]
    #[case(true, PasswordVerifyResult::Match)]
    #[case(false, PasswordVerifyResult::Mismatch)]
    fn test_boolからの変換(#[case] matched: bool, #[case] expected: PasswordVerifyResult) {
        let result = PasswordVerifyResult::from(matched);
        assert_eq!(result, expected);
        assert_eq!(result.is_match(), matched);
        assert_eq!(result.is_mismatch(), !matched);
    }
}
