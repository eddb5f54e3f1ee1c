//! # パスワード検証
//!
//! 保存済みハッシュと平文パスワードを照合する。
//!
//! | 実装 | 対応するハッシュ |
//! |------|-----------------|
//! | [`BcryptPasswordChecker`] | `$2a$` / `$2b$` / `$2y$` |
//! | [`Argon2PasswordChecker`] | `$argon2id$` ほか Argon2 系 |
//! | [`HashSchemeDispatcher`] | 接頭辞で上記のいずれかに振り分ける |
//!
//! 検証は CPU 負荷が高い同期処理のため、非同期コンテキストからは
//! `tokio::task::spawn_blocking` 経由で呼び出すこと。

use argon2::{Argon2, PasswordVerifier as _, password_hash::PasswordHash as Argon2PasswordHash};
use identity_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// パスワード検証を担当するトレイト
pub trait PasswordChecker: Send + Sync {
    /// パスワードを検証する
    ///
    /// # Errors
    ///
    /// - ハッシュが解釈できない形式の場合
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError>;
}

/// bcrypt によるパスワード検証の実装
///
/// コストとソルトはハッシュ文字列に埋め込まれた値を使う。
#[derive(Debug, Default, Clone, Copy)]
pub struct BcryptPasswordChecker;

impl BcryptPasswordChecker {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordChecker for BcryptPasswordChecker {
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let matched = bcrypt::verify(password.as_str(), hash.as_str()).map_err(|e| match e {
            // ハッシュ文字列そのものをメッセージに含めない
            bcrypt::BcryptError::InvalidHash(_) => {
                InfraError::invalid_hash("bcrypt: ハッシュ形式が不正です")
            }
            other => InfraError::invalid_hash(format!("bcrypt: {other}")),
        })?;

        Ok(PasswordVerifyResult::from(matched))
    }
}

/// Argon2 によるパスワード検証の実装
///
/// アルゴリズムとパラメータは PHC 文字列から読み取る。
pub struct Argon2PasswordChecker {
    argon2: Argon2<'static>,
}

impl Argon2PasswordChecker {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordChecker for Argon2PasswordChecker {
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let parsed = Argon2PasswordHash::new(hash.as_str())
            .map_err(|e| InfraError::invalid_hash(format!("argon2: {e}")))?;

        match self
            .argon2
            .verify_password(password.as_str().as_bytes(), &parsed)
        {
            Ok(()) => Ok(PasswordVerifyResult::Match),
            Err(argon2::password_hash::Error::Password) => Ok(PasswordVerifyResult::Mismatch),
            // パラメータ不正など、照合以前に失敗したもの
            Err(e) => Err(InfraError::invalid_hash(format!("argon2: {e}"))),
        }
    }
}

/// ハッシュの方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HashScheme {
    Bcrypt,
    Argon2,
}

impl HashScheme {
    fn detect(hash: &str) -> Option<Self> {
        if ["$2a$", "$2b$", "$2y$"].iter().any(|p| hash.starts_with(p)) {
            Some(Self::Bcrypt)
        } else if hash.starts_with("$argon2") {
            Some(Self::Argon2)
        } else {
            None
        }
    }
}

/// ハッシュの接頭辞から検証器を選ぶ実装
///
/// 既存ユーザーの bcrypt ハッシュと、再ハッシュ済みの Argon2id ハッシュが
/// 混在するテーブルを扱うために使う。
#[derive(Default)]
pub struct HashSchemeDispatcher {
    bcrypt: BcryptPasswordChecker,
    argon2: Argon2PasswordChecker,
}

impl HashSchemeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordChecker for HashSchemeDispatcher {
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        match HashScheme::detect(hash.as_str()) {
            Some(HashScheme::Bcrypt) => self.bcrypt.verify(password, hash),
            Some(HashScheme::Argon2) => self.argon2.verify(password, hash),
            None => Err(InfraError::invalid_hash("未対応のハッシュ方式")),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::InfraErrorKind;

    // password123 の Argon2id ハッシュ
    const ARGON2_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$olntqw+EoVpwH4B1vUAI0A$5yCA1izLODgz8nQOInDGwbuQB/AS0sIQDwpmIilve5M";

    fn bcrypt_hash(plain: &str, version: bcrypt::Version) -> PasswordHash {
        let parts = bcrypt::hash_with_result(plain, 4).unwrap();
        PasswordHash::new(parts.format_for_version(version))
    }

    #[rstest]
    #[case(bcrypt::Version::TwoA)]
    #[case(bcrypt::Version::TwoB)]
    #[case(bcrypt::Version::TwoY)]
    fn test_bcrypt_正しいパスワードは一致する(#[case] version: bcrypt::Version) {
        let hash = bcrypt_hash("secret123", version);

        let result = BcryptPasswordChecker::new()
            .verify(&PlainPassword::new("secret123"), &hash)
            .unwrap();

        assert!(result.is_match());
    }

    #[rstest]
    fn test_bcrypt_異なるパスワードは不一致() {
        let hash = bcrypt_hash("secret123", bcrypt::Version::TwoB);

        let result = BcryptPasswordChecker::new()
            .verify(&PlainPassword::new("secret124"), &hash)
            .unwrap();

        assert!(result.is_mismatch());
    }

    #[rstest]
    fn test_bcrypt_不正なハッシュ形式はエラー() {
        let result = BcryptPasswordChecker::new()
            .verify(&PlainPassword::new("secret123"), &PasswordHash::new("$2b$nonsense"));

        let err = result.unwrap_err();
        assert!(matches!(err.kind(), InfraErrorKind::InvalidHash(_)));
    }

    #[rstest]
    fn test_argon2_正しいパスワードを検証できる() {
        let result = Argon2PasswordChecker::new()
            .verify(&PlainPassword::new("password123"), &PasswordHash::new(ARGON2_HASH))
            .unwrap();

        assert!(result.is_match());
    }

    #[rstest]
    fn test_argon2_不正なパスワードを検証できる() {
        let result = Argon2PasswordChecker::new()
            .verify(&PlainPassword::new("wrongpassword"), &PasswordHash::new(ARGON2_HASH))
            .unwrap();

        assert!(result.is_mismatch());
    }

    #[rstest]
    fn test_argon2_パラメータが不正なハッシュは不一致ではなくエラー() {
        // m=1 は Argon2 の最小メモリコストを下回る
        let hash = PasswordHash::new(
            "$argon2id$v=19$m=1,t=1,p=1$olntqw+EoVpwH4B1vUAI0A$5yCA1izLODgz8nQOInDGwbuQB/AS0sIQDwpmIilve5M",
        );

        let argon2_result =
            Argon2PasswordChecker::new().verify(&PlainPassword::new("password123"), &hash);
        let dispatched =
            HashSchemeDispatcher::new().verify(&PlainPassword::new("password123"), &hash);

        assert!(matches!(
            argon2_result.unwrap_err().kind(),
            InfraErrorKind::InvalidHash(_)
        ));
        assert!(matches!(
            dispatched.unwrap_err().kind(),
            InfraErrorKind::InvalidHash(_)
        ));
    }

    #[rstest]
    #[case("$2a$10$abc", Some(HashScheme::Bcrypt))]
    #[case("$2b$10$abc", Some(HashScheme::Bcrypt))]
    #[case("$2y$10$abc", Some(HashScheme::Bcrypt))]
    #[case("$argon2id$v=19$...", Some(HashScheme::Argon2))]
    #[case("$argon2i$v=19$...", Some(HashScheme::Argon2))]
    #[case("5f4dcc3b5aa765d61d8327deb882cf99", None)]
    #[case("", None)]
    fn test_接頭辞からハッシュ方式を判定する(
        #[case] hash: &str,
        #[case] expected: Option<HashScheme>,
    ) {
        assert_eq!(HashScheme::detect(hash), expected);
    }

    #[rstest]
    fn test_dispatcher_bcryptとargon2の両方を検証できる() {
        let dispatcher = HashSchemeDispatcher::new();
        let bcrypt_stored = bcrypt_hash("password123", bcrypt::Version::TwoB);
        let argon2_stored = PasswordHash::new(ARGON2_HASH);
        let password = PlainPassword::new("password123");

        assert!(dispatcher.verify(&password, &bcrypt_stored).unwrap().is_match());
        assert!(dispatcher.verify(&password, &argon2_stored).unwrap().is_match());
    }

    #[rstest]
    fn test_dispatcher_未対応の方式はエラー() {
        let result = HashSchemeDispatcher::new().verify(
            &PlainPassword::new("password123"),
            &PasswordHash::new("5f4dcc3b5aa765d61d8327deb882cf99"),
        );

        assert!(matches!(
            result.unwrap_err().kind(),
            InfraErrorKind::InvalidHash(_)
        ));
    }
}
