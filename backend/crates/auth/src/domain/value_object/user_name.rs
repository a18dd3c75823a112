//! User Name Value Object
//!
//! ユーザー名は画面表示用の**表示名**。ログインには使用しない（ログインはメールアドレス）。
//!
//! ## 設計方針
//! - Unicode を許可（日本語名など）
//! - NFC 正規化 → 前後空白除去 → 検証 の順で処理
//! - 大文字小文字は保持する
//!
//! ## 不変条件
//! - 長さ: 1〜255文字（正規化後）
//! - 制御文字を含まない

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 255;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after normalization
    Empty,

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name contains a control character
    ControlCharacter,
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Name is required"),
            Self::TooLong { max, .. } => write!(f, "Name must be less than {max} characters"),
            Self::ControlCharacter => write!(f, "Name contains invalid characters"),
        }
    }
}

impl std::error::Error for UserNameError {}

/// 表示名
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = raw.as_ref().nfc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// DB から復元（検証済みとみなす）
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_keep_case() {
        let name = UserName::new("  Alice Smith ").unwrap();
        assert_eq!(name.as_str(), "Alice Smith");
        assert_eq!(name.to_string(), "Alice Smith");
    }

    #[test]
    fn test_unicode_allowed() {
        assert_eq!(UserName::new("山田 太郎").unwrap().as_str(), "山田 太郎");
    }

    #[test]
    fn test_nfc_normalization() {
        // "e" + combining acute accent composes to a single code point
        let name = UserName::new("Rene\u{0301}").unwrap();
        assert_eq!(name.as_str(), "Ren\u{00e9}");
    }

    #[test]
    fn test_empty_fails() {
        assert_eq!(UserName::new("").unwrap_err(), UserNameError::Empty);
        assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
    }

    #[test]
    fn test_length_limit() {
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        let err = UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)).unwrap_err();
        assert_eq!(err.to_string(), "Name must be less than 255 characters");
    }

    #[test]
    fn test_control_character_fails() {
        assert_eq!(
            UserName::new("bad\u{0000}name").unwrap_err(),
            UserNameError::ControlCharacter
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let name: UserName = serde_json::from_str("\" Bob \"").unwrap();
        assert_eq!(name.as_str(), "Bob");
        assert!(serde_json::from_str::<UserName>("\"\"").is_err());
    }
}
