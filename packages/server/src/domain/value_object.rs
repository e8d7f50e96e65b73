//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ValueObjectError;

/// Maximum length of a todo title (mirrors the `VARCHAR(255)` column).
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of a todo status (mirrors the `VARCHAR(50)` column).
pub const MAX_STATUS_LENGTH: usize = 50;

/// Status assigned to a todo when none is given.
pub const DEFAULT_STATUS: &str = "pending";

/// Todo identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Todo title value object.
///
/// Must contain at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Create a new TodoTitle.
    ///
    /// # Arguments
    ///
    /// * `title` - The raw title string
    ///
    /// # Returns
    ///
    /// A Result containing the TodoTitle or an error if validation fails
    pub fn new(title: String) -> Result<Self, ValueObjectError> {
        if title.trim().is_empty() {
            return Err(ValueObjectError::TitleEmpty);
        }
        let len = title.chars().count();
        if len > MAX_TITLE_LENGTH {
            return Err(ValueObjectError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
                actual: len,
            });
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TodoTitle {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoTitle> for String {
    fn from(value: TodoTitle) -> Self {
        value.0
    }
}

/// Todo status value object.
///
/// The vocabulary is open: any short non-empty label is accepted. Clients
/// use `pending` and `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoStatus(String);

impl TodoStatus {
    pub fn new(status: String) -> Result<Self, ValueObjectError> {
        if status.trim().is_empty() {
            return Err(ValueObjectError::StatusEmpty);
        }
        let len = status.chars().count();
        if len > MAX_STATUS_LENGTH {
            return Err(ValueObjectError::StatusTooLong {
                max: MAX_STATUS_LENGTH,
                actual: len,
            });
        }
        Ok(Self(status))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TodoStatus {
    fn default() -> Self {
        Self(DEFAULT_STATUS.to_string())
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TodoStatus {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoStatus> for String {
    fn from(value: TodoStatus) -> Self {
        value.0
    }
}

/// Due date value object (a calendar date, no time component).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Wire and storage format.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
        NaiveDate::parse_from_str(value.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| ValueObjectError::DueDateInvalidFormat(value.to_string()))
    }

    pub fn value(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_title_valid() {
        // テスト項目: 有効なタイトルで TodoTitle を作成できる
        // given (前提条件):
        let raw = "Buy milk".to_string();

        // when (操作):
        let result = TodoTitle::new(raw);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "Buy milk");
    }

    #[test]
    fn test_todo_title_whitespace_only_is_rejected() {
        // テスト項目: 空白のみのタイトルはエラーになる
        // given (前提条件):
        let raw = "   ".to_string();

        // when (操作):
        let result = TodoTitle::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::TitleEmpty));
    }

    #[test]
    fn test_todo_title_boundary_length() {
        // テスト項目: 255 文字は許可され、256 文字はエラーになる
        // given (前提条件):
        let ok = "a".repeat(MAX_TITLE_LENGTH);
        let too_long = "a".repeat(MAX_TITLE_LENGTH + 1);

        // when (操作):
        let ok_result = TodoTitle::new(ok);
        let err_result = TodoTitle::new(too_long);

        // then (期待する結果):
        assert!(ok_result.is_ok());
        assert_eq!(
            err_result,
            Err(ValueObjectError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
                actual: MAX_TITLE_LENGTH + 1,
            })
        );
    }

    #[test]
    fn test_todo_status_default_is_pending() {
        assert_eq!(TodoStatus::default().as_str(), "pending");
    }

    #[test]
    fn test_todo_status_open_vocabulary() {
        // テスト項目: 任意の短いステータス文字列を受け付ける
        // given (前提条件):
        let raw = "in-review".to_string();

        // when (操作):
        let result = TodoStatus::new(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "in-review");
    }

    #[test]
    fn test_todo_status_empty_and_too_long() {
        assert_eq!(
            TodoStatus::new(String::new()),
            Err(ValueObjectError::StatusEmpty)
        );
        assert!(matches!(
            TodoStatus::new("x".repeat(MAX_STATUS_LENGTH + 1)),
            Err(ValueObjectError::StatusTooLong { .. })
        ));
    }

    #[test]
    fn test_due_date_parse() {
        // テスト項目: YYYY-MM-DD 形式の日付をパースできる
        // given (前提条件):
        let raw = "2025-02-28";

        // when (操作):
        let result = DueDate::parse(raw);

        // then (期待する結果):
        let due = result.unwrap();
        assert_eq!(due.value(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(due.to_string(), "2025-02-28");
    }

    #[test]
    fn test_due_date_rejects_other_formats() {
        // テスト項目: 不正な形式・存在しない日付はエラーになる
        for raw in ["28/02/2025", "2025-02-30", "2025-02-28T10:00:00Z", ""] {
            assert_eq!(
                DueDate::parse(raw),
                Err(ValueObjectError::DueDateInvalidFormat(raw.to_string())),
                "input: {raw:?}"
            );
        }
    }

    #[test]
    fn test_due_date_serializes_as_calendar_date() {
        let due = DueDate::parse("2024-12-01").unwrap();
        assert_eq!(serde_json::to_string(&due).unwrap(), "\"2024-12-01\"");
    }
}
