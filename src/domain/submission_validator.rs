/// お問い合わせフォーム入力のバリデーション
///
/// 必須項目とメールアドレス形式を検証する。
/// 最初の失敗で打ち切らず、全ての失敗をまとめて返す。
use std::fmt;

use lettre::Address;
use thiserror::Error;

use crate::domain::SubmissionInput;

/// 個々の検証ルールの失敗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("First name is required")]
    FirstNameRequired,
    #[error("Last name is required")]
    LastNameRequired,
    #[error("Email is required")]
    EmailRequired,
    /// local@domain として解釈できない
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("Subject is required")]
    SubjectRequired,
    #[error("Message is required")]
    MessageRequired,
}

/// 検証失敗の一覧（ルールの評価順）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// エラーの区切り文字
    pub const DELIMITER: &'static str = ", ";

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn contains(&self, error: ValidationError) -> bool {
        self.0.contains(&error)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join(Self::DELIMITER))
    }
}

impl std::error::Error for ValidationErrors {}

/// お問い合わせフォームのバリデータ
pub struct SubmissionValidator;

impl SubmissionValidator {
    /// 入力を検証する
    ///
    /// チェック内容（この順に評価し、失敗は全て収集する）:
    /// 1. firstNameが空でない
    /// 2. lastNameが空でない
    /// 3. emailが空でなく、単一のメールアドレスとして解釈できる
    /// 4. subjectが空でない
    /// 5. messageが空でない
    ///
    /// emailが空の場合は`EmailRequired`のみを報告する。
    pub fn validate(input: &SubmissionInput) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if is_blank(&input.first_name) {
            errors.push(ValidationError::FirstNameRequired);
        }

        if is_blank(&input.last_name) {
            errors.push(ValidationError::LastNameRequired);
        }

        match input.email.as_deref() {
            Some(email) if !email.trim().is_empty() => {
                if !Self::is_valid_email(email) {
                    errors.push(ValidationError::InvalidEmailFormat);
                }
            }
            _ => errors.push(ValidationError::EmailRequired),
        }

        if is_blank(&input.subject) {
            errors.push(ValidationError::SubjectRequired);
        }

        if is_blank(&input.message) {
            errors.push(ValidationError::MessageRequired);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// メールアドレスの構文チェック
    ///
    /// 表示名や前後の空白を含まない `local@domain` 単体のみを受け付ける。
    pub fn is_valid_email(email: &str) -> bool {
        email
            .parse::<Address>()
            .map(|address| AsRef::<str>::as_ref(&address) == email)
            .unwrap_or(false)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}
