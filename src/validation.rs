//! Field-level validation results shared by the record modules.

use std::fmt;

use library_kernel::settings::Locale;
use serde::Serialize;

/// Rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorCode {
    Required,
}

/// A single failed rule on a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub code: FieldErrorCode,
    pub message: String,
}

/// Non-empty list of field errors, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|error| error.field).collect()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Which message to show for a failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Default message for a missing required field.
    RequiredField,
    TitleRequired,
    PublishedDateRequired,
}

/// Validation messages in the configured language.
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn text(&self, message: Message) -> &'static str {
        match (self.locale, message) {
            (Locale::En, Message::RequiredField) => "required field missing",
            (Locale::En, Message::TitleRequired) => "Title is required.",
            (Locale::En, Message::PublishedDateRequired) => "Published date is required.",
            (Locale::Sk, Message::RequiredField) => "povinné pole chýba",
            (Locale::Sk, Message::TitleRequired) => "Názov knihy je povinný.",
            (Locale::Sk, Message::PublishedDateRequired) => "Dátum vydania je povinný.",
        }
    }
}

/// Collects field errors while a record is checked.
#[derive(Debug)]
pub struct Validator<'a> {
    messages: &'a Messages,
    errors: Vec<FieldError>,
}

impl<'a> Validator<'a> {
    pub fn new(messages: &'a Messages) -> Self {
        Self {
            messages,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, field: &'static str, code: FieldErrorCode, message: Message) {
        self.errors.push(FieldError {
            field,
            code,
            message: self.messages.text(message).to_string(),
        });
    }

    /// Text is present only if it has at least one non-whitespace character.
    /// Returns the value as given.
    pub fn required_text(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        message: Message,
    ) -> Option<String> {
        match value {
            Some(text) if !text.trim().is_empty() => Some(text.to_string()),
            _ => {
                self.fail(field, FieldErrorCode::Required, message);
                None
            }
        }
    }

    pub fn required_value<T: Clone>(
        &mut self,
        field: &'static str,
        value: Option<&T>,
        message: Message,
    ) -> Option<T> {
        match value {
            Some(value) => Some(value.clone()),
            None => {
                self.fail(field, FieldErrorCode::Required, message);
                None
            }
        }
    }

    /// Returns `valid` if no rule failed, otherwise every collected error.
    ///
    /// `valid` is only evaluated when there are no errors, so it may unwrap
    /// the values returned by the `required_*` checks.
    pub fn finish<T>(self, valid: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.is_empty() {
            return Err(ValidationErrors(self.errors));
        }
        valid().ok_or_else(|| {
            ValidationErrors(vec![FieldError {
                field: "record",
                code: FieldErrorCode::Required,
                message: self.messages.text(Message::RequiredField).to_string(),
            }])
        })
    }
}
