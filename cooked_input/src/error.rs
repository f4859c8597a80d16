//! # Errors
//!
//! Every stage of the input pipeline has its own error type:
//!
//! - [`ConvertError`]: a convertor could not turn the cleaned text into a value.
//! - [`ValidationError`]: a validator rejected the converted value.
//! - [`InputError`]: what a prompt (or [`crate::process_value`]) hands back to the caller.
//!
//! The `Display` output of [`InputError`] is what gets shown to the user
//! between two attempts, e.g. `"abc" cannot be converted to an integer number`.
use std::io;
use thiserror::Error;

/// Returned by a [`crate::Convert`] implementation when the text has the wrong shape.
///
/// `expected` is the convertor's `value_error_str` (for example `"an integer number"`).
/// `value` names the part of the input that failed when it is not the whole
/// text, such as one element of a list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot be converted to {expected}")]
pub struct ConvertError {
    pub expected: String,
    pub value: Option<String>,
}

impl ConvertError {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            value: None,
        }
    }

    /// Blames `value` instead of the whole input. An inner blame is kept.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value.get_or_insert_with(|| value.into());
        self
    }
}

/// Returned by a [`crate::Validate`] implementation.
///
/// The message is a predicate phrase such as `is too low (min value is 1)`;
/// it reads naturally once prefixed with the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// Errors surfaced by prompts and by [`crate::process_value`].
///
/// `Convert`, `Invalid` and `Blank` are recoverable: an interactive prompt
/// reports them and asks again. `Eof`, `RetriesExhausted` and `Io` end the prompt.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("\"{value}\" {source}")]
    Convert {
        value: String,
        #[source]
        source: ConvertError,
    },

    #[error("\"{value}\" {source}")]
    Invalid {
        value: String,
        #[source]
        source: ValidationError,
    },

    #[error("a value is required")]
    Blank,

    #[error("input closed before a valid value was entered")]
    Eof,

    #[error("no valid value after {0} attempts")]
    RetriesExhausted(usize),

    #[error("terminal i/o failed")]
    Io(#[from] io::Error),
}

impl InputError {
    /// `true` for the errors a prompt reports and recovers from by asking again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Convert { .. } | Self::Invalid { .. } | Self::Blank)
    }

    /// The message without the offending value, safe to log for secret input.
    pub fn reason(&self) -> String {
        match self {
            Self::Convert { source, .. } => source.to_string(),
            Self::Invalid { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }

    /// The cleaned value that caused the error, when there is one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Convert { value, .. } | Self::Invalid { value, .. } => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_error_message_names_value_and_expectation() {
        let err = InputError::Convert {
            value: "abc".to_string(),
            source: ConvertError::new("an integer number"),
        };
        assert_eq!(
            err.to_string(),
            "\"abc\" cannot be converted to an integer number"
        );
        assert_eq!(err.value(), Some("abc"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn invalid_error_message_prefixes_reason_with_value() {
        let err = InputError::Invalid {
            value: "42".to_string(),
            source: ValidationError::new("is too high (max value is 10)"),
        };
        assert_eq!(err.to_string(), "\"42\" is too high (max value is 10)");
        assert_eq!(err.reason(), "is too high (max value is 10)");
    }

    #[test]
    fn terminal_errors_are_not_recoverable() {
        assert!(!InputError::Eof.is_recoverable());
        assert!(!InputError::RetriesExhausted(3).is_recoverable());
        assert_eq!(InputError::Eof.value(), None);
        assert_eq!(
            InputError::RetriesExhausted(3).to_string(),
            "no valid value after 3 attempts"
        );
    }
}
