//! # Validators
//!
//! Validators are the last stage of the pipeline. They receive the converted
//! value and either accept it or explain why not. Validators never change
//! the value, and they short-circuit: the first failure is reported.
//!
//! ## Features
//! - Length checks for strings and lists ([`ExactLength`], [`InLength`])
//! - Value checks ([`ExactValue`], [`InRange`], [`InChoices`])
//! - Pattern checks ([`RegexValidator`], [`PasswordValidator`])
//! - Composition ([`NotIn`], [`AllOf`], [`AnyOf`], [`ListValidator`])
//! - Ad-hoc rules via [`Custom`]
//!
//! ## Example
//! ```rust
//! use cooked_input::{InRange, Validate};
//!
//! let percent = InRange::new(0, 100);
//! assert!(percent.validate(&42).is_ok());
//! assert_eq!(
//!     percent.validate(&101).unwrap_err().to_string(),
//!     "is too high (max value is 100)"
//! );
//! ```
use std::fmt::Display;

use regex::Regex;

use crate::error::ValidationError;

/// Checks a converted value.
///
/// Returns `Ok(())` when the value is acceptable, or a [`ValidationError`]
/// whose reason is phrased to follow the value (`"7" is not length 3`).
pub trait Validate<T: ?Sized> {
    fn validate(&self, value: &T) -> Result<(), ValidationError>;
}

/// A type-erased validator, as stored by a [`crate::Pipeline`].
pub type BoxedValidator<T> = Box<dyn Validate<T>>;

impl<T: ?Sized, V: Validate<T> + ?Sized> Validate<T> for Box<V> {
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        (**self).validate(value)
    }
}

impl<T: ?Sized, V: Validate<T> + ?Sized> Validate<T> for &V {
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        (**self).validate(value)
    }
}

/// Anything with a length that the length validators can measure.
///
/// Strings are measured in characters, not bytes.
pub trait HasLength {
    fn length(&self) -> usize;
}

impl HasLength for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl HasLength for String {
    fn length(&self) -> usize {
        self.as_str().length()
    }
}

impl<T> HasLength for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLength for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

/// The value must have exactly this length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactLength(pub usize);

impl<T: HasLength + ?Sized> Validate<T> for ExactLength {
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        if value.length() == self.0 {
            Ok(())
        } else {
            Err(ValidationError::new(format!("is not length {}", self.0)))
        }
    }
}

/// The value's length must lie in `[min, max]`; either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InLength {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl InLength {
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

impl<T: HasLength + ?Sized> Validate<T> for InLength {
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        let len = value.length();
        if let Some(min) = self.min.filter(|min| len < *min) {
            return Err(ValidationError::new(format!(
                "is too short (min length is {min})"
            )));
        }
        if let Some(max) = self.max.filter(|max| len > *max) {
            return Err(ValidationError::new(format!(
                "is too long (max length is {max})"
            )));
        }
        Ok(())
    }
}

/// The value must equal the given one.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactValue<T>(pub T);

impl<T, U> Validate<U> for ExactValue<T>
where
    U: PartialEq<T> + ?Sized,
    T: Display,
{
    fn validate(&self, value: &U) -> Result<(), ValidationError> {
        if *value == self.0 {
            Ok(())
        } else {
            Err(ValidationError::new(format!("is not {}", self.0)))
        }
    }
}

/// The value must lie in `[min, max]`; either bound may be open.
#[derive(Debug, Clone, PartialEq)]
pub struct InRange<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> InRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: T) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: T) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

impl<T: PartialOrd + Display> Validate<T> for InRange<T> {
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        // NaN compares false against everything and would slip through
        if self
            .min
            .iter()
            .chain(&self.max)
            .any(|bound| value.partial_cmp(bound).is_none())
        {
            return Err(ValidationError::new("is not comparable with the range"));
        }
        if let Some(min) = self.min.as_ref().filter(|min| value < *min) {
            return Err(ValidationError::new(format!(
                "is too low (min value is {min})"
            )));
        }
        if let Some(max) = self.max.as_ref().filter(|max| value > *max) {
            return Err(ValidationError::new(format!(
                "is too high (max value is {max})"
            )));
        }
        Ok(())
    }
}

/// The value must be one of the choices.
#[derive(Debug, Clone, PartialEq)]
pub struct InChoices<T>(pub Vec<T>);

impl<T> InChoices<T> {
    pub fn new<I: Into<T>>(choices: impl IntoIterator<Item = I>) -> Self {
        Self(choices.into_iter().map(Into::into).collect())
    }
}

impl<T, U> Validate<U> for InChoices<T>
where
    U: PartialEq<T> + ?Sized,
    T: Display,
{
    fn validate(&self, value: &U) -> Result<(), ValidationError> {
        if self.0.iter().any(|choice| *value == *choice) {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "is not a valid choice (choices are: {})",
                join(&self.0)
            )))
        }
    }
}

/// Inverts a set of validators: fails when *any* of them accepts the value.
///
/// `NotIn::new([InChoices::new(["licorice"])])` rejects licorice.
pub struct NotIn<T: ?Sized> {
    validators: Vec<BoxedValidator<T>>,
}

impl<T: ?Sized> NotIn<T> {
    pub fn new<V: Validate<T> + 'static>(validators: impl IntoIterator<Item = V>) -> Self {
        Self {
            validators: validators
                .into_iter()
                .map(|v| Box::new(v) as BoxedValidator<T>)
                .collect(),
        }
    }

    pub fn from_boxed(validators: Vec<BoxedValidator<T>>) -> Self {
        Self { validators }
    }
}

impl<T: ?Sized> Validate<T> for NotIn<T> {
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        if not_in(value, &self.validators) {
            Ok(())
        } else {
            Err(ValidationError::new("is not allowed"))
        }
    }
}

/// Passes only when every inner validator passes; reports the first failure.
pub struct AllOf<T: ?Sized> {
    validators: Vec<BoxedValidator<T>>,
}

impl<T: ?Sized> AllOf<T> {
    pub fn new(validators: Vec<BoxedValidator<T>>) -> Self {
        Self { validators }
    }
}

impl<T: ?Sized> Validate<T> for AllOf<T> {
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        validate(value, &self.validators)
    }
}

/// Passes when at least one inner validator passes.
///
/// On failure every reason is reported, joined with `or`.
pub struct AnyOf<T: ?Sized> {
    validators: Vec<BoxedValidator<T>>,
}

impl<T: ?Sized> AnyOf<T> {
    pub fn new(validators: Vec<BoxedValidator<T>>) -> Self {
        Self { validators }
    }
}

impl<T: ?Sized> Validate<T> for AnyOf<T> {
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        let mut reasons = Vec::with_capacity(self.validators.len());
        for validator in &self.validators {
            match validator.validate(value) {
                Ok(()) => return Ok(()),
                Err(e) => reasons.push(e.0),
            }
        }
        if reasons.is_empty() {
            return Ok(());
        }
        Err(ValidationError::new(reasons.join(" or ")))
    }
}

/// The value must match a regular expression.
///
/// The pattern is searched, not anchored: use `^...$` to match the whole value.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    regex: Regex,
    message: Option<String>,
}

impl RegexValidator {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self {
            regex,
            message: None,
        }
    }

    /// Replaces the default `does not match the pattern ...` reason.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: AsRef<str> + ?Sized> Validate<T> for RegexValidator {
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        if self.regex.is_match(value.as_ref()) {
            return Ok(());
        }
        Err(ValidationError::new(match &self.message {
            Some(message) => message.clone(),
            None => format!("does not match the pattern {}", self.regex.as_str()),
        }))
    }
}

/// Password strength rules.
///
/// Every count is a minimum. `allowed`, when set, lists every character the
/// password may contain; `disallowed` lists characters it must not contain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PasswordValidator {
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub min_lower: usize,
    pub min_upper: usize,
    pub min_digits: usize,
    pub min_puncts: usize,
    pub allowed: Option<String>,
    pub disallowed: Option<String>,
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self {
            min_len: None,
            max_len: None,
            min_lower: 0,
            min_upper: 0,
            min_digits: 0,
            min_puncts: 0,
            allowed: None,
            disallowed: None,
        }
    }
}

impl<T: AsRef<str> + ?Sized> Validate<T> for PasswordValidator {
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        let password = value.as_ref();

        InLength {
            min: self.min_len,
            max: self.max_len,
        }
        .validate(password)?;

        let count = |pred: fn(&char) -> bool| password.chars().filter(pred).count();
        let required = [
            (self.min_lower, "lowercase letter", count(|c| c.is_lowercase())),
            (self.min_upper, "uppercase letter", count(|c| c.is_uppercase())),
            (self.min_digits, "digit", count(char::is_ascii_digit)),
            (self.min_puncts, "punctuation character", count(char::is_ascii_punctuation)),
        ];
        for (min, what, found) in required {
            if found < min {
                let plural = if min == 1 { "" } else { "s" };
                return Err(ValidationError::new(format!(
                    "must contain at least {min} {what}{plural}"
                )));
            }
        }

        if let Some(allowed) = &self.allowed {
            if let Some(c) = password.chars().find(|c| !allowed.contains(*c)) {
                return Err(ValidationError::new(format!(
                    "contains the character '{c}', which is not allowed"
                )));
            }
        }
        if let Some(disallowed) = &self.disallowed {
            if let Some(c) = password.chars().find(|c| disallowed.contains(*c)) {
                return Err(ValidationError::new(format!(
                    "contains the character '{c}', which is not allowed"
                )));
            }
        }
        Ok(())
    }
}

/// Validates a list: its length against `len_validators`, then every
/// element against `elem_validators`.
pub struct ListValidator<T> {
    len_validators: Vec<BoxedValidator<usize>>,
    elem_validators: Vec<BoxedValidator<T>>,
}

impl<T> Default for ListValidator<T> {
    fn default() -> Self {
        Self {
            len_validators: Vec::new(),
            elem_validators: Vec::new(),
        }
    }
}

impl<T> ListValidator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len_validator<V: Validate<usize> + 'static>(mut self, validator: V) -> Self {
        self.len_validators.push(Box::new(validator));
        self
    }

    pub fn elem_validator<V: Validate<T> + 'static>(mut self, validator: V) -> Self {
        self.elem_validators.push(Box::new(validator));
        self
    }
}

impl<T> Validate<Vec<T>> for ListValidator<T> {
    fn validate(&self, value: &Vec<T>) -> Result<(), ValidationError> {
        validate(&value.len(), &self.len_validators)
            .map_err(|e| ValidationError::new(format!("has a length that {}", e.0)))?;

        for (i, elem) in value.iter().enumerate() {
            validate(elem, &self.elem_validators).map_err(|e| {
                ValidationError::new(format!("has element {} that {}", i + 1, e.0))
            })?;
        }
        Ok(())
    }
}

/// Adapts a closure into a validator. The closure returns the failure reason.
///
/// ```rust
/// use cooked_input::{Custom, Validate};
///
/// let even = Custom(|n: &i64| if n % 2 == 0 { Ok(()) } else { Err("is not even".to_string()) });
/// assert!(even.validate(&4).is_ok());
/// assert!(even.validate(&5).is_err());
/// ```
pub struct Custom<F>(pub F);

impl<T: ?Sized, F> Validate<T> for Custom<F>
where
    F: Fn(&T) -> Result<(), String>,
{
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        (self.0)(value).map_err(ValidationError)
    }
}

/// Runs every validator against `value`, returning the first failure.
pub fn validate<T: ?Sized, V: Validate<T>>(
    value: &T,
    validators: &[V],
) -> Result<(), ValidationError> {
    validators.iter().try_for_each(|v| v.validate(value))
}

/// `true` when every validator accepts `value`.
pub fn in_all<T: ?Sized, V: Validate<T>>(value: &T, validators: &[V]) -> bool {
    validators.iter().all(|v| v.validate(value).is_ok())
}

/// `true` when at least one validator accepts `value`.
pub fn in_any<T: ?Sized, V: Validate<T>>(value: &T, validators: &[V]) -> bool {
    validators.iter().any(|v| v.validate(value).is_ok())
}

/// `true` when no validator accepts `value`.
pub fn not_in<T: ?Sized, V: Validate<T>>(value: &T, validators: &[V]) -> bool {
    !in_any(value, validators)
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
