//! # Convertors
//!
//! A convertor turns the cleaned text into a typed value. Each one carries a
//! `value_error_str` describing what it expected; it ends up in the message
//! shown to the user when conversion fails:
//!
//! ```text
//! "abc" cannot be converted to an integer number
//! ```
//!
//! ## Example
//! ```rust
//! use cooked_input::{Convert, IntConvertor, ListConvertor};
//!
//! let ints = ListConvertor::new(IntConvertor::default()).with_delimiter(':');
//! assert_eq!(ints.convert("1: 2:3").unwrap(), vec![1, 2, 3]);
//! ```
use std::{collections::HashMap, fmt::Display};

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::trace;

use crate::error::ConvertError;

/// Turns cleaned text into a value of type `Output`.
pub trait Convert {
    type Output;

    fn convert(&self, value: &str) -> Result<Self::Output, ConvertError>;
}

impl<C: Convert + ?Sized> Convert for Box<C> {
    type Output = C::Output;

    fn convert(&self, value: &str) -> Result<Self::Output, ConvertError> {
        (**self).convert(value)
    }
}

impl<C: Convert + ?Sized> Convert for &C {
    type Output = C::Output;

    fn convert(&self, value: &str) -> Result<Self::Output, ConvertError> {
        (**self).convert(value)
    }
}

/// Implements the `value_error_str` builder shared by every convertor.
macro_rules! value_error_str {
    ($t:ty) => {
        impl $t {
            /// Replaces the description used in conversion error messages.
            pub fn with_error_str(mut self, value_error_str: impl Into<String>) -> Self {
                self.value_error_str = value_error_str.into();
                self
            }

            pub fn value_error_str(&self) -> &str {
                &self.value_error_str
            }
        }
    };
}

/// Identity convertor: the cleaned text is the value.
#[derive(Debug, Clone)]
pub struct StrConvertor {
    value_error_str: String,
}

impl Default for StrConvertor {
    fn default() -> Self {
        Self {
            value_error_str: "a string".to_string(),
        }
    }
}

value_error_str!(StrConvertor);

impl Convert for StrConvertor {
    type Output = String;

    fn convert(&self, value: &str) -> Result<String, ConvertError> {
        Ok(value.to_string())
    }
}

/// Converts to an `i64` in the given radix.
///
/// Legal bases are `2..=36`, or `0` to pick the radix from a `0x`, `0o` or
/// `0b` prefix (decimal otherwise). An optional sign and `_` digit
/// separators are accepted.
#[derive(Debug, Clone)]
pub struct IntConvertor {
    base: u32,
    value_error_str: String,
}

impl Default for IntConvertor {
    fn default() -> Self {
        Self {
            base: 10,
            value_error_str: "an integer number".to_string(),
        }
    }
}

value_error_str!(IntConvertor);

impl IntConvertor {
    pub fn with_base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    pub fn base(&self) -> u32 {
        self.base
    }
}

impl Convert for IntConvertor {
    type Output = i64;

    fn convert(&self, value: &str) -> Result<i64, ConvertError> {
        parse_int(value, self.base).ok_or_else(|| ConvertError::new(self.value_error_str()))
    }
}

fn parse_int(value: &str, base: u32) -> Option<i64> {
    if base == 1 || base > 36 {
        return None;
    }

    let value = value.trim();
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let (radix, digits) = split_radix_prefix(unsigned, base);
    // one separator may follow a radix prefix: "0x_ff"
    let digits = if digits.len() < unsigned.len() {
        digits.strip_prefix('_').unwrap_or(digits)
    } else {
        digits
    };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || digits.starts_with(['+', '-'])
    {
        return None;
    }
    // Base 0 follows literal syntax: "010" is ambiguous and rejected.
    if base == 0
        && radix == 10
        && digits.starts_with('0')
        && digits.chars().any(|c| c != '0' && c != '_')
    {
        return None;
    }

    let digits = digits.replace('_', "");
    let magnitude = i128::from_str_radix(&digits, radix).ok()?;
    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed).ok()
}

fn split_radix_prefix(digits: &str, base: u32) -> (u32, &str) {
    let lower = digits.get(..2).map(str::to_ascii_lowercase);
    let prefixed = match lower.as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };

    match (base, prefixed) {
        (0, Some(radix)) => (radix, &digits[2..]),
        (0, None) => (10, digits),
        (b, Some(radix)) if b == radix => (radix, &digits[2..]),
        (b, _) => (b, digits),
    }
}

/// Converts to an `f64`.
#[derive(Debug, Clone)]
pub struct FloatConvertor {
    value_error_str: String,
}

impl Default for FloatConvertor {
    fn default() -> Self {
        Self {
            value_error_str: "a float number".to_string(),
        }
    }
}

value_error_str!(FloatConvertor);

impl Convert for FloatConvertor {
    type Output = f64;

    fn convert(&self, value: &str) -> Result<f64, ConvertError> {
        value.trim().parse::<f64>().map_err(|_| ConvertError::new(self.value_error_str()))
    }
}

/// Converts to a `bool`.
///
/// `t`, `true`, `y`, `yes` and `1` are `true`; `f`, `false`, `n`, `no` and
/// `0` are `false`. Matching ignores case.
#[derive(Debug, Clone)]
pub struct BooleanConvertor {
    value_error_str: String,
}

impl Default for BooleanConvertor {
    fn default() -> Self {
        Self {
            value_error_str: "true or false".to_string(),
        }
    }
}

value_error_str!(BooleanConvertor);

const TRUE_WORDS: &[&str] = &["t", "true", "y", "yes", "1"];
const FALSE_WORDS: &[&str] = &["f", "false", "n", "no", "0"];

impl Convert for BooleanConvertor {
    type Output = bool;

    fn convert(&self, value: &str) -> Result<bool, ConvertError> {
        let lower = value.trim().to_lowercase();
        if TRUE_WORDS.contains(&lower.as_str()) {
            Ok(true)
        } else if FALSE_WORDS.contains(&lower.as_str()) {
            Ok(false)
        } else {
            Err(ConvertError::new(self.value_error_str()))
        }
    }
}

/// Answer of a [`YesNoConvertor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<YesNo> for bool {
    fn from(answer: YesNo) -> Self {
        answer.is_yes()
    }
}

const YES_WORDS: &[&str] = &[
    "y", "yes", "yeah", "yup", "aye", "qui", "si", "ja", "ken", "hai", "gee", "da", "tak",
    "affirmative",
];
const NO_WORDS: &[&str] = &[
    "n", "no", "nope", "na", "nae", "non", "negatory", "nein", "nie", "nyet", "lo",
];

/// Converts the many ways of saying yes or no into a [`YesNo`].
#[derive(Debug, Clone)]
pub struct YesNoConvertor {
    value_error_str: String,
}

impl Default for YesNoConvertor {
    fn default() -> Self {
        Self {
            value_error_str: "yes or no".to_string(),
        }
    }
}

value_error_str!(YesNoConvertor);

impl Convert for YesNoConvertor {
    type Output = YesNo;

    fn convert(&self, value: &str) -> Result<YesNo, ConvertError> {
        let lower = value.trim().to_lowercase();
        if YES_WORDS.contains(&lower.as_str()) {
            Ok(YesNo::Yes)
        } else if NO_WORDS.contains(&lower.as_str()) {
            Ok(YesNo::No)
        } else {
            Err(ConvertError::new(self.value_error_str()))
        }
    }
}

/// Delimiters tried, in order, when a [`ListConvertor`] has to guess.
const SNIFFED_DELIMITERS: &[char] = &[',', ';', ':', '\t', '|'];

/// Converts a delimited line into a `Vec`, converting each element with `elem`.
///
/// Fields may be wrapped in double quotes to contain the delimiter (`""`
/// inside quotes is a literal quote) and spaces right after a delimiter are
/// skipped. Without a delimiter the first of `, ; : \t |` found in the input
/// is used, falling back to a space.
#[derive(Debug, Clone)]
pub struct ListConvertor<C> {
    delimiter: Option<char>,
    elem: C,
    value_error_str: String,
}

impl<C: Convert> ListConvertor<C> {
    pub fn new(elem: C) -> Self {
        Self {
            delimiter: Some(','),
            elem,
            value_error_str: "list of values".to_string(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Guess the delimiter from the input instead of using a fixed one.
    pub fn sniff_delimiter(mut self) -> Self {
        self.delimiter = None;
        self
    }

    pub fn with_error_str(mut self, value_error_str: impl Into<String>) -> Self {
        self.value_error_str = value_error_str.into();
        self
    }

    pub fn value_error_str(&self) -> &str {
        &self.value_error_str
    }
}

impl<C: Convert> Convert for ListConvertor<C> {
    type Output = Vec<C::Output>;

    fn convert(&self, value: &str) -> Result<Self::Output, ConvertError> {
        if value.trim().is_empty() {
            return Ok(Vec::new());
        }

        let delimiter = self.delimiter.unwrap_or_else(|| sniff_delimiter(value));
        let fields = split_fields(value, delimiter);
        trace!(?delimiter, count = fields.len(), "list split");

        fields
            .iter()
            .map(|field| {
                self.elem
                    .convert(field)
                    .map_err(|e| e.with_value(field.as_str()))
            })
            .collect()
    }
}

fn sniff_delimiter(value: &str) -> char {
    SNIFFED_DELIMITERS
        .iter()
        .copied()
        .find(|d| value.contains(*d))
        .unwrap_or(' ')
}

fn split_fields(value: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        if c == delimiter {
            fields.push(std::mem::take(&mut field));
            at_field_start = true;
            continue;
        }
        if at_field_start && c == ' ' {
            continue;
        }
        if at_field_start && c == '"' {
            in_quotes = true;
        } else {
            field.push(c);
        }
        at_field_start = false;
    }
    fields.push(field);
    fields
}

/// Converts free-form date text into a `NaiveDateTime`.
///
/// Accepted forms:
/// - `now`, `today`, `tomorrow`, `yesterday`
/// - `3 days ago`, `2 weeks ago`, `in 3 days`, `in 1 week`
/// - `2017-10-01`, `2017-10-01 13:45`, `2017-10-01T13:45:00`
/// - `10/01/2017`, `10/1/17` (month first)
/// - `October 1, 2015`, `Oct 1 2015`, `1 October 2015`
///
/// Relative forms are resolved against the local clock unless a reference
/// time was given with [`DateConvertor::relative_to`].
#[derive(Debug, Clone)]
pub struct DateConvertor {
    reference: Option<NaiveDateTime>,
    value_error_str: String,
}

impl Default for DateConvertor {
    fn default() -> Self {
        Self {
            reference: None,
            value_error_str: "a date".to_string(),
        }
    }
}

value_error_str!(DateConvertor);

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

impl DateConvertor {
    pub fn relative_to(mut self, reference: NaiveDateTime) -> Self {
        self.reference = Some(reference);
        self
    }

    fn now(&self) -> NaiveDateTime {
        self.reference.unwrap_or_else(|| Local::now().naive_local())
    }

    fn parse_relative(&self, value: &str) -> Option<NaiveDateTime> {
        let now = self.now();
        match value {
            "now" | "today" => return Some(now),
            "tomorrow" => return now.checked_add_signed(Duration::days(1)),
            "yesterday" => return now.checked_sub_signed(Duration::days(1)),
            _ => {}
        }

        let words: Vec<&str> = value.split_whitespace().collect();
        let (count, unit, forward) = match words.as_slice() {
            ["in", count, unit] => (count, unit, true),
            [count, unit, "ago"] => (count, unit, false),
            _ => return None,
        };
        let count: i64 = count.parse().ok()?;
        let span = match unit.trim_end_matches('s') {
            "day" => Duration::try_days(count)?,
            "week" => Duration::try_weeks(count)?,
            "hour" => Duration::try_hours(count)?,
            _ => return None,
        };

        if forward {
            now.checked_add_signed(span)
        } else {
            now.checked_sub_signed(span)
        }
    }
}

impl Convert for DateConvertor {
    type Output = NaiveDateTime;

    fn convert(&self, value: &str) -> Result<NaiveDateTime, ConvertError> {
        let value = value.trim();
        let lower = value.to_lowercase();

        if let Some(date) = self.parse_relative(&lower) {
            return Ok(date);
        }
        if let Some(date) = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        {
            return Ok(date);
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .map(|date| date.and_time(NaiveTime::MIN))
            .ok_or_else(|| ConvertError::new(self.value_error_str()))
    }
}

/// Maps the input to a value through a lookup table, e.g. `"1" -> "red"`.
#[derive(Debug, Clone)]
pub struct ChoiceConvertor<V> {
    choices: HashMap<String, V>,
    value_error_str: String,
}

impl<V: Clone> ChoiceConvertor<V> {
    pub fn new<K: Into<String>>(choices: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            choices: choices.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            value_error_str: "a valid row number".to_string(),
        }
    }

    pub fn with_error_str(mut self, value_error_str: impl Into<String>) -> Self {
        self.value_error_str = value_error_str.into();
        self
    }
}

impl<V: Clone> Convert for ChoiceConvertor<V> {
    type Output = V;

    fn convert(&self, value: &str) -> Result<V, ConvertError> {
        self.choices
            .get(value)
            .cloned()
            .ok_or_else(|| ConvertError::new(self.value_error_str.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn test_str_convertor_is_identity() {
        assert_eq!(StrConvertor::default().convert(" x ").unwrap(), " x ");
    }

    #[test]
    fn test_int_decimal() {
        let c = IntConvertor::default();
        assert_eq!(c.convert("42").unwrap(), 42);
        assert_eq!(c.convert("-17").unwrap(), -17);
        assert_eq!(c.convert("+8").unwrap(), 8);
        assert_eq!(c.convert("1_000").unwrap(), 1000);
        assert!(c.convert("4.2").is_err());
        assert!(c.convert("").is_err());
        assert!(c.convert("--1").is_err());
        assert!(c.convert("1__0").is_err());
    }

    #[test]
    fn test_int_error_uses_value_error_str() {
        let err = IntConvertor::default().convert("abc").unwrap_err();
        assert_eq!(err.expected, "an integer number");

        let err = IntConvertor::default()
            .with_error_str("a whole number")
            .convert("abc")
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot be converted to a whole number");
    }

    #[test]
    fn test_int_other_bases() {
        assert_eq!(IntConvertor::default().with_base(16).convert("ff").unwrap(), 255);
        assert_eq!(IntConvertor::default().with_base(16).convert("0xFF").unwrap(), 255);
        assert_eq!(IntConvertor::default().with_base(2).convert("101").unwrap(), 5);
        assert!(IntConvertor::default().with_base(2).convert("102").is_err());
        assert!(IntConvertor::default().with_base(37).convert("1").is_err());
        assert!(IntConvertor::default().with_base(1).convert("1").is_err());
    }

    #[test]
    fn test_int_base_zero_reads_prefix() {
        let c = IntConvertor::default().with_base(0);
        assert_eq!(c.convert("0x1f").unwrap(), 31);
        assert_eq!(c.convert("0o17").unwrap(), 15);
        assert_eq!(c.convert("0b11").unwrap(), 3);
        assert_eq!(c.convert("-0x10").unwrap(), -16);
        assert_eq!(c.convert("19").unwrap(), 19);
        assert_eq!(c.convert("0").unwrap(), 0);
        assert_eq!(c.convert("00").unwrap(), 0);
        assert!(c.convert("010").is_err());
    }

    #[test]
    fn test_int_separator_after_prefix() {
        let c = IntConvertor::default().with_base(0);
        assert_eq!(c.convert("0x_ff").unwrap(), 255);
        assert_eq!(c.convert("0b_1_0").unwrap(), 2);
        assert_eq!(IntConvertor::default().with_base(16).convert("0X_FF").unwrap(), 255);
        assert!(c.convert("0x__ff").is_err());
        assert!(c.convert("0x_").is_err());
        assert!(IntConvertor::default().with_base(16).convert("_ff").is_err());
    }

    #[test]
    fn test_int_limits() {
        let c = IntConvertor::default();
        assert_eq!(c.convert("-9223372036854775808").unwrap(), i64::MIN);
        assert!(c.convert("9223372036854775808").is_err());
    }

    #[test]
    fn test_float() {
        let c = FloatConvertor::default();
        assert_eq!(c.convert("3.5").unwrap(), 3.5);
        assert_eq!(c.convert("-1e3").unwrap(), -1000.0);
        assert_eq!(c.convert("7").unwrap(), 7.0);
        assert_eq!(c.convert("pi").unwrap_err().expected, "a float number");
    }

    #[test]
    fn test_boolean_words() {
        let c = BooleanConvertor::default();
        for word in ["t", "TRUE", "y", "Yes", "1"] {
            assert!(c.convert(word).unwrap(), "{word}");
        }
        for word in ["f", "False", "n", "NO", "0"] {
            assert!(!c.convert(word).unwrap(), "{word}");
        }
        assert!(c.convert("maybe").is_err());
    }

    #[test]
    fn test_yes_no_words() {
        let c = YesNoConvertor::default();
        assert_eq!(c.convert("yup").unwrap(), YesNo::Yes);
        assert_eq!(c.convert("Affirmative").unwrap(), YesNo::Yes);
        assert_eq!(c.convert("nyet").unwrap(), YesNo::No);
        assert_eq!(c.convert("negatory").unwrap().to_string(), "no");
        assert_eq!(c.convert("perhaps").unwrap_err().expected, "yes or no");
        assert!(bool::from(YesNo::Yes));
    }

    #[test]
    fn test_list_of_ints_with_delimiter() {
        let c = ListConvertor::new(IntConvertor::default()).with_delimiter(':');
        assert_eq!(c.convert("1:2: 3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_list_of_strings_with_quotes() {
        let c = ListConvertor::new(StrConvertor::default());
        assert_eq!(
            c.convert(r#"red, "green, light", "say ""hi""""#).unwrap(),
            vec!["red", "green, light", r#"say "hi""#]
        );
    }

    #[test]
    fn test_list_element_failure_reports_element_expectation() {
        let c = ListConvertor::new(IntConvertor::default());
        let err = c.convert("1, two, 3").unwrap_err();
        assert_eq!(err.expected, "an integer number");
        assert_eq!(err.value.as_deref(), Some("two"));
    }

    #[test]
    fn test_nested_list_failure_blames_innermost_element() {
        let c = ListConvertor::new(ListConvertor::new(IntConvertor::default()).with_delimiter(':'))
            .with_delimiter(',');
        let err = c.convert("1:2, 3:x").unwrap_err();
        assert_eq!(err.value.as_deref(), Some("x"));
    }

    #[test]
    fn test_list_sniffs_delimiter() {
        let c = ListConvertor::new(IntConvertor::default()).sniff_delimiter();
        assert_eq!(c.convert("1;2;3").unwrap(), vec![1, 2, 3]);
        assert_eq!(c.convert("4|5").unwrap(), vec![4, 5]);
        assert_eq!(c.convert("6 7 8").unwrap(), vec![6, 7, 8]);
    }

    #[test]
    fn test_list_empty_input() {
        let c = ListConvertor::new(IntConvertor::default());
        assert!(c.convert("  ").unwrap().is_empty());
    }

    #[test]
    fn test_date_absolute_forms() {
        let c = DateConvertor::default();
        assert_eq!(c.convert("2017-10-01").unwrap(), midnight(2017, 10, 1));
        assert_eq!(c.convert("10/01/2017").unwrap(), midnight(2017, 10, 1));
        assert_eq!(c.convert("12/12/12").unwrap(), midnight(2012, 12, 12));
        assert_eq!(c.convert("October 1, 2015").unwrap(), midnight(2015, 10, 1));
        assert_eq!(c.convert("1 October 2015").unwrap(), midnight(2015, 10, 1));
        assert_eq!(
            c.convert("2017-10-01 13:45").unwrap(),
            midnight(2017, 10, 1) + Duration::minutes(13 * 60 + 45)
        );
    }

    #[test]
    fn test_date_relative_forms() {
        let c = DateConvertor::default().relative_to(noon(2020, 2, 28));
        assert_eq!(c.convert("today").unwrap(), noon(2020, 2, 28));
        assert_eq!(c.convert("Tomorrow").unwrap(), noon(2020, 2, 29));
        assert_eq!(c.convert("yesterday").unwrap(), noon(2020, 2, 27));
        assert_eq!(c.convert("in 2 days").unwrap(), noon(2020, 3, 1));
        assert_eq!(c.convert("1 week ago").unwrap(), noon(2020, 2, 21));
    }

    #[test]
    fn test_date_rejects_garbage() {
        let c = DateConvertor::default();
        assert_eq!(c.convert("next blursday").unwrap_err().expected, "a date");
        assert!(c.convert("2017-13-01").is_err());
    }

    #[test]
    fn test_choice_convertor() {
        let c = ChoiceConvertor::new([("1", "red"), ("2", "green"), ("3", "blue")]);
        assert_eq!(c.convert("2").unwrap(), "green");
        assert_eq!(c.convert("4").unwrap_err().expected, "a valid row number");
    }

    #[test]
    fn test_boxed_convertor_forwards() {
        let c: Box<dyn Convert<Output = i64>> = Box::new(IntConvertor::default());
        assert_eq!(c.convert("5").unwrap(), 5);
    }
}
