//! # Prompt descriptors
//!
//! A [`PromptDescriptor`] describes a whole prompt as data, so prompts can
//! live in a configuration file instead of code:
//!
//! ```toml
//! prompt = "How many workers?"
//! default = "4"
//! cleaners = [{ kind = "strip" }]
//! convertor = { type = "int" }
//! rules = [{ rule = "range", min = 1, max = 16 }]
//! ```
//!
//! Values produced by a descriptor are dynamically typed ([`Value`]).
//!
//! Only available with the `serde` feature.
use std::{collections::BTreeMap, fmt::Display};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cleaners::Cleaner,
    convertors::{
        BooleanConvertor, ChoiceConvertor, Convert, DateConvertor, FloatConvertor, IntConvertor,
        ListConvertor, StrConvertor, YesNoConvertor,
    },
    error::{ConvertError, ValidationError},
    pipeline::Pipeline,
    prompt::{GetInput, InputStyle},
    validators::{
        BoxedValidator, ExactLength, HasLength, InChoices, InLength, InRange, NotIn,
        PasswordValidator, RegexValidator, Validate,
    },
};

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("invalid pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A value converted by a [`DynamicConvertor`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDateTime),
    List(Vec<Value>),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{}", items.join(", "))
            }
        }
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        match self {
            Self::Str(s) => s == other,
            _ => self.to_string() == *other,
        }
    }
}

impl HasLength for Value {
    fn length(&self) -> usize {
        match self {
            Self::Str(s) => s.length(),
            Self::List(items) => items.len(),
            _ => self.to_string().length(),
        }
    }
}

/// Which convertor a descriptor uses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvertorKind {
    #[default]
    Str,
    Int {
        #[serde(default = "decimal")]
        base: u32,
    },
    Float,
    Bool,
    YesNo,
    Date,
    /// `delimiter = None` guesses the delimiter from the input.
    List {
        #[serde(default)]
        delimiter: Option<char>,
        #[serde(default)]
        element: Box<ConvertorKind>,
    },
    Choice {
        choices: BTreeMap<String, String>,
    },
}

fn decimal() -> u32 {
    10
}

/// A convertor picked at runtime from a [`ConvertorKind`].
#[derive(Debug, Clone)]
pub struct DynamicConvertor {
    kind: ConvertorKind,
}

impl DynamicConvertor {
    pub fn new(kind: ConvertorKind) -> Self {
        Self { kind }
    }
}

impl Convert for DynamicConvertor {
    type Output = Value;

    fn convert(&self, value: &str) -> Result<Value, ConvertError> {
        match &self.kind {
            ConvertorKind::Str => StrConvertor::default().convert(value).map(Value::Str),
            ConvertorKind::Int { base } => IntConvertor::default()
                .with_base(*base)
                .convert(value)
                .map(Value::Int),
            ConvertorKind::Float => FloatConvertor::default().convert(value).map(Value::Float),
            ConvertorKind::Bool => BooleanConvertor::default().convert(value).map(Value::Bool),
            ConvertorKind::YesNo => YesNoConvertor::default()
                .convert(value)
                .map(|answer| Value::Str(answer.to_string())),
            ConvertorKind::Date => DateConvertor::default().convert(value).map(Value::Date),
            ConvertorKind::List { delimiter, element } => {
                let list = ListConvertor::new(DynamicConvertor::new((**element).clone()));
                let list = match delimiter {
                    Some(d) => list.with_delimiter(*d),
                    None => list.sniff_delimiter(),
                };
                list.convert(value).map(Value::List)
            }
            ConvertorKind::Choice { choices } => ChoiceConvertor::new(choices.clone())
                .convert(value)
                .map(Value::Str),
        }
    }
}

/// A validation rule, as written in a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    ExactLength {
        length: usize,
    },
    Length {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
    },
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    Choices {
        choices: Vec<String>,
    },
    NotIn {
        values: Vec<String>,
    },
    Regex {
        pattern: String,
        #[serde(default)]
        message: Option<String>,
    },
    Password(PasswordValidator),
}

impl Rule {
    pub fn validator(&self) -> Result<BoxedValidator<Value>, DescriptorError> {
        Ok(match self {
            Rule::ExactLength { length } => Box::new(ExactLength(*length)),
            Rule::Length { min, max } => Box::new(InLength {
                min: *min,
                max: *max,
            }),
            Rule::Range { min, max } => Box::new(NumericRange(InRange {
                min: *min,
                max: *max,
            })),
            Rule::Choices { choices } => Box::new(InChoices(choices.clone())),
            Rule::NotIn { values } => {
                Box::new(NotIn::<Value>::new([InChoices(values.clone())]))
            }
            Rule::Regex { pattern, message } => {
                let regex = RegexValidator::new(pattern).map_err(|source| {
                    DescriptorError::Pattern {
                        pattern: pattern.clone(),
                        source,
                    }
                })?;
                let regex = match message {
                    Some(message) => regex.with_message(message.as_str()),
                    None => regex,
                };
                Box::new(OnText(regex))
            }
            Rule::Password(rules) => Box::new(OnText(rules.clone())),
        })
    }
}

/// Range check for numeric values; anything else is rejected.
struct NumericRange(InRange<f64>);

impl Validate<Value> for NumericRange {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_f64() {
            Some(n) => self.0.validate(&n),
            None => Err(ValidationError::new("is not a number")),
        }
    }
}

/// Runs a text validator against the value's display form.
struct OnText<V>(V);

impl<V: Validate<str>> Validate<Value> for OnText<V> {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.0.validate(value.to_string().as_str())
    }
}

/// A prompt described as data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptDescriptor {
    pub prompt: String,
    pub default: Option<String>,
    pub cleaners: Vec<Cleaner>,
    pub convertor: ConvertorKind,
    pub rules: Vec<Rule>,
    pub max_retries: Option<usize>,
    /// Blank answers yield no value instead of being rejected.
    pub optional: bool,
}

impl PromptDescriptor {
    pub fn pipeline(&self) -> Result<Pipeline<DynamicConvertor>, DescriptorError> {
        let validators = self
            .rules
            .iter()
            .map(Rule::validator)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Pipeline::new(DynamicConvertor::new(self.convertor.clone()))
            .cleaners(self.cleaners.iter().cloned())
            .boxed_validators(validators))
    }

    pub fn input(&self, style: &InputStyle) -> Result<GetInput<DynamicConvertor>, DescriptorError> {
        let mut input = GetInput::from_pipeline(self.pipeline()?)
            .prompt(self.prompt.as_str())
            .style(style.clone());
        if let Some(default) = &self.default {
            input = input.default(default.as_str());
        }
        if let Some(max) = self.max_retries {
            input = input.max_retries(max);
        }
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::process_value;
    use crate::terminal::Terminal;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn parse(src: &str) -> PromptDescriptor {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn test_int_descriptor() {
        let desc = parse(
            r#"
prompt = "How many workers?"
default = "4"
cleaners = [{ kind = "strip" }]
convertor = { type = "int" }
rules = [{ rule = "range", min = 1, max = 16 }]
"#,
        );
        let pipeline = desc.pipeline().unwrap();
        assert_eq!(process_value(" 8 ", &pipeline).unwrap(), Value::Int(8));
        assert_eq!(
            process_value("32", &pipeline).unwrap_err().to_string(),
            "\"32\" is too high (max value is 16)"
        );
    }

    #[test]
    fn test_defaults_to_string_prompt() {
        let desc = parse(r#"prompt = "Name""#);
        assert_eq!(desc.convertor, ConvertorKind::Str);
        assert!(desc.cleaners.is_empty());
        assert!(!desc.optional);
        let pipeline = desc.pipeline().unwrap();
        assert_eq!(
            process_value("Ada", &pipeline).unwrap(),
            Value::Str("Ada".to_string())
        );
    }

    #[test]
    fn test_cleaners_deserialize() {
        let desc = parse(
            r#"
cleaners = [
    { kind = "strip", trailing = false },
    { kind = "replace", from = "-", to = " " },
    { kind = "capitalize", all_words = true },
]
"#,
        );
        let pipeline = desc.pipeline().unwrap();
        assert_eq!(
            process_value("  mary-jane WATSON", &pipeline).unwrap(),
            Value::Str("Mary Jane Watson".to_string())
        );
    }

    #[test]
    fn test_list_descriptor() {
        let desc = parse(
            r#"
convertor = { type = "list", delimiter = ":", element = { type = "float" } }
rules = [{ rule = "length", min = 2 }]
"#,
        );
        let pipeline = desc.pipeline().unwrap();
        assert_eq!(
            process_value("1.5:2", &pipeline).unwrap(),
            Value::List(vec![Value::Float(1.5), Value::Float(2.0)])
        );
        assert_eq!(
            process_value("1.5", &pipeline).unwrap_err().to_string(),
            "\"1.5\" is too short (min length is 2)"
        );
    }

    #[test]
    fn test_choices_and_not_in_rules() {
        let desc = parse(
            r#"
cleaners = [{ kind = "strip" }, { kind = "lower" }]
rules = [
    { rule = "choices", choices = ["cherry", "lime", "licorice"] },
    { rule = "not_in", values = ["licorice"] },
]
"#,
        );
        let pipeline = desc.pipeline().unwrap();
        assert!(process_value("Lime", &pipeline).is_ok());
        assert_eq!(
            process_value("licorice", &pipeline).unwrap_err().to_string(),
            "\"licorice\" is not allowed"
        );
        assert!(process_value("grape", &pipeline).is_err());
    }

    #[test]
    fn test_regex_and_password_rules() {
        let desc = parse(
            r#"
rules = [
    { rule = "regex", pattern = "^[a-z0-9]+$", message = "may only use lowercase letters and digits" },
    { rule = "password", min_len = 6, min_digits = 1 },
]
"#,
        );
        let pipeline = desc.pipeline().unwrap();
        assert!(process_value("abc123", &pipeline).is_ok());
        assert_eq!(
            process_value("ABC123", &pipeline).unwrap_err().to_string(),
            "\"ABC123\" may only use lowercase letters and digits"
        );
        assert_eq!(
            process_value("abcdef", &pipeline).unwrap_err().to_string(),
            "\"abcdef\" must contain at least 1 digit"
        );
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let desc = parse(r#"rules = [{ rule = "regex", pattern = "(" }]"#);
        let err = desc.pipeline().err().unwrap();
        assert_eq!(err.to_string(), "invalid pattern \"(\"");
    }

    #[test]
    fn test_range_rejects_non_numbers() {
        let desc = parse(r#"rules = [{ rule = "range", min = 0 }]"#);
        let pipeline = desc.pipeline().unwrap();
        assert_eq!(
            process_value("zero", &pipeline).unwrap_err().to_string(),
            "\"zero\" is not a number"
        );
    }

    #[test]
    fn test_range_rejects_nan() {
        let desc = parse(
            r#"
convertor = { type = "float" }
rules = [{ rule = "range", min = 0, max = 1 }]
"#,
        );
        let pipeline = desc.pipeline().unwrap();
        assert_eq!(
            process_value("NaN", &pipeline).unwrap_err().to_string(),
            "\"NaN\" is not comparable with the range"
        );
        assert_eq!(process_value("0.25", &pipeline).unwrap(), Value::Float(0.25));
    }

    #[test]
    fn test_other_convertors() {
        let convert = |kind| DynamicConvertor::new(kind);
        assert_eq!(
            convert(ConvertorKind::YesNo).convert("da").unwrap(),
            Value::Str("yes".to_string())
        );
        assert_eq!(
            convert(ConvertorKind::Bool).convert("0").unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            convert(ConvertorKind::Int { base: 16 }).convert("ff").unwrap(),
            Value::Int(255)
        );
        let date = NaiveDate::from_ymd_opt(2015, 10, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            convert(ConvertorKind::Date).convert("October 1, 2015").unwrap(),
            Value::Date(date)
        );
        let choice = ConvertorKind::Choice {
            choices: BTreeMap::from([("1".to_string(), "red".to_string())]),
        };
        assert_eq!(
            convert(choice).convert("1").unwrap(),
            Value::Str("red".to_string())
        );
    }

    #[test]
    fn test_value_serializes_untagged() {
        let value = Value::List(vec![
            Value::Int(1),
            Value::Str("two".to_string()),
            Value::Bool(true),
        ]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1,"two",true]"#);
        assert_eq!(value.to_string(), "1, two, true");
    }

    #[test]
    fn test_optional_descriptor_prompt() {
        let desc = parse(
            r#"
prompt = "Nickname"
optional = true
"#,
        );
        let input = desc.input(&InputStyle::default()).unwrap();
        let mut term = Terminal::new(Cursor::new("\n"), Vec::new());
        assert_eq!(input.get_optional_from(&mut term).unwrap(), None);
    }
}
