//! # Pipeline
//!
//! A [`Pipeline`] bundles the three stateless stages of input processing:
//!
//! ```text
//! raw text -> cleaners -> convertor -> validators -> value
//! ```
//!
//! It has no notion of a terminal, so the same pipeline can check values
//! coming from a web form or a GUI field through [`process_value`].
//!
//! ## Example
//! ```rust
//! use cooked_input::{Cleaner, InRange, IntConvertor, Pipeline, process_value};
//!
//! let age = Pipeline::new(IntConvertor::default())
//!     .cleaner(Cleaner::strip())
//!     .validator(InRange::new(0, 130));
//!
//! assert_eq!(process_value(" 42 ", &age).unwrap(), 42);
//! assert_eq!(
//!     process_value("200", &age).unwrap_err().to_string(),
//!     "\"200\" is too high (max value is 130)"
//! );
//! ```
use tracing::trace;

use crate::{
    cleaners::{Cleaner, clean_all},
    convertors::Convert,
    error::InputError,
    validators::{BoxedValidator, Validate, validate},
};

/// Cleaners, a convertor and validators, applied in that order.
pub struct Pipeline<C: Convert> {
    cleaners: Vec<Cleaner>,
    convertor: C,
    validators: Vec<BoxedValidator<C::Output>>,
}

impl<C: Convert> Pipeline<C> {
    pub fn new(convertor: C) -> Self {
        Self {
            cleaners: Vec::new(),
            convertor,
            validators: Vec::new(),
        }
    }

    pub fn cleaner(mut self, cleaner: Cleaner) -> Self {
        self.cleaners.push(cleaner);
        self
    }

    pub fn cleaners(mut self, cleaners: impl IntoIterator<Item = Cleaner>) -> Self {
        self.cleaners.extend(cleaners);
        self
    }

    pub fn validator<V>(mut self, validator: V) -> Self
    where
        V: Validate<C::Output> + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn boxed_validators(
        mut self,
        validators: impl IntoIterator<Item = BoxedValidator<C::Output>>,
    ) -> Self {
        self.validators.extend(validators);
        self
    }

    pub fn convertor(&self) -> &C {
        &self.convertor
    }

    /// Runs only the cleaners.
    pub fn clean(&self, raw: &str) -> String {
        clean_all(raw, &self.cleaners)
    }

    /// Converts and validates text that has already been cleaned.
    ///
    /// Errors carry `cleaned` as the offending value, unless the convertor
    /// blamed a part of it.
    pub fn convert_and_validate(&self, cleaned: &str) -> Result<C::Output, InputError> {
        let value = self
            .convertor
            .convert(cleaned)
            .map_err(|source| InputError::Convert {
                value: source.value.clone().unwrap_or_else(|| cleaned.to_string()),
                source,
            })?;
        trace!(len = cleaned.len(), "input converted");

        validate(&value, &self.validators).map_err(|source| InputError::Invalid {
            value: cleaned.to_string(),
            source,
        })?;
        Ok(value)
    }

    /// Cleans, converts and validates `raw`.
    pub fn process(&self, raw: &str) -> Result<C::Output, InputError> {
        self.convert_and_validate(&self.clean(raw))
    }
}

/// Runs `raw` through `pipeline` without any prompting.
///
/// Blank input is not special here: it goes through the convertor like any
/// other text.
pub fn process_value<C: Convert>(
    raw: &str,
    pipeline: &Pipeline<C>,
) -> Result<C::Output, InputError> {
    pipeline.process(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        convertors::{IntConvertor, ListConvertor, StrConvertor, YesNo, YesNoConvertor},
        validators::{ExactLength, InChoices, InRange, ListValidator, NotIn},
    };

    #[test]
    fn test_process_runs_all_stages() {
        let pipeline = Pipeline::new(StrConvertor::default())
            .cleaners([Cleaner::strip(), Cleaner::Lower])
            .validator(InChoices::<String>::new(["red", "green", "blue"]));

        assert_eq!(pipeline.process("  RED ").unwrap(), "red");
        let err = pipeline.process("pink").unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"pink\" is not a valid choice (choices are: red, green, blue)"
        );
    }

    #[test]
    fn test_conversion_error_reports_cleaned_value() {
        let pipeline = Pipeline::new(IntConvertor::default()).cleaner(Cleaner::strip());
        let err = process_value("  abc ", &pipeline).unwrap_err();
        assert!(matches!(err, InputError::Convert { ref value, .. } if value == "abc"));
        assert_eq!(err.to_string(), "\"abc\" cannot be converted to an integer number");
    }

    #[test]
    fn test_list_conversion_error_names_failing_element() {
        let pipeline = Pipeline::new(ListConvertor::new(IntConvertor::default()).with_delimiter(','));
        let err = process_value("1, two, 3", &pipeline).unwrap_err();
        assert_eq!(err.value(), Some("two"));
        assert_eq!(err.to_string(), "\"two\" cannot be converted to an integer number");
    }

    #[test]
    fn test_nan_is_out_of_range() {
        let pipeline = Pipeline::new(crate::convertors::FloatConvertor::default())
            .validator(InRange::new(0.0, 1.0));
        let err = process_value("NaN", &pipeline).unwrap_err();
        assert!(matches!(err, InputError::Invalid { .. }));
        assert_eq!(process_value("0.5", &pipeline).unwrap(), 0.5);
    }

    #[test]
    fn test_validators_short_circuit_in_order() {
        let pipeline = Pipeline::new(StrConvertor::default())
            .validator(ExactLength(3))
            .validator(NotIn::<String>::new([InChoices::<String>::new(["bad"])]));

        assert!(pipeline.process("abc").is_ok());
        assert_eq!(
            pipeline.process("abcd").unwrap_err().to_string(),
            "\"abcd\" is not length 3"
        );
        assert_eq!(
            pipeline.process("bad").unwrap_err().to_string(),
            "\"bad\" is not allowed"
        );
    }

    #[test]
    fn test_list_pipeline() {
        let pipeline = Pipeline::new(ListConvertor::new(IntConvertor::default()))
            .validator(
                ListValidator::new()
                    .len_validator(InRange::new(1_usize, 3))
                    .elem_validator(InRange::new(1_i64, 9)),
            );

        assert_eq!(pipeline.process("1, 2, 3").unwrap(), vec![1, 2, 3]);
        assert!(pipeline.process("1, 2, 3, 4").is_err());
        assert_eq!(
            pipeline.process("1, 20").unwrap_err().to_string(),
            "\"1, 20\" has element 2 that is too high (max value is 9)"
        );
    }

    #[test]
    fn test_yes_no_pipeline_with_default_markers() {
        let pipeline = Pipeline::new(YesNoConvertor::default()).cleaners([
            Cleaner::strip(),
            Cleaner::StripChars {
                chars: "[]".to_string(),
            },
        ]);
        assert_eq!(pipeline.process(" [Y] ").unwrap(), YesNo::Yes);
    }
}
