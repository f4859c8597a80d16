//! # Prompts
//!
//! [`GetInput`] is the interactive front of a [`Pipeline`]: it shows a
//! prompt, reads a line, runs it through the pipeline and asks again until
//! the value is accepted.
//!
//! - Blank input falls back to the default value, when there is one.
//! - [`GetInput::get`] asks again on blank input; [`GetInput::get_optional`] returns `None`.
//! - Rejected input is reported (see [`InputStyle::error_fmt`]) and the prompt repeats.
//! - The loop ends with an error when input runs out or after `max_retries` rejected attempts.
//!
//! ## Example
//! ```rust,no_run
//! use cooked_input::{Cleaner, GetInput, InRange, IntConvertor};
//!
//! let threads = GetInput::new(IntConvertor::default())
//!     .prompt("Worker threads")
//!     .cleaner(Cleaner::strip())
//!     .validator(InRange::new(1, 16))
//!     .default("4")
//!     .get()
//!     .unwrap();
//! println!("Threads: {threads}");
//! ```
use std::io::{BufRead, Write};

use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    cleaners::Cleaner,
    convertors::Convert,
    error::InputError,
    pipeline::Pipeline,
    terminal::Terminal,
    validators::{BoxedValidator, Validate},
};

/// How prompts and error messages are rendered.
///
/// `default_fmt` may use `{default}`; `error_fmt` may use `{error}` and `{value}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct InputStyle {
    pub prompt_suffix: String,
    pub show_default: bool,
    pub default_fmt: String,
    pub error_fmt: String,
}

impl Default for InputStyle {
    fn default() -> Self {
        Self {
            prompt_suffix: ": ".to_string(),
            show_default: true,
            default_fmt: "[{default}]".to_string(),
            error_fmt: "{error}".to_string(),
        }
    }
}

impl InputStyle {
    pub fn render_prompt(&self, prompt: &str, default: Option<&str>) -> String {
        let mut rendered = prompt.to_string();
        if let Some(default) = default.filter(|_| self.show_default) {
            if !rendered.is_empty() {
                rendered.push(' ');
            }
            rendered.push_str(&self.default_fmt.replace("{default}", default));
        }
        rendered.push_str(&self.prompt_suffix);
        rendered
    }

    /// Fills `{value}` and `{error}` in one pass, so text from either is never expanded again.
    pub fn render_error(&self, error: &InputError) -> String {
        let value = error.value().unwrap_or_default();
        let message = error.to_string();

        let mut out = String::with_capacity(self.error_fmt.len() + message.len());
        let mut rest = self.error_fmt.as_str();
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{value}") {
                out.push_str(value);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{error}") {
                out.push_str(&message);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

/// Everything about a prompt except the pipeline.
#[derive(Debug, Clone, Default)]
pub(crate) struct Prompt {
    pub(crate) text: String,
    pub(crate) default: Option<String>,
    pub(crate) max_retries: Option<usize>,
    pub(crate) style: InputStyle,
}

impl Prompt {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// The prompt loop shared by [`GetInput`], [`Terminal::ask`], tables and menus.
///
/// Returns `Ok(None)` only when `blank_ok` is set and the answer was blank
/// with no default to fall back on.
pub(crate) fn run<C, R, W>(
    term: &mut Terminal<R, W>,
    pipeline: &Pipeline<C>,
    prompt: &Prompt,
    blank_ok: bool,
) -> Result<Option<C::Output>, InputError>
where
    C: Convert,
    R: BufRead,
    W: Write,
{
    let question = prompt
        .style
        .render_prompt(&prompt.text, prompt.default.as_deref());
    let mut attempts = 0;

    loop {
        attempts += 1;
        term.write_prompt(&question)?;

        let Some(line) = term.read_line()? else {
            debug!(attempts, "input closed");
            return Err(InputError::Eof);
        };

        let mut cleaned = pipeline.clean(&line);
        if cleaned.trim().is_empty() {
            match (&prompt.default, blank_ok) {
                (Some(default), _) => {
                    trace!("blank input, using default");
                    cleaned = pipeline.clean(default);
                }
                (None, true) => return Ok(None),
                (None, false) => {}
            }
        }

        let outcome = if cleaned.trim().is_empty() {
            Err(InputError::Blank)
        } else {
            pipeline.convert_and_validate(&cleaned)
        };

        match outcome {
            Ok(value) => return Ok(Some(value)),
            Err(e) => {
                debug!(attempts, reason = %e.reason(), "input rejected");
                term.write_line(&prompt.style.render_error(&e))?;
            }
        }

        if prompt.max_retries.is_some_and(|max| attempts >= max) {
            return Err(InputError::RetriesExhausted(attempts));
        }
    }
}

/// Builder for a single interactive question.
pub struct GetInput<C: Convert> {
    pipeline: Pipeline<C>,
    prompt: Prompt,
}

impl<C: Convert> GetInput<C> {
    pub fn new(convertor: C) -> Self {
        Self::from_pipeline(Pipeline::new(convertor))
    }

    pub fn from_pipeline(pipeline: Pipeline<C>) -> Self {
        Self {
            pipeline,
            prompt: Prompt::default(),
        }
    }

    pub fn prompt(mut self, text: impl Into<String>) -> Self {
        self.prompt.text = text.into();
        self
    }

    /// Raw text used when the answer is blank. It goes through the whole pipeline.
    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.prompt.default = Some(default.into());
        self
    }

    /// Gives up after this many rejected answers.
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.prompt.max_retries = Some(max_retries);
        self
    }

    pub fn style(mut self, style: InputStyle) -> Self {
        self.prompt.style = style;
        self
    }

    pub fn cleaner(mut self, cleaner: Cleaner) -> Self {
        self.pipeline = self.pipeline.cleaner(cleaner);
        self
    }

    pub fn cleaners(mut self, cleaners: impl IntoIterator<Item = Cleaner>) -> Self {
        self.pipeline = self.pipeline.cleaners(cleaners);
        self
    }

    pub fn validator<V>(mut self, validator: V) -> Self
    where
        V: Validate<C::Output> + 'static,
    {
        self.pipeline = self.pipeline.validator(validator);
        self
    }

    pub fn boxed_validators(
        mut self,
        validators: impl IntoIterator<Item = BoxedValidator<C::Output>>,
    ) -> Self {
        self.pipeline = self.pipeline.boxed_validators(validators);
        self
    }

    pub fn pipeline(&self) -> &Pipeline<C> {
        &self.pipeline
    }

    /// Asks on `term` until a value is accepted.
    pub fn get_from<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<C::Output, InputError> {
        run(term, &self.pipeline, &self.prompt, false)?.ok_or(InputError::Blank)
    }

    /// Like [`GetInput::get_from`], but a blank answer without default yields `None`.
    pub fn get_optional_from<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<Option<C::Output>, InputError> {
        run(term, &self.pipeline, &self.prompt, true)
    }

    /// Asks on stdin/stdout.
    pub fn get(&self) -> Result<C::Output, InputError> {
        self.get_from(&mut Terminal::stdio())
    }

    pub fn get_optional(&self) -> Result<Option<C::Output>, InputError> {
        self.get_optional_from(&mut Terminal::stdio())
    }
}

/// Asks `prompt` on stdin/stdout until `convertor` accepts the answer.
///
/// ```rust,no_run
/// use cooked_input::{FloatConvertor, get_input};
///
/// let price = get_input("Price", FloatConvertor::default()).unwrap();
/// ```
pub fn get_input<C: Convert>(prompt: &str, convertor: C) -> Result<C::Output, InputError> {
    GetInput::new(convertor).prompt(prompt).get()
}
