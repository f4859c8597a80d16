//! # Cleaners
//!
//! Cleaners are the first stage of the pipeline: plain `&str -> String`
//! transformations applied to the raw line before it is converted. They run
//! in order, so `[Cleaner::strip(), Cleaner::Lower]` trims first and then
//! lower-cases.
//!
//! ## Example
//! ```rust
//! use cooked_input::{Cleaner, clean_all};
//!
//! let cleaners = [Cleaner::strip(), Cleaner::Capitalize { all_words: true }];
//! assert_eq!(clean_all("  ada LOVELACE ", &cleaners), "Ada Lovelace");
//! ```
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A transformation applied to the raw input text.
///
/// - `Strip`: trims whitespace from the leading and/or trailing end.
/// - `StripChars`: trims any of the given characters from both ends (e.g. `"[]"` to drop default markers).
/// - `Lower` / `Upper`: case-folds the whole string.
/// - `Capitalize`: upper-cases the first letter and lower-cases the rest, per word when `all_words` is set.
/// - `Replace`: replaces `from` with `to`, at most `count` times (every occurrence when `None`).
/// - `Custom`: any caller supplied function.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Cleaner {
    Strip {
        #[cfg_attr(feature = "serde", serde(default = "enabled"))]
        leading: bool,
        #[cfg_attr(feature = "serde", serde(default = "enabled"))]
        trailing: bool,
    },
    StripChars {
        chars: String,
    },
    Lower,
    Upper,
    Capitalize {
        #[cfg_attr(feature = "serde", serde(default))]
        all_words: bool,
    },
    Replace {
        from: String,
        to: String,
        #[cfg_attr(feature = "serde", serde(default))]
        count: Option<usize>,
    },
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(fn(&str) -> String),
}

#[cfg(feature = "serde")]
fn enabled() -> bool {
    true
}

impl Cleaner {
    /// Trims whitespace from both ends.
    pub fn strip() -> Self {
        Self::Strip {
            leading: true,
            trailing: true,
        }
    }

    pub fn replace(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Replace {
            from: from.into(),
            to: to.into(),
            count: None,
        }
    }

    pub fn clean(&self, input: &str) -> String {
        match self {
            Cleaner::Strip { leading, trailing } => match (leading, trailing) {
                (true, true) => input.trim().to_string(),
                (true, false) => input.trim_start().to_string(),
                (false, true) => input.trim_end().to_string(),
                (false, false) => input.to_string(),
            },
            Cleaner::StripChars { chars } => input
                .trim_matches(|c: char| chars.contains(c))
                .to_string(),
            Cleaner::Lower => input.to_lowercase(),
            Cleaner::Upper => input.to_uppercase(),
            Cleaner::Capitalize { all_words } => {
                if *all_words {
                    capitalize_words(input)
                } else {
                    capitalize(input)
                }
            }
            Cleaner::Replace { from, to, count } => {
                if from.is_empty() {
                    return input.to_string();
                }
                match count {
                    Some(n) => input.replacen(from.as_str(), to, *n),
                    None => input.replace(from.as_str(), to),
                }
            }
            Cleaner::Custom(f) => f(input),
        }
    }
}

/// Runs every cleaner over `input`, in order.
pub fn clean_all(input: &str, cleaners: &[Cleaner]) -> String {
    let cleaned = cleaners
        .iter()
        .fold(input.to_string(), |acc, cleaner| cleaner.clean(&acc));
    trace!(raw_len = input.len(), cleaned_len = cleaned.len(), "input cleaned");
    cleaned
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// Whitespace between words is kept as typed.
fn capitalize_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut word = String::new();

    for c in input.chars() {
        if c.is_whitespace() {
            out.push_str(&capitalize(&word));
            word.clear();
            out.push(c);
        } else {
            word.push(c);
        }
    }
    out.push_str(&capitalize(&word));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_both_ends() {
        assert_eq!(Cleaner::strip().clean("  red \t"), "red");
    }

    #[test]
    fn test_strip_trailing_only() {
        let cleaner = Cleaner::Strip {
            leading: false,
            trailing: true,
        };
        assert_eq!(cleaner.clean("  red  "), "  red");
    }

    #[test]
    fn test_strip_chars_removes_default_markers() {
        let cleaner = Cleaner::StripChars {
            chars: "[]".to_string(),
        };
        assert_eq!(cleaner.clean("[cherry]"), "cherry");
        assert_eq!(cleaner.clean("che[rr]y"), "che[rr]y");
    }

    #[test]
    fn test_case_cleaners() {
        assert_eq!(Cleaner::Lower.clean("MiXeD"), "mixed");
        assert_eq!(Cleaner::Upper.clean("MiXeD"), "MIXED");
    }

    #[test]
    fn test_capitalize_first_word_only() {
        let cleaner = Cleaner::Capitalize { all_words: false };
        assert_eq!(cleaner.clean("hELLO wORLD"), "Hello world");
        assert_eq!(cleaner.clean(""), "");
    }

    #[test]
    fn test_capitalize_all_words_keeps_spacing() {
        let cleaner = Cleaner::Capitalize { all_words: true };
        assert_eq!(cleaner.clean("len  wANGER"), "Len  Wanger");
    }

    #[test]
    fn test_replace_with_and_without_count() {
        assert_eq!(Cleaner::replace("-", "").clean("555-12-34"), "5551234");

        let once = Cleaner::Replace {
            from: "-".to_string(),
            to: "/".to_string(),
            count: Some(1),
        };
        assert_eq!(once.clean("a-b-c"), "a/b-c");
    }

    #[test]
    fn test_replace_empty_pattern_is_a_no_op() {
        assert_eq!(Cleaner::replace("", "x").clean("abc"), "abc");
    }

    #[test]
    fn test_custom_cleaner() {
        fn digits_only(s: &str) -> String {
            s.chars().filter(char::is_ascii_digit).collect()
        }
        assert_eq!(Cleaner::Custom(digits_only).clean("(555) 123"), "555123");
    }

    #[test]
    fn test_clean_all_runs_in_order() {
        let cleaners = [Cleaner::strip(), Cleaner::Lower, Cleaner::replace(" ", "_")];
        assert_eq!(clean_all("  Hot Pink ", &cleaners), "hot_pink");
    }
}
