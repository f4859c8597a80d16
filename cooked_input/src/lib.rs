//! # cooked_input
//!
//! A Rust library for getting, cleaning, converting and validating command line input.
//!
//! Raw terminal input is "uncooked": it is a string, with stray whitespace, the wrong
//! case and no guarantee that it means anything. `cooked_input` turns it into a typed,
//! validated value, re-prompting the user until the answer is acceptable.
//!
//! ## Features
//!
//! - **Cleaners** - Normalise text before it is converted (strip, change case, replace)
//! - **Convertors** - Turn text into integers, floats, booleans, yes/no answers, dates and lists
//! - **Validators** - Composable checks on the converted value (ranges, lengths, choices, regexes, passwords)
//! - **Prompts** - Defaults, optional answers, retry limits and configurable error messages
//! - **Tables and menus** - Pick a row from a table or run actions from a menu
//!
//! ("serde" feature)
//! - **Descriptors** - Prompts, cleaners and rules described as data, e.g. in a TOML file
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cooked_input = "0.1.1"
//! cooked_input = { version = "0.1.1", features = ["serde"] }
//! ```
//!
//! ## Usage Examples
//!
//! ### Ask for a number in a range
//!
//! ```rust,no_run
//! use cooked_input::{Cleaner, GetInput, InRange, IntConvertor};
//!
//! let threads = GetInput::new(IntConvertor::default())
//!     .prompt("How many threads (1-16)?")
//!     .default("4")
//!     .cleaner(Cleaner::strip())
//!     .validator(InRange::new(1, 16))
//!     .get()
//!     .unwrap();
//! println!("Threads: {threads}");
//! ```
//!
//! ### Process a value without a terminal
//!
//! ```rust
//! use cooked_input::{Cleaner, InChoices, Pipeline, StrConvertor, process_value};
//!
//! let flavors = Pipeline::new(StrConvertor::default())
//!     .cleaners([Cleaner::strip(), Cleaner::Lower])
//!     .validator(InChoices::<String>::new(["cherry", "lime"]));
//!
//! assert_eq!(process_value("  Lime ", &flavors).unwrap(), "lime");
//! assert_eq!(
//!     process_value("grape", &flavors).unwrap_err().to_string(),
//!     "\"grape\" is not a valid choice (choices are: cherry, lime)"
//! );
//! ```
//!
//! ### Menus
//!
//! ```rust,no_run
//! use cooked_input::{Menu, MenuAction, MenuItem};
//!
//! let menu = Menu::new(vec![
//!     MenuItem::new("Say hello").with_action(MenuAction::callback(|_| {
//!         println!("hello");
//!         true
//!     })),
//!     MenuItem::new("Say goodbye").with_action(MenuAction::Exit),
//! ])
//! .with_title("Greetings")
//! .add_exit(false);
//!
//! menu.run().unwrap();
//! ```
//!
//! ## Architecture
//!
//! Every answer goes through the same steps:
//!
//! 1. **`terminal`** - the prompt is written and one line is read
//! 2. **`cleaners`** - the line is cleaned
//! 3. **`convertors`** - the cleaned text is converted to the output type
//! 4. **`validators`** - the value is checked
//! 5. **`prompt`** - on failure the error is shown and the user is asked again
//!
//! **`pipeline`** bundles steps 2 to 4 so they can also run on strings that did not
//! come from a terminal. **`table`** and **`menu`** build on **`prompt`**.
//!
//! ## Error Handling
//!
//! Prompts return [`InputError`]. Conversion and validation failures are
//! reported to the user and retried; they only escape when a retry limit is set.
//!
//! ```rust
//! use std::io::Cursor;
//! use cooked_input::{GetInput, InputError, IntConvertor, Terminal};
//!
//! let mut term = Terminal::new(Cursor::new("one\ntwo\n"), Vec::new());
//! let err = GetInput::new(IntConvertor::default())
//!     .prompt("Number")
//!     .max_retries(2)
//!     .get_from(&mut term)
//!     .unwrap_err();
//! assert!(matches!(err, InputError::RetriesExhausted(2)));
//! ```
//!
//! ## License
//!
//! This project is licensed under the MIT License.

pub mod cleaners;
pub mod convertors;
#[cfg(feature = "serde")]
pub mod descriptor;
pub mod error;
pub mod menu;
pub mod pipeline;
pub mod prompt;
pub mod table;
pub mod terminal;
pub mod validators;

pub use cleaners::{Cleaner, clean_all};
pub use convertors::{
    BooleanConvertor, ChoiceConvertor, Convert, DateConvertor, FloatConvertor, IntConvertor,
    ListConvertor, StrConvertor, YesNo, YesNoConvertor,
};
pub use error::{ConvertError, InputError, ValidationError};
pub use menu::{Menu, MenuAction, MenuCallback, MenuItem, get_menu};
pub use pipeline::{Pipeline, process_value};
pub use prompt::{GetInput, InputStyle, get_input};
pub use table::{Table, TableConvertor, TableField, TableInput, TableRow, get_table_input};
pub use terminal::Terminal;
pub use validators::{
    AllOf, AnyOf, BoxedValidator, Custom, ExactLength, ExactValue, HasLength, InChoices,
    InLength, InRange, ListValidator, NotIn, PasswordValidator, RegexValidator, Validate,
    in_all, in_any, not_in, validate,
};
