//! # Table input
//!
//! Shows a table of `(id, value)` rows and lets the user pick one by typing
//! its id, its value, or either ([`TableField`]).
//!
//! ```text
//! Colors
//!   1  red
//!   2  green
//!   3  blue
//! Pick a color:
//! ```
//!
//! ## Example
//! ```rust
//! use std::io::Cursor;
//! use cooked_input::{Table, TableField, TableInput, Terminal};
//!
//! let table = Table::from_values(["red", "green", "blue"]).with_title("Colors");
//! let mut term = Terminal::new(Cursor::new("GREEN\n"), Vec::new());
//! let row = TableInput::new(table)
//!     .field(TableField::IdOrValue)
//!     .prompt("Pick a color")
//!     .get_from(&mut term)
//!     .unwrap();
//! assert_eq!(row.id, "2");
//! ```
use std::io::{BufRead, Write};

use crate::{
    cleaners::Cleaner,
    convertors::Convert,
    error::{ConvertError, InputError},
    prompt::{GetInput, InputStyle},
    terminal::Terminal,
};

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRow {
    pub id: String,
    pub value: String,
}

impl TableRow {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Which column the user's answer is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TableField {
    #[default]
    Id,
    Value,
    IdOrValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    rows: Vec<TableRow>,
    title: Option<String>,
    case_sensitive: bool,
}

impl Table {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Rows whose ids are their 1-based positions.
    pub fn from_values<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            values
                .into_iter()
                .enumerate()
                .map(|(i, value)| TableRow::new((i + 1).to_string(), value))
                .collect(),
        )
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row matching `input` in the given column. Ids win over values.
    pub fn find(&self, input: &str, field: TableField) -> Option<&TableRow> {
        let by_id = || self.rows.iter().find(|row| self.same(&row.id, input));
        let by_value = || self.rows.iter().find(|row| self.same(&row.value, input));

        match field {
            TableField::Id => by_id(),
            TableField::Value => by_value(),
            TableField::IdOrValue => by_id().or_else(by_value),
        }
    }

    fn same(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.to_lowercase() == b.to_lowercase()
        }
    }

    /// Title line (if any) followed by one line per row, ids right-aligned.
    pub fn render(&self) -> String {
        let width = self
            .rows
            .iter()
            .map(|row| row.id.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(title);
            out.push('\n');
        }
        for row in &self.rows {
            out.push_str(&format!("  {:>width$}  {}\n", row.id, row.value));
        }
        out
    }
}

/// Maps the answer to the matching [`TableRow`].
#[derive(Debug, Clone)]
pub struct TableConvertor {
    table: Table,
    field: TableField,
    value_error_str: String,
}

impl TableConvertor {
    pub fn new(table: Table, field: TableField) -> Self {
        Self {
            table,
            field,
            value_error_str: "a valid table row".to_string(),
        }
    }

    pub fn with_error_str(mut self, value_error_str: impl Into<String>) -> Self {
        self.value_error_str = value_error_str.into();
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}

impl Convert for TableConvertor {
    type Output = TableRow;

    fn convert(&self, value: &str) -> Result<TableRow, ConvertError> {
        self.table
            .find(value, self.field)
            .cloned()
            .ok_or_else(|| ConvertError::new(self.value_error_str.as_str()))
    }
}

/// Shows a [`Table`] and asks for one of its rows.
pub struct TableInput {
    table: Table,
    field: TableField,
    prompt: String,
    default: Option<String>,
    max_retries: Option<usize>,
    style: InputStyle,
}

impl TableInput {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            field: TableField::default(),
            prompt: "Choose a row".to_string(),
            default: None,
            max_retries: None,
            style: InputStyle::default(),
        }
    }

    pub fn field(mut self, field: TableField) -> Self {
        self.field = field;
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn style(mut self, style: InputStyle) -> Self {
        self.style = style;
        self
    }

    fn input(&self) -> GetInput<TableConvertor> {
        let mut input = GetInput::new(TableConvertor::new(self.table.clone(), self.field))
            .prompt(self.prompt.as_str())
            .cleaner(Cleaner::strip())
            .style(self.style.clone());
        if let Some(default) = &self.default {
            input = input.default(default.as_str());
        }
        if let Some(max) = self.max_retries {
            input = input.max_retries(max);
        }
        input
    }

    pub fn get_from<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<TableRow, InputError> {
        term.write_prompt(&self.table.render())?;
        self.input().get_from(term)
    }

    pub fn get(&self) -> Result<TableRow, InputError> {
        self.get_from(&mut Terminal::stdio())
    }
}

/// Shows `table` on stdout and asks for a row, matched on `field`.
pub fn get_table_input(
    table: &Table,
    prompt: &str,
    field: TableField,
) -> Result<TableRow, InputError> {
    TableInput::new(table.clone())
        .prompt(prompt)
        .field(field)
        .get()
}
