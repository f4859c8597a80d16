//! # Menus
//!
//! A [`Menu`] is a list of [`MenuItem`]s, each with a tag the user can type
//! (items without one are tagged with their 1-based position) and an
//! optional [`MenuAction`]. Typing the item text works too.
//!
//! ```text
//! My Menu
//!   1) red
//!   2) blue
//!   3) green
//!   4) exit
//! Choose a menu item [red]:
//! ```
//!
//! [`Menu::run_from`] keeps asking and dispatching actions until an item
//! with [`MenuAction::Exit`] is picked.
//!
//! ## Example
//! ```rust
//! use std::io::Cursor;
//! use cooked_input::{Menu, Terminal};
//!
//! let menu = Menu::from_choices(["red", "blue", "green"]).with_title("Colors");
//! let mut term = Terminal::new(Cursor::new("2\n"), Vec::new());
//! assert_eq!(menu.get_selection_from(&mut term).unwrap().as_deref(), Some("blue"));
//! ```
use std::{
    fmt,
    io::{BufRead, Write},
};

use tracing::debug;

use crate::{
    cleaners::Cleaner,
    convertors::Convert,
    error::{ConvertError, InputError},
    prompt::{GetInput, InputStyle},
    terminal::Terminal,
};

/// Callback run when an item is picked. Receives the item tag and returns
/// whether the menu should keep running.
pub type MenuCallback = Box<dyn Fn(&str) -> bool>;

/// What happens when an item is picked.
///
/// - `None`: nothing, the menu keeps running.
/// - `Default`: runs the menu's default action, if it has one.
/// - `Exit`: stops [`Menu::run_from`].
/// - `Callback`: runs the closure.
#[derive(Default)]
pub enum MenuAction {
    #[default]
    None,
    Default,
    Exit,
    Callback(MenuCallback),
}

impl MenuAction {
    pub fn callback(f: impl Fn(&str) -> bool + 'static) -> Self {
        Self::Callback(Box::new(f))
    }
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Default => write!(f, "Default"),
            Self::Exit => write!(f, "Exit"),
            Self::Callback(_) => write!(f, "Callback(..)"),
        }
    }
}

#[derive(Debug)]
pub struct MenuItem {
    pub text: String,
    pub tag: Option<String>,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
            action: MenuAction::None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_action(mut self, action: MenuAction) -> Self {
        self.action = action;
        self
    }
}

pub struct Menu {
    items: Vec<MenuItem>,
    title: Option<String>,
    prompt: String,
    default_choice: Option<String>,
    default_action: Option<MenuCallback>,
    add_exit: bool,
    case_sensitive: bool,
    style: InputStyle,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            title: None,
            prompt: "Choose a menu item".to_string(),
            default_choice: None,
            default_action: None,
            add_exit: true,
            case_sensitive: false,
            style: InputStyle::default(),
        }
    }

    /// Items with no action, one per choice.
    pub fn from_choices<S: Into<String>>(choices: impl IntoIterator<Item = S>) -> Self {
        Self::new(choices.into_iter().map(MenuItem::new).collect())
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Tag or text picked when the answer is blank.
    pub fn with_default_choice(mut self, choice: impl Into<String>) -> Self {
        self.default_choice = Some(choice.into());
        self
    }

    /// Run for items whose action is [`MenuAction::Default`].
    pub fn with_default_action(mut self, action: impl Fn(&str) -> bool + 'static) -> Self {
        self.default_action = Some(Box::new(action));
        self
    }

    /// Whether an `exit` item is appended (on by default).
    pub fn add_exit(mut self, add_exit: bool) -> Self {
        self.add_exit = add_exit;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn style(mut self, style: InputStyle) -> Self {
        self.style = style;
        self
    }

    /// `(tag, text)` of every item as displayed, the exit item included.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = self.item_entries();
        if let Some(tag) = self.exit_tag() {
            entries.push((tag, "exit".to_string()));
        }
        entries
    }

    fn item_entries(&self) -> Vec<(String, String)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let tag = item.tag.clone().unwrap_or_else(|| (i + 1).to_string());
                (tag, item.text.clone())
            })
            .collect()
    }

    /// The first number from n+1 up that no item uses as its tag.
    fn exit_tag(&self) -> Option<String> {
        if !self.add_exit {
            return None;
        }
        let taken = self.item_entries();
        (self.items.len() + 1..)
            .map(|n| n.to_string())
            .find(|tag| !taken.iter().any(|(t, _)| t == tag))
    }

    pub fn render(&self) -> String {
        let entries = self.entries();
        let width = entries
            .iter()
            .map(|(tag, _)| tag.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(title);
            out.push('\n');
        }
        for (tag, text) in &entries {
            out.push_str(&format!("  {tag:>width$}) {text}\n"));
        }
        out
    }

    /// Shows the menu and returns the tag of the picked item.
    pub fn get_menu_choice_from<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<String, InputError> {
        term.write_prompt(&self.render())?;

        let mut input = GetInput::new(MenuConvertor {
            entries: self.entries(),
            case_sensitive: self.case_sensitive,
        })
        .prompt(self.prompt.as_str())
        .cleaner(Cleaner::strip())
        .style(self.style.clone());
        if let Some(default) = &self.default_choice {
            input = input.default(default.as_str());
        }

        let tag = input.get_from(term)?;
        debug!(tag = %tag, "menu item picked");
        Ok(tag)
    }

    pub fn get_menu_choice(&self) -> Result<String, InputError> {
        self.get_menu_choice_from(&mut Terminal::stdio())
    }

    /// The action of the item tagged `tag`. The exit item reports [`MenuAction::Exit`].
    pub fn get_action(&self, tag: &str) -> Option<&MenuAction> {
        if self.exit_tag().as_deref() == Some(tag) {
            return Some(&MenuAction::Exit);
        }
        self.items
            .iter()
            .enumerate()
            .find(|(i, item)| match &item.tag {
                Some(t) => t == tag,
                None => (i + 1).to_string() == tag,
            })
            .map(|(_, item)| &item.action)
    }

    /// Runs the action of the item tagged `tag`; `false` means the menu should stop.
    pub fn do_action(&self, tag: &str) -> bool {
        match self.get_action(tag) {
            Some(MenuAction::Exit) => false,
            Some(MenuAction::Callback(f)) => f(tag),
            Some(MenuAction::Default) => self.default_action.as_ref().is_none_or(|f| f(tag)),
            Some(MenuAction::None) | None => true,
        }
    }

    /// Asks and dispatches until an action stops the menu.
    pub fn run_from<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<(), InputError> {
        loop {
            let tag = self.get_menu_choice_from(term)?;
            if !self.do_action(&tag) {
                return Ok(());
            }
        }
    }

    pub fn run(&self) -> Result<(), InputError> {
        self.run_from(&mut Terminal::stdio())
    }

    /// Returns the text of the picked item, or `None` for the exit item.
    pub fn get_selection_from<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> Result<Option<String>, InputError> {
        let tag = self.get_menu_choice_from(term)?;
        if self.exit_tag().as_deref() == Some(tag.as_str()) {
            return Ok(None);
        }
        Ok(self
            .entries()
            .into_iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, text)| text))
    }

    pub fn get_selection(&self) -> Result<Option<String>, InputError> {
        self.get_selection_from(&mut Terminal::stdio())
    }
}

/// Maps an answer (tag or item text) to the item tag.
struct MenuConvertor {
    entries: Vec<(String, String)>,
    case_sensitive: bool,
}

impl MenuConvertor {
    fn same(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.to_lowercase() == b.to_lowercase()
        }
    }
}

impl Convert for MenuConvertor {
    type Output = String;

    fn convert(&self, value: &str) -> Result<String, ConvertError> {
        self.entries
            .iter()
            .find(|(tag, _)| self.same(tag, value))
            .or_else(|| self.entries.iter().find(|(_, text)| self.same(text, value)))
            .map(|(tag, _)| tag.clone())
            .ok_or_else(|| ConvertError::new("a valid menu choice"))
    }
}

/// Shows `choices` as a menu with an exit item and returns the picked text,
/// or `None` when exit was picked.
pub fn get_menu<S: Into<String>>(
    choices: impl IntoIterator<Item = S>,
) -> Result<Option<String>, InputError> {
    Menu::from_choices(choices).get_selection()
}
