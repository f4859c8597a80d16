//! Interactive demonstrations of the library

use std::{
    cell::RefCell,
    fmt::Display,
    io::{BufRead, Write},
    rc::Rc,
};

use colored::Colorize;
use cooked_input::{
    AnyOf, Cleaner, Convert, DateConvertor, ExactLength, ExactValue, FloatConvertor, GetInput,
    InChoices, InLength, InRange, InputError, InputStyle, IntConvertor, ListConvertor,
    ListValidator, Menu, MenuAction, MenuItem, NotIn, StrConvertor, Table, TableField,
    TableInput, TableRow, Terminal, YesNoConvertor,
};
use tracing::info;

use crate::cli::DemoKind;

const COLORS: [&str; 3] = ["red", "green", "blue"];
const GOOD_FLAVORS: [&str; 4] = ["cherry", "lime", "lemon", "orange"];
const BAD_FLAVOR: &str = "licorice";

pub fn run<R: BufRead, W: Write>(
    which: DemoKind,
    term: &mut Terminal<R, W>,
    style: &InputStyle,
) -> Result<(), InputError> {
    info!(demo = ?which, "starting demo");
    let mut demo = Demo { term, style };
    match which {
        DemoKind::Strings => demo.strings(),
        DemoKind::Numbers => demo.numbers(),
        DemoKind::Dates => demo.dates(),
        DemoKind::Lists => demo.lists(),
        DemoKind::Menu => demo.menu(),
        DemoKind::Table => demo.table(),
    }
}

struct Demo<'a, R, W> {
    term: &'a mut Terminal<R, W>,
    style: &'a InputStyle,
}

impl<R: BufRead, W: Write> Demo<'_, R, W> {
    fn heading(&mut self, text: &str) -> Result<(), InputError> {
        self.term.write_line(&format!("\n{}", text.bold()))?;
        Ok(())
    }

    fn show(&mut self, value: impl Display) -> Result<(), InputError> {
        self.term.write_line(&format!("{} {value}", "=>".green()))?;
        Ok(())
    }

    fn ask<C>(&mut self, input: GetInput<C>) -> Result<(), InputError>
    where
        C: Convert,
        C::Output: Display,
    {
        let value = input.style(self.style.clone()).get_from(self.term)?;
        self.show(value)
    }

    fn strings(&mut self) -> Result<(), InputError> {
        let text = || GetInput::new(StrConvertor::default());
        let strip_and_lower = [Cleaner::strip(), Cleaner::Lower];
        let not_licorice = || NotIn::<String>::new([InChoices::<String>::new([BAD_FLAVOR])]);

        self.heading("Any string")?;
        self.ask(text().prompt("Enter any string"))?;

        let optional = text()
            .prompt("Enter any string (blank is ok)")
            .style(self.style.clone())
            .get_optional_from(self.term)?;
        self.show(format!("{optional:?}"))?;

        self.heading("Cleaners")?;
        self.ask(
            text()
                .prompt("Enter any string (stripped and lower-cased)")
                .cleaners(strip_and_lower.clone()),
        )?;
        self.ask(
            text()
                .prompt("Enter any string (trailing spaces stripped, upper-cased)")
                .cleaners([
                    Cleaner::Strip {
                        leading: false,
                        trailing: true,
                    },
                    Cleaner::Upper,
                ]),
        )?;
        self.ask(
            text()
                .prompt("Enter your name (first word capitalized)")
                .cleaner(Cleaner::Capitalize { all_words: false }),
        )?;
        self.ask(
            text()
                .prompt("Enter your name (all words capitalized)")
                .cleaner(Cleaner::Capitalize { all_words: true }),
        )?;

        self.heading("Choices")?;
        self.ask(
            text()
                .prompt("What is your favorite flavor jelly bean (don't say licorice!)?")
                .default("cherry")
                .validator(not_licorice()),
        )?;
        self.ask(
            text()
                .prompt(format!(
                    "Which of these is your favorite flavor jelly bean ({}, but not licorice!)?",
                    GOOD_FLAVORS.join(", ")
                ))
                .default("cherry")
                .cleaners(strip_and_lower)
                .validator(InChoices::<String>::new(GOOD_FLAVORS))
                .validator(not_licorice()),
        )?;

        self.heading("Lengths")?;
        self.ask(
            text()
                .prompt("Enter a three letter string")
                .validator(ExactLength(3)),
        )?;
        self.ask(
            text()
                .prompt("Enter a string at least 5 letters long")
                .validator(InLength::at_least(5)),
        )?;
        self.ask(
            text()
                .prompt("Enter a 2 to 4 letter string")
                .validator(InLength::new(2, 4)),
        )?;

        self.heading("Yes or no")?;
        self.ask(
            GetInput::new(YesNoConvertor::default())
                .prompt("Yes or no?")
                .default("Y")
                .cleaner(Cleaner::strip()),
        )
    }

    fn numbers(&mut self) -> Result<(), InputError> {
        let int = || GetInput::new(IntConvertor::default()).cleaner(Cleaner::strip());

        self.heading("Integers")?;
        self.ask(int().prompt("Enter an integer"))?;
        self.ask(
            int()
                .prompt("Enter an integer between 1 and 10")
                .default("5")
                .validator(InRange::new(1, 10)),
        )?;
        self.ask(
            GetInput::new(IntConvertor::default().with_base(16))
                .prompt("Enter a hexadecimal number")
                .cleaner(Cleaner::strip()),
        )?;
        self.ask(
            int()
                .prompt("Enter any number but 13")
                .validator(NotIn::<i64>::new([ExactValue(13_i64)])),
        )?;
        self.ask(
            int()
                .prompt("Enter a number below 0 or above 100")
                .validator(AnyOf::<i64>::new(vec![
                    Box::new(InRange::at_most(-1_i64)),
                    Box::new(InRange::at_least(101_i64)),
                ])),
        )?;

        self.heading("Floats")?;
        self.ask(
            GetInput::new(FloatConvertor::default())
                .prompt("Enter a non-negative float")
                .cleaner(Cleaner::strip())
                .validator(InRange::at_least(0.0)),
        )
    }

    fn dates(&mut self) -> Result<(), InputError> {
        let date = || GetInput::new(DateConvertor::default()).cleaner(Cleaner::strip());

        self.heading("Dates")?;
        let when = date()
            .prompt("Enter a date (e.g. 2017-10-01, October 1, 2017, tomorrow, in 3 days)")
            .default("today")
            .style(self.style.clone())
            .get_from(self.term)?;
        self.show(when.format("%A %B %-d, %Y %H:%M"))?;

        let maybe = date()
            .prompt("Enter another date (blank is ok)")
            .style(self.style.clone())
            .get_optional_from(self.term)?;
        match maybe {
            Some(when) => self.show(when.format("%Y-%m-%d")),
            None => self.show("no date"),
        }
    }

    fn lists(&mut self) -> Result<(), InputError> {
        self.heading("Lists")?;

        let scores = GetInput::new(ListConvertor::new(IntConvertor::default()))
            .prompt("Enter 2 to 5 comma separated scores from 0 to 100")
            .cleaner(Cleaner::strip())
            .validator(
                ListValidator::new()
                    .len_validator(InRange::new(2_usize, 5))
                    .elem_validator(InRange::new(0_i64, 100)),
            )
            .style(self.style.clone())
            .get_from(self.term)?;
        self.show(format!("{scores:?}"))?;

        let readings = GetInput::new(ListConvertor::new(FloatConvertor::default()).sniff_delimiter())
            .prompt("Enter some readings (any delimiter)")
            .cleaner(Cleaner::strip())
            .style(self.style.clone())
            .get_from(self.term)?;
        let total: f64 = readings.iter().sum();
        self.show(format!("{readings:?} (total {total})"))
    }

    fn menu(&mut self) -> Result<(), InputError> {
        self.heading("Simple menu")?;
        let picked = Menu::from_choices(COLORS)
            .with_title("Colors")
            .with_default_choice("red")
            .style(self.style.clone())
            .get_selection_from(self.term)?;
        self.show(picked.as_deref().unwrap_or("exit"))?;

        self.heading("Menu with actions")?;
        // callbacks outlive this borrow of the terminal, so they queue their output
        let called = Rc::new(RefCell::new(Vec::new()));
        let bar_called = Rc::clone(&called);
        let default_called = Rc::clone(&called);
        let menu = Menu::new(vec![
            MenuItem::new("Choice 1"),
            MenuItem::new("Choice 2")
                .with_tag("2")
                .with_action(MenuAction::Default),
            MenuItem::new("Do Foo")
                .with_tag("foo")
                .with_action(MenuAction::Default),
            MenuItem::new("Do Bar")
                .with_tag("bar")
                .with_action(MenuAction::callback(move |tag| {
                    bar_called
                        .borrow_mut()
                        .push(format!("called bar action, tag={tag}"));
                    true
                })),
            MenuItem::new("STOP the menu!")
                .with_tag("stop")
                .with_action(MenuAction::Exit),
        ])
        .with_title("My Menu")
        .with_prompt("Choose or die!")
        .with_default_action(move |tag| {
            default_called
                .borrow_mut()
                .push(format!("called default action, tag={tag}"));
            true
        })
        .add_exit(false)
        .style(self.style.clone());

        loop {
            let tag = menu.get_menu_choice_from(self.term)?;
            let keep_going = menu.do_action(&tag);
            for line in called.borrow_mut().drain(..) {
                self.term.write_line(&line)?;
            }
            if !keep_going {
                break;
            }
        }
        self.show("done")
    }

    fn table(&mut self) -> Result<(), InputError> {
        self.heading("Table")?;
        let table = Table::new(vec![
            TableRow::new("r", "red"),
            TableRow::new("g", "green"),
            TableRow::new("b", "blue"),
        ])
        .with_title("Colors");

        let row = TableInput::new(table)
            .field(TableField::IdOrValue)
            .prompt("Pick a color by id or name")
            .style(self.style.clone())
            .get_from(self.term)?;
        self.show(format!("{} ({})", row.value, row.id))
    }
}
