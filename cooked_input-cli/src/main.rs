//! CLI entrypoint for cooked-input

mod cli;
mod config;
mod demos;

use std::{
    io::{BufRead, Write},
    process::ExitCode,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use cooked_input::{
    InputStyle, Terminal,
    descriptor::{PromptDescriptor, Value},
    process_value,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, Command},
    config::{AppConfig, ConfigLoader},
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Command::Sources = cli.command {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = ConfigLoader::load(cli.config.as_deref())
        .context("failed to load configuration")?;
    info!(prompts = config.prompts.len(), "configuration loaded");

    match cli.command {
        Command::Demo { which } => {
            banner();
            demos::run(which, &mut Terminal::stdio(), &config.style)?;
        }
        Command::Ask { name, json } => {
            let descriptor = lookup(&config, &name)?;
            let answer = ask(descriptor, &config.style, &mut Terminal::stdio())?;
            println!("{}", format_answer(answer.as_ref(), json)?);
        }
        Command::Check { name, value } => {
            let descriptor = lookup(&config, &name)?;
            if !check(descriptor, &value)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Prompts => list_prompts(&config),
        Command::Sources => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn banner() {
    println!("{}", "-".repeat(60).dimmed());
    println!("{}", "  cooked-input: get, clean, convert and validate input".bold());
    println!("{}", format!("  version {}", env!("CARGO_PKG_VERSION")).dimmed());
    println!("{}", "-".repeat(60).dimmed());
}

fn lookup<'a>(config: &'a AppConfig, name: &str) -> Result<&'a PromptDescriptor> {
    match config.prompts.get(name) {
        Some(descriptor) => Ok(descriptor),
        None if config.prompts.is_empty() => {
            bail!("no prompt named \"{name}\": no prompts are configured")
        }
        None => {
            let known: Vec<&str> = config.prompts.keys().map(String::as_str).collect();
            bail!(
                "no prompt named \"{name}\" (configured prompts: {})",
                known.join(", ")
            )
        }
    }
}

fn ask<R: BufRead, W: Write>(
    descriptor: &PromptDescriptor,
    style: &InputStyle,
    term: &mut Terminal<R, W>,
) -> Result<Option<Value>> {
    let input = descriptor.input(style)?;
    let answer = if descriptor.optional {
        input.get_optional_from(term)?
    } else {
        Some(input.get_from(term)?)
    };
    debug!(answered = answer.is_some(), "prompt answered");
    Ok(answer)
}

fn format_answer(answer: Option<&Value>, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(&answer)?);
    }
    Ok(match answer {
        Some(value) => value.to_string(),
        None => String::new(),
    })
}

/// Whether `value` passes the prompt's pipeline.
fn check(descriptor: &PromptDescriptor, value: &str) -> Result<bool> {
    let pipeline = descriptor.pipeline()?;
    match process_value(value, &pipeline) {
        Ok(value) => {
            println!("{} {value}", "ok:".green().bold());
            Ok(true)
        }
        Err(e) if e.is_recoverable() => {
            println!("{} {e}", "rejected:".red().bold());
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn list_prompts(config: &AppConfig) {
    if config.prompts.is_empty() {
        println!("No prompts configured. Add a [prompts.<name>] table to a config file:");
        ConfigLoader::print_config_sources(None);
        return;
    }

    let width = config.prompts.keys().map(String::len).max().unwrap_or(0);
    for (name, descriptor) in &config.prompts {
        println!("{}  {}", format!("{name:<width$}").bold(), descriptor.prompt);
    }
}
