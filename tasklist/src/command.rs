//! Line commands for the interactive shell.
//!
//! Each command stands for one gesture on the to-do screen: typing and
//! pressing Add/Save, pressing a per-row button, picking a due date, or
//! pressing a filter / Clear Completed button. Rows are addressed by the
//! 1-based number printed next to them.

use crate::types::Filter;
use chrono::NaiveDateTime;
use thiserror::Error;

/// `datetime-local` formats accepted by `due`
const DUE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Errors produced while parsing a command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a known command
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    /// A required argument is missing
    #[error("`{command}` needs {what}")]
    MissingArgument {
        /// Command being parsed
        command: &'static str,
        /// Human description of the missing argument
        what: &'static str,
    },

    /// A row number is not a positive integer
    #[error("`{0}` is not a row number")]
    InvalidRow(String),

    /// The due date does not match `YYYY-MM-DDTHH:MM`
    #[error("`{0}` is not a date like 2025-01-31T17:00 (use `-` to clear)")]
    InvalidDueDate(String),

    /// The filter name is not one of all/pending/completed
    #[error("`{0}` is not a filter (all, pending, completed)")]
    InvalidFilter(String),
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type text and press Add
    Add(String),
    /// Press Edit on a row
    Edit(usize),
    /// Press Save, optionally replacing the input first
    Save(Option<String>),
    /// Press Complete/Undo on a row
    Toggle(usize),
    /// Press Remove on a row
    Remove(usize),
    /// Change a row's due date; `None` clears it
    Due {
        /// Row number
        row: usize,
        /// Local wall-clock deadline
        at: Option<NaiveDateTime>,
    },
    /// Press a filter button
    Filter(Filter),
    /// Press Clear Completed
    ClearCompleted,
    /// Run the overdue sweep now
    Sweep,
    /// Print the current view as JSON
    Json,
    /// Print usage
    Help,
    /// Leave the shell
    Quit,
}

impl Command {
    /// Usage text printed by `help`
    pub const HELP: &'static str = "\
commands:
  add <text>              add an item
  edit <n>                load row n into the input for editing
  save [text]             save the edit (optionally with new text)
  toggle <n>              complete / undo row n
  rm <n>                  remove row n
  due <n> <when>          set due date, e.g. 2025-01-31T17:00 (`-` clears)
  filter <which>          all | pending | completed
  clear                   remove all completed items
  sweep                   flag past-due items as overdue
  json                    print the current view as JSON
  help                    show this text
  quit                    exit";

    /// Parses one input line
    ///
    /// Blank lines parse to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing what is wrong with the line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "add" | "a" => Self::Add(rest.to_string()),
            "edit" | "e" => Self::Edit(parse_row("edit", rest)?),
            "save" | "s" => Self::Save((!rest.is_empty()).then(|| rest.to_string())),
            "toggle" | "t" | "done" => Self::Toggle(parse_row("toggle", rest)?),
            "rm" | "remove" => Self::Remove(parse_row("rm", rest)?),
            "due" | "d" => parse_due(rest)?,
            "filter" | "f" => Self::Filter(parse_filter(rest)?),
            "clear" => Self::ClearCompleted,
            "sweep" => Self::Sweep,
            "json" => Self::Json,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_row(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            what: "a row number",
        });
    }
    match arg.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(CommandError::InvalidRow(arg.to_string())),
    }
}

fn parse_due(rest: &str) -> Result<Command, CommandError> {
    let mut args = rest.split_whitespace();
    let row = parse_row("due", args.next().unwrap_or_default())?;
    let Some(when) = args.next() else {
        return Err(CommandError::MissingArgument {
            command: "due",
            what: "a date or `-`",
        });
    };

    let at = if when == "-" {
        None
    } else {
        let parsed = DUE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(when, format).ok());
        Some(parsed.ok_or_else(|| CommandError::InvalidDueDate(when.to_string()))?)
    };

    Ok(Command::Due { row, at })
}

fn parse_filter(arg: &str) -> Result<Filter, CommandError> {
    match arg.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::MissingArgument {
            command: "filter",
            what: "all, pending or completed",
        }),
        "all" => Ok(Filter::All),
        "pending" => Ok(Filter::Pending),
        "completed" | "done" => Ok(Filter::Completed),
        _ => Err(CommandError::InvalidFilter(arg.to_string())),
    }
}
