use std::str::FromStr;

use lazy_static::lazy_static;
use linecore::{Document, DocumentError, InsertAt};
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref INSERT: Regex = Regex::new(r#"^insert(?: (\d+))?(?: (\d+))? "(.+)"$"#)
        .expect("Invalid INSERT regex pattern");
    static ref DELETE: Regex = Regex::new(r"^delete (\d+)$").expect("Invalid DELETE regex pattern");
    static ref SWAP: Regex = Regex::new(r"^swap (\d+) (\d+)$").expect("Invalid SWAP regex pattern");
}

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert { text: String, at: InsertAt },
    Delete(usize),
    Swap(usize, usize),
    Undo,
    Clear,
    Save,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command.")]
    Empty,

    #[error("Unknown command.")]
    Unknown,

    #[error("{0} is not a valid number.")]
    InvalidNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let cmd = input.trim();
        if cmd.is_empty() {
            return Err(CommandError::Empty);
        }

        match cmd {
            "undo" => return Ok(Self::Undo),
            "clear" => return Ok(Self::Clear),
            "save" => return Ok(Self::Save),
            "close" => return Ok(Self::Close),
            _ => {}
        }

        if let Some(caps) = INSERT.captures(cmd) {
            let text = caps[3].to_string();
            let line = caps.get(1).map(|m| parse_number(m.as_str())).transpose()?;
            let column = caps.get(2).map(|m| parse_number(m.as_str())).transpose()?;
            let at = match (line, column) {
                (Some(line), Some(column)) => InsertAt::Column { line, column },
                (Some(line), None) => InsertAt::LineEnd(line),
                _ => InsertAt::End,
            };
            return Ok(Self::Insert { text, at });
        }

        if let Some(caps) = DELETE.captures(cmd) {
            return Ok(Self::Delete(parse_number(&caps[1])?));
        }

        if let Some(caps) = SWAP.captures(cmd) {
            return Ok(Self::Swap(parse_number(&caps[1])?, parse_number(&caps[2])?));
        }

        Err(CommandError::Unknown)
    }
}

fn parse_number(digits: &str) -> Result<usize, CommandError> {
    digits
        .parse()
        .map_err(|_| CommandError::InvalidNumber(digits.to_string()))
}

/// What the shell should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(Option<String>),
    Quit,
}

pub struct CommandProcessor;

impl CommandProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(
        &self,
        command: &Command,
        document: &mut Document,
    ) -> Result<Outcome, DocumentError> {
        log::debug!("Executing {:?}", command);

        match command {
            Command::Insert { text, at } => document.insert(text, *at)?,
            Command::Delete(line) => document.delete(*line)?,
            Command::Swap(line1, line2) => document.swap(*line1, *line2)?,
            Command::Undo => document.undo(),
            Command::Clear => document.clear(),
            Command::Save => {
                document.save()?;
                return Ok(Outcome::Continue(Some(format!(
                    "{} lines written to {}",
                    document.line_count(),
                    document.path().display()
                ))));
            }
            Command::Close => {
                // UnsavedChanges is left for the caller to confirm
                document.close_check()?;
                return Ok(Outcome::Quit);
            }
        }

        Ok(Outcome::Continue(None))
    }
}

impl Default for CommandProcessor {
    fn default() -> Self {
        Self::new()
    }
}
