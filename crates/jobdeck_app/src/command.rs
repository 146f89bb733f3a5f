//! Parsing of interactive commands.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Load the next page of the job list.
    More,
    /// Reload the job list from page 1.
    Refresh,
    /// Show the job list.
    Jobs,
    /// Show bookmarked jobs.
    Saved,
    /// Show details of item N (1-based) on the current screen.
    Open(usize),
    /// Toggle the bookmark of item N on the current screen.
    Mark(usize),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an item number")]
    MissingIndex(&'static str),
    #[error("`{0}` is not an item number")]
    BadIndex(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(CommandError::Empty);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "more" | "m" => Command::More,
        "refresh" | "r" => Command::Refresh,
        "jobs" | "j" => Command::Jobs,
        "saved" | "s" | "bookmarks" => Command::Saved,
        "open" | "o" => Command::Open(parse_index(words.next(), "open")?),
        "mark" | "b" => Command::Mark(parse_index(words.next(), "mark")?),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_index(word: Option<&str>, verb: &'static str) -> Result<usize, CommandError> {
    let word = word.ok_or(CommandError::MissingIndex(verb))?;
    match word.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(CommandError::BadIndex(word.to_string())),
    }
}
