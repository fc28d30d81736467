use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use crate::game::quiz::definition::AnswerLabel;


#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Help,
    Modules,
    Start(String),
    Answer(usize, AnswerLabel),
    NextPage,
    PreviousPage,
    ShowPage,
    Restart,
    Reset,
    Results,
    Export(PathBuf),
    Back,
    Documents,
    Open(String),
    Download(PathBuf),
    DocumentNextPage,
    DocumentPreviousPage,
    ZoomIn,
    ZoomOut,
    Retry,
    Quit,
    Unknown(String),
}

fn require_argument<'a>(argument: &'a str, usage: &str) -> Result<&'a str> {
    if argument.is_empty() {
        return Err(anyhow!("Usage: {}", usage));
    }
    Ok(argument)
}

/// Parses one input line. Keyboard-style shortcuts (`right`, `left`, `esc`,
/// `ctrl+r`, `ctrl+s`) are accepted as aliases.
pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    let line = line.strip_prefix('!').unwrap_or(line);
    let mut parts = line.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_lowercase();
    let rest = parts.next().unwrap_or_default().trim();

    let command = match name.as_str() {
        "help" | "?" => Command::Help,
        "modules" | "list" => Command::Modules,
        "start" | "module" => Command::Start(require_argument(rest, "start <module>")?.to_owned()),
        "answer" | "a" => parse_answer(rest)?,
        "next" | "n" | "right" => Command::NextPage,
        "prev" | "p" | "left" => Command::PreviousPage,
        "page" => Command::ShowPage,
        "restart" | "ctrl+r" => Command::Restart,
        "reset" => Command::Reset,
        "results" | "ctrl+s" => Command::Results,
        "export" => Command::Export(if rest.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(rest)
        }),
        "back" | "esc" => Command::Back,
        "docs" | "documents" => Command::Documents,
        "open" => Command::Open(require_argument(rest, "open <doc-id>")?.to_owned()),
        "download" => Command::Download(if rest.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(rest)
        }),
        "doc" => match rest.to_lowercase().as_str() {
            "next" => Command::DocumentNextPage,
            "prev" => Command::DocumentPreviousPage,
            _ => return Err(anyhow!("Usage: doc next | doc prev")),
        },
        "zoom" => match rest.to_lowercase().as_str() {
            "in" | "+" => Command::ZoomIn,
            "out" | "-" => Command::ZoomOut,
            _ => return Err(anyhow!("Usage: zoom in | zoom out")),
        },
        "retry" => Command::Retry,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_owned()),
    };
    Ok(command)
}

fn parse_answer(rest: &str) -> Result<Command> {
    let usage = "answer <question number> <A-D>";
    let mut arguments = rest.split_whitespace();
    let number = arguments
        .next()
        .ok_or_else(|| anyhow!("Usage: {}", usage))?;
    let number: usize = number
        .parse()
        .with_context(|| format!("`{}` is not a question number", number))?;
    let label = arguments
        .next()
        .ok_or_else(|| anyhow!("Usage: {}", usage))?
        .parse()?;
    Ok(Command::Answer(number, label))
}
