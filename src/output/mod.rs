use std::path::PathBuf;

use crate::game::quiz::definition::AnswerLabel;
use crate::game::quiz::results::ResultsSummary;
use crate::game::view::{ModuleStatus, PageView};

pub mod console;
#[cfg(test)]
pub mod mock;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    AlreadyOnFirstPage,
    AlreadyOnLastPage,
    AnswerCorrect(usize),
    AnswerIncorrect(usize, AnswerLabel),
    BackToModules,
    CommandFailed(String),
    DocumentCatalog(Vec<(String, Vec<(String, String)>)>),
    DocumentDownloaded(PathBuf),
    DocumentLoadFailed(String),
    DocumentNotFound(String),
    DocumentOpened(String, usize, String),
    DocumentPage(usize, usize, u32),
    Help,
    ModuleOverview(Vec<ModuleStatus>),
    ModuleUnavailable(String),
    Page(PageView),
    ProgressExpired(String),
    ProgressNotSaved,
    ProgressReset(String),
    ProgressRestored(String),
    QuestionBankLoaded(usize),
    QuizStarted(String, usize),
    ResultsExported(PathBuf),
    ResultsSummary(ResultsSummary),
    UnknownCommand(String),
}

impl Message {
    pub fn level(&self) -> Level {
        use Message::*;
        match self {
            AnswerCorrect(_) | DocumentOpened(_, _, _) | DocumentDownloaded(_) | QuestionBankLoaded(_)
            | ResultsExported(_) | ProgressRestored(_) => Level::Success,
            AlreadyOnFirstPage | AlreadyOnLastPage | ProgressExpired(_) | UnknownCommand(_)
            | ModuleUnavailable(_) | DocumentNotFound(_) => Level::Warning,
            CommandFailed(_) | DocumentLoadFailed(_) | ProgressNotSaved => Level::Error,
            _ => Level::Info,
        }
    }
}

pub trait Output {
    fn say(&self, message: &Message);
}
