use itertools::Itertools;

use crate::game::view::{OptionState, PageView};
use crate::output::{Level, Message, Output};

#[derive(Clone, Debug, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn new() -> Self {
        ConsoleOutput
    }

    fn interpret_page(page: &PageView) -> String {
        let mut content = format!(
            "📘 {} | page {}/{} | questions {}-{} of {} | score {} | {}% done",
            page.module_title,
            page.page,
            page.page_count,
            page.range.first,
            page.range.last,
            page.range.total,
            page.score,
            page.progress
        );
        for question in &page.questions {
            content += &format!("\n\n{}. [{}] {}", question.number, question.id, question.text);
            for option in &question.options {
                let marker = match option.state {
                    OptionState::Open | OptionState::Unselected => "  ",
                    OptionState::Correct => "✅",
                    OptionState::Incorrect => "❌",
                };
                content += &format!("\n   {} {}. {}", marker, option.label, option.text);
            }
        }
        content
    }

    pub fn interpret_message(message: &Message) -> String {
        use Message::*;
        match message {
            AlreadyOnFirstPage => "You are already on the first page.".into(),
            AlreadyOnLastPage => "You are already on the last page.".into(),
            AnswerCorrect(number) => format!("Question {}: correct!", number),
            AnswerIncorrect(number, correct) => {
                format!("Question {}: incorrect, the answer was {}.", number, correct)
            }
            BackToModules => "Back to module selection. Use `modules` to list them.".into(),
            CommandFailed(reason) => reason.clone(),
            DocumentCatalog(categories) => {
                let mut content = "📂 Practice documents:".to_owned();
                for (category, documents) in categories {
                    content += &format!("\n{}", category);
                    if documents.is_empty() {
                        content += "\n  (no documents in this category)";
                    }
                    for (id, title) in documents {
                        content += &format!("\n  {:<14} {}", id, title);
                    }
                }
                content
            }
            DocumentLoadFailed(title) => {
                format!("Could not load {}. Use `retry` to try again.", title)
            }
            DocumentNotFound(id) => format!("No document with id `{}`.", id),
            DocumentDownloaded(path) => format!("Document saved to {}.", path.display()),
            DocumentOpened(title, pages, link) => {
                format!("Opened {} ({} pages). Link: {}", title, pages, link)
            }
            DocumentPage(page, pages, zoom) => format!("Page {}/{} at {}%", page, pages, zoom),
            Help => "Commands:\n  modules | start <module> | answer <n> <A-D> | next | prev | page\n  restart | reset | results | export [dir] | back\n  docs | open <doc-id or ?doc=id> | doc next | doc prev | zoom in | zoom out | retry | download [dir]\n  help | quit".into(),
            ModuleOverview(modules) => {
                if modules.is_empty() {
                    return "No modules available.".into();
                }
                let lines = modules
                    .iter()
                    .map(|m| {
                        let completion = m
                            .completion
                            .map(|c| format!(" | {}% complete", c))
                            .unwrap_or_default();
                        format!("  {} ({} questions){}", m.name, m.question_count, completion)
                    })
                    .join("\n");
                format!("📚 Modules:\n{}", lines)
            }
            ModuleUnavailable(module) => format!("Module {} does not exist or has no questions yet.", module),
            Page(page) => Self::interpret_page(page),
            ProgressExpired(module) => format!("Saved progress for {} was older than a week and has been cleared.", module),
            ProgressNotSaved => "Could not save your progress. Free some disk space and try again.".into(),
            ProgressReset(module) => format!("Progress for {} was reset.", module),
            ProgressRestored(module) => format!("Welcome back! Progress for {} was restored.", module),
            QuestionBankLoaded(count) => format!("Question bank loaded: {} modules.", count),
            QuizStarted(module, count) => format!("Starting {} with {} questions.", module, count),
            ResultsExported(path) => format!("Results exported to {}.", path.display()),
            ResultsSummary(summary) => format!(
                "📈 Results: {} questions | {} answered | {} correct | {}% accuracy",
                summary.total, summary.answered, summary.correct, summary.accuracy
            ),
            UnknownCommand(command) => format!("Unknown command `{}`. Type `help` for the list of commands.", command),
        }
    }
}

impl Output for ConsoleOutput {
    fn say(&self, message: &Message) {
        let content = Self::interpret_message(message);
        match message.level() {
            Level::Info | Level::Success => println!("{}", content),
            Level::Warning => println!("⚠️ {}", content),
            Level::Error => eprintln!("⛔ {}", content),
        }
    }
}
