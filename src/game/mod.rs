use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use log::{error, info, warn};
use std::path::Path;

pub mod quiz;
pub mod view;

use crate::commands::Command;
use crate::documents::viewer::{DocumentLoader, Viewer};
use crate::documents::{doc_from_query, with_doc_param, Catalog, Document};
use crate::game::quiz::definition::{AnswerLabel, QuestionBank};
use crate::game::quiz::progress::SavedProgress;
use crate::game::quiz::settings::Settings;
use crate::game::quiz::{RestoreOutcome, Session};
use crate::game::view::{ModuleStatus, PageView};
use crate::output::{Message, Output};
use crate::storage::{progress_key, ProgressStore};


const ERROR_NO_ACTIVE_QUIZ: &str = "Choose a module with `start <module>` first.";
const ERROR_NO_OPEN_DOCUMENT: &str = "Open a document with `open <doc-id>` first.";

#[derive(Debug)]
enum Phase {
    ModuleSelection,
    Quiz(Session),
}

pub struct Game<O, L> {
    current_phase: Phase,
    bank: QuestionBank,
    settings: Settings,
    store: Box<dyn ProgressStore>,
    catalog: Catalog,
    selected_document: Option<Document>,
    viewer: Viewer<L>,
    output: O,
}

impl<O: Output, L: DocumentLoader> Game<O, L> {
    pub fn new(
        bank: QuestionBank,
        settings: Settings,
        store: Box<dyn ProgressStore>,
        catalog: Catalog,
        loader: L,
        output: O,
    ) -> Self {
        Game {
            current_phase: Phase::ModuleSelection,
            bank,
            settings,
            store,
            catalog,
            selected_document: None,
            viewer: Viewer::new(loader),
            output,
        }
    }

    /// Runs one command. Failures are reported to the user, never returned.
    pub fn execute(&mut self, command: &Command) {
        if let Err(e) = self.try_execute(command) {
            error!("{:#}", e);
            self.output.say(&Message::CommandFailed(format!("{}", e)));
        }
    }

    fn try_execute(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Help => self.output.say(&Message::Help),
            Command::Modules => self.list_modules(),
            Command::Start(module) => self.start(module)?,
            Command::Answer(number, label) => self.answer(*number, *label)?,
            Command::NextPage => self.next_page()?,
            Command::PreviousPage => self.previous_page()?,
            Command::ShowPage => self.show_page()?,
            Command::Restart => self.restart()?,
            Command::Reset => self.reset()?,
            Command::Results => self.show_results()?,
            Command::Export(directory) => self.export(directory)?,
            Command::Back => self.back(),
            Command::Documents => self.list_documents(),
            Command::Open(target) => self.open_document(target)?,
            Command::Download(directory) => self.download_document(directory)?,
            Command::DocumentNextPage => self.document_page(|v| v.next_page())?,
            Command::DocumentPreviousPage => self.document_page(|v| v.previous_page())?,
            Command::ZoomIn => self.document_page(|v| v.zoom_in())?,
            Command::ZoomOut => self.document_page(|v| v.zoom_out())?,
            Command::Retry => self.retry_document(),
            Command::Quit => (),
            Command::Unknown(input) => self.output.say(&Message::UnknownCommand(input.clone())),
        };
        Ok(())
    }

    fn get_session(&self) -> Result<&Session> {
        match &self.current_phase {
            Phase::Quiz(session) => Ok(session),
            Phase::ModuleSelection => Err(anyhow!(ERROR_NO_ACTIVE_QUIZ)),
        }
    }

    fn get_session_mut(&mut self) -> Result<&mut Session> {
        match &mut self.current_phase {
            Phase::Quiz(session) => Ok(session),
            Phase::ModuleSelection => Err(anyhow!(ERROR_NO_ACTIVE_QUIZ)),
        }
    }

    fn read_saved_progress(&self, module: &str) -> Option<SavedProgress> {
        let content = match self.store.load(&progress_key(module)) {
            Ok(content) => content?,
            Err(e) => {
                warn!("Could not read saved progress for {}: {:#}", module, e);
                return None;
            }
        };
        match SavedProgress::from_json(&content) {
            Ok(saved) => Some(saved),
            Err(e) => {
                warn!("Ignoring malformed saved progress for {}: {}", module, e);
                None
            }
        }
    }

    fn save_progress(&self) {
        let session = match &self.current_phase {
            Phase::Quiz(session) => session,
            Phase::ModuleSelection => return,
        };
        let key = progress_key(session.get_module());
        let result = session
            .to_saved(Utc::now())
            .to_json()
            .context("Could not serialize progress")
            .and_then(|content| self.store.save(&key, &content));
        match result {
            Ok(()) => log::debug!("Progress saved under {}", key),
            Err(e) => {
                error!("Error saving progress: {:#}", e);
                self.output.say(&Message::ProgressNotSaved);
            }
        }
    }

    fn say_page(&self) -> Result<()> {
        let page = PageView::from_session(self.get_session()?);
        self.output.say(&Message::Page(page));
        Ok(())
    }

    pub fn list_modules(&self) {
        let modules = self
            .bank
            .module_names()
            .map(|name| {
                let question_count = self.bank.get_module(name).map(|q| q.len()).unwrap_or(0);
                let completion = self
                    .read_saved_progress(name)
                    .filter(|_| question_count > 0)
                    .map(|saved| {
                        let answered = saved.answered_questions.len().min(question_count);
                        (answered as f64 / question_count as f64 * 100.0).round() as u32
                    });
                ModuleStatus {
                    name: name.to_owned(),
                    question_count,
                    completion,
                }
            })
            .collect();
        self.output.say(&Message::ModuleOverview(modules));
    }

    pub fn start(&mut self, module: &str) -> Result<()> {
        let questions = match self.bank.get_module(module) {
            Some(questions) if !questions.is_empty() => questions,
            _ => {
                self.output.say(&Message::ModuleUnavailable(module.to_owned()));
                return Ok(());
            }
        };

        let saved = self.read_saved_progress(module);
        let (session, outcome) =
            Session::start(module, questions, saved, Utc::now(), self.settings.clone());
        let total = session.get_questions().len();

        match outcome {
            RestoreOutcome::Expired => {
                info!("Saved progress for {} expired", module);
                if let Err(e) = self.store.remove(&progress_key(module)) {
                    error!("Could not clear expired progress for {}: {:#}", module, e);
                    self.output.say(&Message::ProgressNotSaved);
                }
                self.output.say(&Message::ProgressExpired(module.to_owned()));
            }
            RestoreOutcome::Restored => {
                self.output.say(&Message::ProgressRestored(module.to_owned()));
            }
            RestoreOutcome::NoProgress => (),
        }

        self.current_phase = Phase::Quiz(session);
        self.output.say(&Message::QuizStarted(module.to_owned(), total));
        self.say_page()
    }

    /// `number` is the 1-based question number shown to the user.
    pub fn answer(&mut self, number: usize, label: AnswerLabel) -> Result<()> {
        let question_index = number
            .checked_sub(1)
            .ok_or_else(|| anyhow!("Question numbers start at 1"))?;
        let result = self.get_session_mut()?.answer(question_index, label.index())?;

        if result.is_correct {
            self.output.say(&Message::AnswerCorrect(number));
        } else {
            self.output
                .say(&Message::AnswerIncorrect(number, result.correct_option));
        }
        self.save_progress();
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<()> {
        if self.get_session_mut()?.next_page() {
            self.say_page()?;
            self.save_progress();
        } else {
            self.output.say(&Message::AlreadyOnLastPage);
        }
        Ok(())
    }

    pub fn previous_page(&mut self) -> Result<()> {
        if self.get_session_mut()?.previous_page() {
            self.say_page()?;
            self.save_progress();
        } else {
            self.output.say(&Message::AlreadyOnFirstPage);
        }
        Ok(())
    }

    pub fn show_page(&self) -> Result<()> {
        self.say_page()
    }

    pub fn restart(&mut self) -> Result<()> {
        self.get_session_mut()?.restart();
        self.say_page()
    }

    pub fn reset(&mut self) -> Result<()> {
        let module = self.get_session()?.get_module().to_owned();
        self.store
            .remove(&progress_key(&module))
            .with_context(|| format!("Could not reset progress for {}", module))?;
        info!("Progress for {} was reset", module);
        self.output.say(&Message::ProgressReset(module.clone()));
        self.start(&module)
    }

    pub fn show_results(&self) -> Result<()> {
        let summary = self.get_session()?.summary();
        self.output.say(&Message::ResultsSummary(summary));
        Ok(())
    }

    pub fn export(&self, directory: &Path) -> Result<()> {
        let results = self.get_session()?.export(Utc::now());
        let path = results
            .write_to(directory)
            .context("Could not export results")?;
        info!("Results for {} exported to {:?}", results.module, path);
        self.output.say(&Message::ResultsExported(path));
        Ok(())
    }

    pub fn back(&mut self) {
        self.current_phase = Phase::ModuleSelection;
        self.output.say(&Message::BackToModules);
    }

    pub fn list_documents(&self) {
        let categories = self
            .catalog
            .get_categories()
            .iter()
            .map(|(category, documents)| {
                let documents = documents
                    .iter()
                    .map(|d| (d.id.clone(), d.title.clone()))
                    .collect();
                (category.clone(), documents)
            })
            .collect();
        self.output.say(&Message::DocumentCatalog(categories));
    }

    /// Accepts a document id, or a URL/query string carrying `doc=<id>`.
    pub fn open_document(&mut self, target: &str) -> Result<()> {
        let id = if target.contains('=') {
            doc_from_query(target).ok_or_else(|| anyhow!("No `doc` parameter in {}", target))?
        } else {
            target.to_owned()
        };

        let document = match self.catalog.find(&id) {
            Some((_, document)) => document.clone(),
            None => {
                self.output.say(&Message::DocumentNotFound(id));
                return Ok(());
            }
        };

        let loaded = self
            .viewer
            .load(Path::new(&document.path), &document.title)
            .is_ok();
        self.selected_document = Some(document);
        self.say_load_outcome(loaded);
        Ok(())
    }

    fn say_load_outcome(&self, loaded: bool) {
        let document = match &self.selected_document {
            Some(document) => document,
            None => return,
        };
        match self.viewer.get_current() {
            Some(open) if loaded => {
                let link = with_doc_param("", &document.id);
                self.output.say(&Message::DocumentOpened(
                    open.title.clone(),
                    open.page_count,
                    link,
                ));
                self.say_document_page().ok();
            }
            _ => self
                .output
                .say(&Message::DocumentLoadFailed(document.title.clone())),
        }
    }

    fn say_document_page(&self) -> Result<()> {
        let document = self
            .viewer
            .get_current()
            .ok_or_else(|| anyhow!(ERROR_NO_OPEN_DOCUMENT))?;
        self.output.say(&Message::DocumentPage(
            self.viewer.page(),
            document.page_count,
            self.viewer.zoom_percent(),
        ));
        Ok(())
    }

    fn document_page<F: FnOnce(&mut Viewer<L>) -> bool>(&mut self, action: F) -> Result<()> {
        if self.viewer.get_current().is_none() {
            return Err(anyhow!(ERROR_NO_OPEN_DOCUMENT));
        }
        action(&mut self.viewer);
        self.say_document_page()
    }

    pub fn retry_document(&mut self) {
        if self.viewer.failed_title().is_none() {
            self.output.say(&Message::CommandFailed(
                "There is no failed document to retry.".into(),
            ));
            return;
        }
        let loaded = self.viewer.retry().is_ok();
        self.say_load_outcome(loaded);
    }

    pub fn download_document(&self, directory: &Path) -> Result<()> {
        let document = self
            .selected_document
            .as_ref()
            .filter(|_| self.viewer.get_current().is_some())
            .ok_or_else(|| anyhow!(ERROR_NO_OPEN_DOCUMENT))?;
        let path = self
            .viewer
            .download(directory, &document.download_file_name())?;
        info!("Saved {} to {:?}", document.title, path);
        self.output.say(&Message::DocumentDownloaded(path));
        Ok(())
    }

    pub fn get_output(&self) -> &O {
        &self.output
    }
}
