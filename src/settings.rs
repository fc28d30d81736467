use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use std::path::PathBuf;

use crate::game::quiz::settings::Settings as QuizSettings;
use crate::storage::FileStore;

const VAR_BANK: &str = "QUIZ_BANK";
const VAR_DATA_DIR: &str = "QUIZ_DATA_DIR";
const VAR_PAGE_SIZE: &str = "QUIZ_PAGE_SIZE";
const VAR_PROGRESS_TTL_DAYS: &str = "QUIZ_PROGRESS_TTL_DAYS";
const VAR_EPHEMERAL: &str = "QUIZ_EPHEMERAL";
const VAR_DOCUMENTS: &str = "QUIZ_DOCUMENTS";
const VAR_DOCUMENTS_ROOT: &str = "QUIZ_DOCUMENTS_ROOT";

#[derive(Clone, Debug)]
pub struct Settings {
    pub bank_path: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub ephemeral: bool,
    pub documents_path: Option<PathBuf>,
    pub documents_root: PathBuf,
    pub quiz: QuizSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bank_path: PathBuf::from("questions.json"),
            data_dir: None,
            ephemeral: false,
            documents_path: None,
            documents_root: PathBuf::from("."),
            quiz: QuizSettings::default(),
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_ref() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(anyhow!("{} must be true or false, got `{}`", name, other)),
    }
}

impl Settings {
    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = lookup(VAR_BANK) {
            settings.bank_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(VAR_DATA_DIR) {
            settings.data_dir = Some(PathBuf::from(path));
        }
        if let Some(value) = lookup(VAR_PAGE_SIZE) {
            let page_size: usize = value
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number", VAR_PAGE_SIZE))?;
            if page_size == 0 {
                return Err(anyhow!("{} must be at least 1", VAR_PAGE_SIZE));
            }
            settings.quiz.questions_per_page = page_size;
        }
        if let Some(value) = lookup(VAR_PROGRESS_TTL_DAYS) {
            let days: i64 = value
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number", VAR_PROGRESS_TTL_DAYS))?;
            if days < 0 {
                return Err(anyhow!("{} cannot be negative", VAR_PROGRESS_TTL_DAYS));
            }
            settings.quiz.progress_ttl = Duration::days(days);
        }
        if let Some(value) = lookup(VAR_EPHEMERAL) {
            settings.ephemeral = parse_bool(VAR_EPHEMERAL, &value)?;
        }
        if let Some(path) = lookup(VAR_DOCUMENTS) {
            settings.documents_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(VAR_DOCUMENTS_ROOT) {
            settings.documents_root = PathBuf::from(path);
        }

        Ok(settings)
    }

    pub fn from_env() -> Result<Settings> {
        if let Err(e) = dotenv::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStore::default_directory(),
        }
    }
}
