use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::storage::sanitize_key;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResultsSummary {
    pub total: usize,
    pub answered: usize,
    pub correct: u32,
    pub accuracy: u32,
}

impl ResultsSummary {
    pub fn new(total: usize, answered: usize, correct: u32) -> Self {
        let accuracy = if answered > 0 {
            (correct as f64 / answered as f64 * 100.0).round() as u32
        } else {
            0
        };
        ResultsSummary {
            total,
            answered,
            correct,
            accuracy,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedResults {
    pub module: String,
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub correct_answers: u32,
    pub accuracy_rate: u32,
}

impl ExportedResults {
    pub fn file_name(&self) -> String {
        format!(
            "quiz_results_{}_{}.json",
            sanitize_key(&self.module),
            self.timestamp.format("%Y-%m-%d")
        )
    }

    pub fn write_to(&self, directory: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(directory)
            .with_context(|| format!("Could not create export directory {:?}", directory))?;
        let path = directory.join(self.file_name());
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Could not write results to {:?}", path))?;
        Ok(path)
    }
}
