use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};

use self::definition::*;
use self::progress::SavedProgress;
use self::results::{ExportedResults, ResultsSummary};
use self::settings::Settings;
use self::shuffle::{shuffle_module, ShuffledQuestion};

pub mod definition;
pub mod progress;
pub mod results;
pub mod settings;
pub mod shuffle;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RestoreOutcome {
    NoProgress,
    Restored,
    Expired,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnswerResult {
    pub question_index: usize,
    pub chosen_option: AnswerLabel,
    pub correct_option: AnswerLabel,
    pub is_correct: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayedRange {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

#[derive(Debug)]
pub struct Session {
    module: String,
    questions: Vec<ShuffledQuestion>,
    settings: Settings,
    current_page: usize,
    answered_questions: BTreeSet<usize>,
    user_answers: BTreeMap<usize, usize>,
    score: u32,
    correct_answers_count: u32,
}

impl Session {
    pub fn new(module: &str, questions: &[Question], settings: Settings) -> Session {
        Session {
            module: module.to_owned(),
            questions: shuffle_module(module, questions),
            settings,
            current_page: 1,
            answered_questions: BTreeSet::new(),
            user_answers: BTreeMap::new(),
            score: 0,
            correct_answers_count: 0,
        }
    }

    pub fn start(
        module: &str,
        questions: &[Question],
        saved: Option<SavedProgress>,
        now: DateTime<Utc>,
        settings: Settings,
    ) -> (Session, RestoreOutcome) {
        let mut session = Session::new(module, questions, settings);
        let outcome = match saved {
            Some(saved) => session.restore(saved, now),
            None => RestoreOutcome::NoProgress,
        };
        info!(
            "Starting quiz for {} ({} questions, {:?})",
            module,
            session.questions.len(),
            outcome
        );
        (session, outcome)
    }

    /// Applies stored progress unless it is older than the TTL. Entries that
    /// do not fit this module are dropped and the score is recounted.
    pub fn restore(&mut self, saved: SavedProgress, now: DateTime<Utc>) -> RestoreOutcome {
        if saved.is_expired(now, self.settings.progress_ttl) {
            return RestoreOutcome::Expired;
        }

        let total = self.questions.len();
        self.answered_questions = saved
            .answered_questions
            .into_iter()
            .filter(|index| *index < total)
            .collect();
        let answered = &self.answered_questions;
        self.user_answers = saved
            .user_answers
            .into_iter()
            .filter(|(index, option)| answered.contains(index) && *option < ANSWER_COUNT)
            .collect();

        let correct = self
            .user_answers
            .iter()
            .filter(|(index, option)| self.questions[**index].is_option_correct(**option))
            .count() as u32;
        if correct != saved.correct_answers_count || correct != saved.score {
            debug!(
                "Recounted score for {}: stored {}/{}, actual {}",
                self.module, saved.score, saved.correct_answers_count, correct
            );
        }
        self.score = correct;
        self.correct_answers_count = correct;
        self.current_page = saved.current_page.max(1).min(self.page_count());

        RestoreOutcome::Restored
    }

    pub fn answer(&mut self, question_index: usize, option_index: usize) -> Result<AnswerResult> {
        let question = self
            .questions
            .get(question_index)
            .ok_or_else(|| anyhow!("There is no question number {}", question_index + 1))?;
        let chosen_option = AnswerLabel::from_index(option_index)
            .ok_or_else(|| anyhow!("There is no option number {}", option_index + 1))?;

        if self.answered_questions.contains(&question_index) {
            return Err(anyhow!(
                "Question {} was already answered",
                question_index + 1
            ));
        }

        let is_correct = question.is_option_correct(option_index);
        let correct_option = question.correct_option();
        if is_correct {
            self.score += 1;
            self.correct_answers_count += 1;
        }
        self.answered_questions.insert(question_index);
        self.user_answers.insert(question_index, option_index);

        Ok(AnswerResult {
            question_index,
            chosen_option,
            correct_option,
            is_correct,
        })
    }

    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.page_count() {
            self.current_page += 1;
            debug!("Moved to page {} of {}", self.current_page, self.module);
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            debug!("Moved to page {} of {}", self.current_page, self.module);
            true
        } else {
            false
        }
    }

    /// Back to the first page. Answers and score are kept.
    pub fn restart(&mut self) {
        self.current_page = 1;
    }

    pub fn page_count(&self) -> usize {
        let per_page = self.settings.questions_per_page.max(1);
        let pages = (self.questions.len() + per_page - 1) / per_page;
        pages.max(1)
    }

    pub fn page_questions(&self) -> impl Iterator<Item = (usize, &ShuffledQuestion)> {
        let per_page = self.settings.questions_per_page.max(1);
        self.questions
            .iter()
            .enumerate()
            .skip((self.current_page - 1) * per_page)
            .take(per_page)
    }

    pub fn displayed_range(&self) -> DisplayedRange {
        let per_page = self.settings.questions_per_page.max(1);
        let total = self.questions.len();
        if total == 0 {
            return DisplayedRange {
                first: 0,
                last: 0,
                total,
            };
        }
        DisplayedRange {
            first: (self.current_page - 1) * per_page + 1,
            last: (self.current_page * per_page).min(total),
            total,
        }
    }

    pub fn progress_percent(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.answered_questions.len() as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn summary(&self) -> ResultsSummary {
        ResultsSummary::new(
            self.questions.len(),
            self.answered_questions.len(),
            self.correct_answers_count,
        )
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportedResults {
        let summary = self.summary();
        ExportedResults {
            module: self.module.clone(),
            timestamp: now,
            score: self.score,
            total_questions: summary.total,
            answered_questions: summary.answered,
            correct_answers: summary.correct,
            accuracy_rate: summary.accuracy,
        }
    }

    pub fn to_saved(&self, now: DateTime<Utc>) -> SavedProgress {
        SavedProgress {
            score: self.score,
            answered_questions: self.answered_questions.clone(),
            user_answers: self.user_answers.clone(),
            current_page: self.current_page,
            correct_answers_count: self.correct_answers_count,
            last_accessed: now,
        }
    }

    pub fn get_module(&self) -> &str {
        &self.module
    }

    pub fn get_questions(&self) -> &[ShuffledQuestion] {
        &self.questions
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn chosen_option(&self, question_index: usize) -> Option<usize> {
        self.user_answers.get(&question_index).copied()
    }

    pub fn is_answered(&self, question_index: usize) -> bool {
        self.answered_questions.contains(&question_index)
    }
}
