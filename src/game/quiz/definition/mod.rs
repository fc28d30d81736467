use anyhow::{Context, Result};
use log::{info, warn};
use std::convert::TryFrom;
use std::fs::File;
use std::path::Path;

pub mod question;

pub use question::{AnswerLabel, Question, RawCsvQuestion, RawQuestion, ANSWER_COUNT};


const EXPECTED_MODULES: [&str; 2] = ["module1", "module2"];

#[derive(Clone, Debug, Default)]
pub struct QuestionBank {
    modules: Vec<(String, Vec<Question>)>,
}

impl QuestionBank {
    pub fn open(source: &Path) -> Result<QuestionBank> {
        let is_csv = source
            .extension()
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let bank = if is_csv {
            let file = File::open(source)
                .with_context(|| format!("Could not open question bank {:?}", source))?;
            Self::from_csv_reader(file)?
        } else {
            let content = std::fs::read_to_string(source)
                .with_context(|| format!("Could not read question bank {:?}", source))?;
            Self::from_json_str(&content)?
        };

        info!(
            "Question bank loaded from {:?}: {} modules found",
            source,
            bank.modules.len()
        );
        bank.warn_about_missing_modules();
        Ok(bank)
    }

    pub fn from_json_str(content: &str) -> Result<QuestionBank> {
        let raw_modules: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(content).context("Question bank is not a JSON object")?;

        let mut modules = Vec::with_capacity(raw_modules.len());
        for (name, value) in raw_modules {
            let raw_questions: Vec<RawQuestion> = serde_json::from_value(value)
                .with_context(|| format!("Invalid questions in module {}", name))?;
            let questions = raw_questions
                .into_iter()
                .map(Question::try_from)
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Invalid questions in module {}", name))?;
            modules.push((name, questions));
        }

        Ok(QuestionBank { modules })
    }

    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<QuestionBank> {
        let mut bank = QuestionBank::default();
        let mut csv_reader = csv::Reader::from_reader(reader);
        for row in csv_reader.deserialize() {
            let row: RawCsvQuestion = row.context("Invalid question bank row")?;
            let module = row.module.clone();
            let question = Question::try_from(RawQuestion::from(row))?;
            bank.push_question(module, question);
        }
        Ok(bank)
    }

    fn push_question(&mut self, module: String, question: Question) {
        match self.modules.iter_mut().find(|(name, _)| *name == module) {
            Some((_, questions)) => questions.push(question),
            None => self.modules.push((module, vec![question])),
        }
    }

    fn warn_about_missing_modules(&self) {
        for expected in EXPECTED_MODULES.iter() {
            if self.get_module(expected).is_none() {
                warn!("Expected module {} is missing from the question bank", expected);
            }
        }
    }

    pub fn get_module(&self, name: &str) -> Option<&[Question]> {
        self.modules
            .iter()
            .find(|(module, _)| module == name)
            .map(|(_, questions)| questions.as_slice())
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
