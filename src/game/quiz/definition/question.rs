use anyhow::{anyhow, Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

pub const ANSWER_COUNT: usize = 4;

lazy_static! {
    static ref ANSWER_PREFIX_REGEX: Regex = Regex::new(r"^\s*[A-Da-d][.)]\s*").unwrap();
}

fn strip_answer_prefix(answer: &str) -> &str {
    match ANSWER_PREFIX_REGEX.find(answer) {
        Some(prefix) => &answer[prefix.end()..],
        None => answer.trim_start(),
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AnswerLabel {
    A,
    B,
    C,
    D,
}

impl AnswerLabel {
    pub const ALL: [AnswerLabel; ANSWER_COUNT] =
        [AnswerLabel::A, AnswerLabel::B, AnswerLabel::C, AnswerLabel::D];

    pub fn from_index(index: usize) -> Option<AnswerLabel> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            AnswerLabel::A => 0,
            AnswerLabel::B => 1,
            AnswerLabel::C => 2,
            AnswerLabel::D => 3,
        }
    }
}

impl fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            AnswerLabel::A => "A",
            AnswerLabel::B => "B",
            AnswerLabel::C => "C",
            AnswerLabel::D => "D",
        };
        f.write_str(letter)
    }
}

impl FromStr for AnswerLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_ref() {
            "A" => Ok(AnswerLabel::A),
            "B" => Ok(AnswerLabel::B),
            "C" => Ok(AnswerLabel::C),
            "D" => Ok(AnswerLabel::D),
            other => Err(anyhow!("Invalid answer label `{}`, expected A, B, C or D", other)),
        }
    }
}

fn label_from_string<'de, D>(deserializer: D) -> std::result::Result<AnswerLabel, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    value.parse().map_err(|_| {
        de::Error::invalid_value(de::Unexpected::Str(&value), &"one of A, B, C or D")
    })
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    pub id: String,
    pub question: String,
    pub answers: Vec<String>,
    #[serde(deserialize_with = "label_from_string")]
    pub correct_answer: AnswerLabel,
}

/// One row of a CSV question bank.
#[derive(Debug, Deserialize)]
pub struct RawCsvQuestion {
    pub module: String,
    pub id: String,
    pub question: String,
    pub answer_a: String,
    pub answer_b: String,
    pub answer_c: String,
    pub answer_d: String,
    #[serde(deserialize_with = "label_from_string")]
    pub correct_answer: AnswerLabel,
}

impl From<RawCsvQuestion> for RawQuestion {
    fn from(row: RawCsvQuestion) -> Self {
        RawQuestion {
            id: row.id,
            question: row.question,
            answers: vec![row.answer_a, row.answer_b, row.answer_c, row.answer_d],
            correct_answer: row.correct_answer,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub answers: [String; ANSWER_COUNT],
    pub correct_answer: AnswerLabel,
}

impl Question {
    /// Answer text without its `A. ` style prefix.
    pub fn answer_text(&self, original_index: usize) -> &str {
        self.answers
            .get(original_index)
            .map(|a| strip_answer_prefix(a))
            .unwrap_or_default()
    }

    pub fn is_answer_correct(&self, original_index: usize) -> bool {
        self.correct_answer.index() == original_index
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = Error;

    fn try_from(raw_question: RawQuestion) -> Result<Self> {
        let id = raw_question.id;
        let answer_count = raw_question.answers.len();
        let answers = <[String; ANSWER_COUNT]>::try_from(raw_question.answers).map_err(|_| {
            anyhow!(
                "Question {} has {} answers, expected {}",
                id,
                answer_count,
                ANSWER_COUNT
            )
        })?;

        Ok(Question {
            id,
            question: raw_question.question,
            answers,
            correct_answer: raw_question.correct_answer,
        })
    }
}
