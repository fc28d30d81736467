use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

fn first_page() -> usize {
    1
}

/// Per-module progress as written to the progress store.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProgress {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub answered_questions: BTreeSet<usize>,
    #[serde(default)]
    pub user_answers: BTreeMap<usize, usize>,
    #[serde(default = "first_page")]
    pub current_page: usize,
    #[serde(default)]
    pub correct_answers_count: u32,
    pub last_accessed: DateTime<Utc>,
}

impl SavedProgress {
    pub fn from_json(content: &str) -> serde_json::Result<SavedProgress> {
        serde_json::from_str(content)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.last_accessed) > ttl
    }
}
