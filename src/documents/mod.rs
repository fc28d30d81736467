use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

pub mod viewer;


const DOC_PARAMETER: &str = "doc";

lazy_static! {
    static ref FORBIDDEN_FILE_NAME_CHARACTERS_REGEX: Regex = Regex::new(r"[^\w\s]").unwrap();
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub path: String,
}

impl Document {
    fn new(id: &str, title: &str, path: &str) -> Self {
        Document {
            id: id.to_owned(),
            title: title.to_owned(),
            path: path.to_owned(),
        }
    }

    /// Name offered when saving the document: the title without punctuation.
    pub fn download_file_name(&self) -> String {
        let title = FORBIDDEN_FILE_NAME_CHARACTERS_REGEX.replace_all(&self.title, "");
        format!("{}.pdf", title)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Catalog {
    categories: Vec<(String, Vec<Document>)>,
}

impl Default for Catalog {
    fn default() -> Self {
        let numbered = |prefix: &str, file_prefix: &str, name: &str, count: usize| {
            (1..=count)
                .map(|i| {
                    Document::new(
                        &format!("{}-{}", prefix, i),
                        &format!("{} Document {}", name, i),
                        &format!("docs/{}-{}.pdf", file_prefix, i),
                    )
                })
                .collect::<Vec<_>>()
        };
        Catalog {
            categories: vec![
                ("word".to_owned(), numbered("word", "word", "Word", 7)),
                ("excel".to_owned(), numbered("excel", "Excel", "Excel", 4)),
                (
                    "powerpoint".to_owned(),
                    numbered("powerpoint", "powerpoint", "PowerPoint", 4),
                ),
            ],
        }
    }
}

impl Catalog {
    pub fn open(source: &Path) -> Result<Catalog> {
        let content = std::fs::read_to_string(source)
            .with_context(|| format!("Could not read document catalog {:?}", source))?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Catalog> {
        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(content).context("Document catalog is not a JSON object")?;
        let mut categories = Vec::with_capacity(raw.len());
        for (category, value) in raw {
            let documents: Vec<Document> = serde_json::from_value(value)
                .with_context(|| format!("Invalid documents in category {}", category))?;
            categories.push((category, documents));
        }
        Ok(Catalog { categories })
    }

    pub fn get_categories(&self) -> &[(String, Vec<Document>)] {
        &self.categories
    }

    pub fn find(&self, id: &str) -> Option<(&str, &Document)> {
        self.categories.iter().find_map(|(category, documents)| {
            documents
                .iter()
                .find(|d| d.id == id)
                .map(|d| (category.as_str(), d))
        })
    }
}

/// Reads the `doc` parameter out of a URL or bare query string.
pub fn doc_from_query(url_or_query: &str) -> Option<String> {
    let query = match url_or_query.find('?') {
        Some(position) => &url_or_query[position + 1..],
        None => url_or_query,
    };
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or_default();
            Some((key, value))
        })
        .filter(|(key, value)| *key == DOC_PARAMETER && !value.is_empty())
        .map(|(_, value)| value.to_owned())
        .last()
}

/// Sets `doc=<id>` on the URL, replacing any previous value.
pub fn with_doc_param(url: &str, id: &str) -> String {
    let (without_fragment, fragment) = match url.find('#') {
        Some(position) => (&url[..position], &url[position..]),
        None => (url, ""),
    };
    let (base, query) = match without_fragment.find('?') {
        Some(position) => (
            &without_fragment[..position],
            &without_fragment[position + 1..],
        ),
        None => (without_fragment, ""),
    };

    let mut pairs: Vec<String> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.splitn(2, '=').next() != Some(DOC_PARAMETER))
        .map(|pair| pair.to_owned())
        .collect();
    pairs.push(format!("{}={}", DOC_PARAMETER, id));

    format!("{}?{}{}", base, pairs.join("&"), fragment)
}
