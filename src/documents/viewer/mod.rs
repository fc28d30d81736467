use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use log::{info, warn};
use regex::bytes::Regex;
use std::path::{Path, PathBuf};

#[cfg(test)]
mod tests;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 5.0;

const PDF_MAGIC: &[u8] = b"%PDF-";

lazy_static! {
    static ref PAGE_OBJECT_REGEX: Regex = Regex::new(r"/Type\s*/Page(?-u:[^s]|$)").unwrap();
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoadedDocument {
    pub page_count: usize,
}

pub trait DocumentLoader {
    fn locate(&self, path: &Path) -> PathBuf;
    fn load(&self, path: &Path) -> Result<LoadedDocument>;
}

/// Opens PDF files from disk. Only checks the header and counts page
/// objects; rendering is left to whatever displays the file.
#[derive(Clone, Debug, Default)]
pub struct PdfFileLoader {
    root: PathBuf,
}

impl PdfFileLoader {
    pub fn new(root: PathBuf) -> Self {
        PdfFileLoader { root }
    }
}

impl DocumentLoader for PdfFileLoader {
    fn locate(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    fn load(&self, path: &Path) -> Result<LoadedDocument> {
        let full_path = self.locate(path);
        let bytes =
            std::fs::read(&full_path).with_context(|| format!("Could not read {:?}", full_path))?;
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(anyhow!("{:?} is not a PDF file", full_path));
        }
        let page_count = PAGE_OBJECT_REGEX.find_iter(&bytes).count();
        if page_count == 0 {
            return Err(anyhow!("{:?} has no pages", full_path));
        }
        Ok(LoadedDocument { page_count })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenDocument {
    pub title: String,
    pub path: PathBuf,
    pub page_count: usize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct FailedLoad {
    title: String,
    path: PathBuf,
}

#[derive(Debug)]
pub struct Viewer<L> {
    loader: L,
    current: Option<OpenDocument>,
    failed: Option<FailedLoad>,
    page: usize,
    scale: f64,
}

fn round_scale(scale: f64) -> f64 {
    (scale * 100.0).round() / 100.0
}

impl<L: DocumentLoader> Viewer<L> {
    pub fn new(loader: L) -> Self {
        Viewer {
            loader,
            current: None,
            failed: None,
            page: 1,
            scale: 1.0,
        }
    }

    /// Replaces the open document. On failure nothing stays open and the
    /// request is remembered for `retry`.
    pub fn load(&mut self, path: &Path, title: &str) -> Result<&OpenDocument> {
        self.current = None;
        match self.loader.load(path) {
            Ok(loaded) => {
                info!("Opened {} ({} pages)", title, loaded.page_count);
                self.failed = None;
                self.page = 1;
                Ok(self.current.get_or_insert(OpenDocument {
                    title: title.to_owned(),
                    path: path.to_path_buf(),
                    page_count: loaded.page_count,
                }))
            }
            Err(e) => {
                warn!("Could not open {}: {:#}", title, e);
                self.failed = Some(FailedLoad {
                    title: title.to_owned(),
                    path: path.to_path_buf(),
                });
                Err(e)
            }
        }
    }

    pub fn retry(&mut self) -> Result<&OpenDocument> {
        let failed = self
            .failed
            .clone()
            .ok_or_else(|| anyhow!("There is no failed document to retry"))?;
        self.load(&failed.path, &failed.title)
    }

    pub fn failed_title(&self) -> Option<&str> {
        self.failed.as_ref().map(|f| f.title.as_str())
    }

    pub fn get_current(&self) -> Option<&OpenDocument> {
        self.current.as_ref()
    }

    /// Copies the open document into `directory` under its download name.
    pub fn download(&self, directory: &Path, file_name: &str) -> Result<PathBuf> {
        let document = self
            .current
            .as_ref()
            .ok_or_else(|| anyhow!("There is no open document to download"))?;
        let source = self.loader.locate(&document.path);
        std::fs::create_dir_all(directory)
            .with_context(|| format!("Could not create {:?}", directory))?;
        let destination = directory.join(file_name);
        std::fs::copy(&source, &destination)
            .with_context(|| format!("Could not copy {:?} to {:?}", source, destination))?;
        Ok(destination)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn next_page(&mut self) -> bool {
        match &self.current {
            Some(document) if self.page < document.page_count => {
                self.page += 1;
                true
            }
            _ => false,
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.current.is_some() && self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn zoom_in(&mut self) -> bool {
        if self.scale >= MAX_ZOOM {
            return false;
        }
        let increment = if self.scale < 1.0 { 0.1 } else { 0.25 };
        self.scale = round_scale((self.scale + increment).min(MAX_ZOOM));
        true
    }

    pub fn zoom_out(&mut self) -> bool {
        if self.scale <= MIN_ZOOM {
            return false;
        }
        let decrement = if self.scale <= 1.0 { 0.1 } else { 0.25 };
        self.scale = round_scale((self.scale - decrement).max(MIN_ZOOM));
        true
    }

    #[cfg(test)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}
