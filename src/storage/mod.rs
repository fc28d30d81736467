use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use unidecode::unidecode;

mod file;
mod memory;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;

#[cfg(test)]
mod tests;

const PROGRESS_KEY_PREFIX: &str = "quizProgress_";
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

lazy_static! {
    static ref FORBIDDEN_KEY_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9_-]").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new("\\s+").unwrap();
}

/// Key-value persistence for serialized progress, one entry per module.
pub trait ProgressStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, content: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Lowercase ASCII form of `name`. A name that had to be altered gets the
/// FNV-1a digest of the raw name appended, keeping `Module1` apart from `module1`.
pub fn sanitize_key(name: &str) -> String {
    let transliterated = unidecode(name).to_lowercase();
    let dashed = WHITESPACE_REGEX.replace_all(transliterated.trim(), "-");
    let key: String = FORBIDDEN_KEY_CHARACTERS_REGEX
        .replace_all(&dashed, "")
        .into();
    if key == name {
        return key;
    }
    let digest = format!("{:08x}", name_digest(name));
    if key.is_empty() {
        digest
    } else {
        format!("{}-{}", key, digest)
    }
}

fn name_digest(name: &str) -> u32 {
    name.bytes()
        .fold(FNV_OFFSET_BASIS, |hash, byte| (hash ^ byte as u32).wrapping_mul(FNV_PRIME))
}

pub fn progress_key(module: &str) -> String {
    format!("{}{}", PROGRESS_KEY_PREFIX, sanitize_key(module))
}
