use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{BackdropError, BackdropResult};

/// Where texture bytes come from.
///
/// Implementations are shared across the parallel load pass, hence `Send + Sync`.
pub trait TextureSource: Send + Sync {
    /// Fetch the raw encoded bytes behind `href`.
    fn fetch(&self, href: &str) -> BackdropResult<Vec<u8>>;
}

/// Resolves hrefs as relative paths under a root directory.
#[derive(Clone, Debug)]
pub struct FsTextureSource {
    root: PathBuf,
}

impl FsTextureSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory hrefs are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureSource for FsTextureSource {
    fn fetch(&self, href: &str) -> BackdropResult<Vec<u8>> {
        let rel = normalize_href(href)?;
        let path = self.root.join(Path::new(&rel));
        std::fs::read(&path)
            .with_context(|| format!("read texture bytes from '{}'", path.display()))
            .map_err(BackdropError::from)
    }
}

/// In-memory source keyed by normalized href.
#[derive(Clone, Debug, Default)]
pub struct MemoryTextureSource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryTextureSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes for `href`. Invalid hrefs are rejected.
    pub fn insert(&mut self, href: &str, bytes: Vec<u8>) -> BackdropResult<()> {
        self.entries.insert(normalize_href(href)?, bytes);
        Ok(())
    }
}

impl TextureSource for MemoryTextureSource {
    fn fetch(&self, href: &str) -> BackdropResult<Vec<u8>> {
        let key = normalize_href(href)?;
        self.entries
            .get(&key)
            .cloned()
            .ok_or_else(|| BackdropError::asset(format!("no texture registered for '{key}'")))
    }
}

/// Normalize a page-relative href into a relative `/`-separated path.
///
/// Query strings and fragments are dropped. Absolute paths, URLs with a scheme and parent
/// traversals (`..`) are rejected.
pub fn normalize_href(href: &str) -> BackdropResult<String> {
    let s = href.trim();
    let s = s.split(['?', '#']).next().unwrap_or_default();
    if s.contains("://") {
        return Err(BackdropError::asset(format!(
            "remote texture hrefs are not supported: '{href}'"
        )));
    }
    let s = s.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BackdropError::asset("texture hrefs must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BackdropError::asset("texture hrefs must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BackdropError::asset(format!(
            "texture href '{href}' does not name a file"
        )));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
