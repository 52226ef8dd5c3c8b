use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    content_set: GlobSet,
    candidate_re: Regex,
}

impl Scanner {
    pub fn new(root: PathBuf, config: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            root,
            content_set: build_globset(&config.content)?,
            candidate_re: Regex::new(r"[A-Za-z0-9_:/-]+")
                .context("Failed to compile candidate pattern")?,
        })
    }

    /// Walks the project and collects class candidates from every file
    /// matching a content pattern. A file is visited once no matter how
    /// many patterns match it, and pattern order never changes the set.
    pub fn scan(&self) -> BTreeSet<String> {
        let mut candidates = BTreeSet::new();

        // Standard ignore walker (handles .gitignore automatically)
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if let Some(path) = self.select_entry(entry.path()) {
                        self.extract_from_file(&path, &mut candidates);
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        candidates
    }

    fn select_entry(&self, path: &Path) -> Option<PathBuf> {
        if path == self.root || path.is_dir() {
            return None;
        }

        // The walker allows hidden files, so keep .git out by hand.
        if path.components().any(|c| c.as_os_str() == ".git") {
            return None;
        }

        let relative = diff_paths(path, &self.root)?;
        if self.content_set.is_match(&relative) {
            Some(path.to_path_buf())
        } else {
            None
        }
    }

    fn extract_from_file(&self, path: &Path, candidates: &mut BTreeSet<String>) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                // Content globs may match binaries; skip rather than abort.
                log::warn!("Skipping {:?}: {}", path, err);
                return;
            }
        };

        for found in self.candidate_re.find_iter(&text) {
            candidates.insert(found.as_str().to_string());
        }
    }
}

/// Helper to build efficient glob sets. Patterns are project-relative,
/// so a leading `./` is dropped before compilation.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let normalized = pat.strip_prefix("./").unwrap_or(pat);
        builder.add(Glob::new(normalized).context(format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
