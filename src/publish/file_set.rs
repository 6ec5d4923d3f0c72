//! Include-pattern expansion for publish requests
//!
//! Resolves a request's glob patterns against its source directory into a
//! deterministic, sorted list of relative file paths.

use crate::core::error::DeployError;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Match options used for all include patterns.
///
/// Literal separators keep `img/*` one directory level deep while
/// `css/**/*.css` still recurses; a literal leading dot keeps hidden files
/// out of wildcard matches.
fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    }
}

/// The concrete files selected by a publish request's patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<PathBuf>,
}

impl FileSet {
    /// Expand `patterns` against `source_dir`.
    ///
    /// Paths are relative to `source_dir` and sorted, so commits and logs
    /// are stable across runs. The `.git` directory is never traversed.
    ///
    /// # Errors
    ///
    /// - `DeployError::SourceDirMissing` when `source_dir` is not a directory
    /// - `DeployError::InvalidPattern` when a pattern fails to compile
    pub fn expand(source_dir: &Path, patterns: &[String]) -> Result<Self, DeployError> {
        if !source_dir.is_dir() {
            return Err(DeployError::SourceDirMissing {
                path: source_dir.to_path_buf(),
            });
        }

        let compiled = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|_| DeployError::InvalidPattern {
                    pattern: p.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let options = match_options();
        let mut files = Vec::new();

        let walker = WalkDir::new(source_dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git");

        for entry in walker {
            let entry = entry.map_err(|e| DeployError::FileOperationFailed {
                message: format!("Failed to walk source directory: {}", e),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            // Safe: every entry is under source_dir
            let relative = entry
                .path()
                .strip_prefix(source_dir)
                .expect("walkdir entry outside source dir")
                .to_path_buf();

            if compiled
                .iter()
                .any(|p| p.matches_path_with(&relative, options))
            {
                files.push(relative);
            }
        }

        files.sort();

        Ok(Self { files })
    }

    /// Matched paths, relative to the source directory
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths as display strings for reports and dry-run listings
    pub fn display_list(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect()
    }
}
