//! Core traits and types for styleguide publishing
//!
//! This module defines the fundamental abstractions shared by the deploy
//! sequencer, the git-backed publisher, and the site validator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Validation
// ============================================================================

/// Validation error with field information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(default = "default_error_severity")]
    pub severity: String, // Always "error"
}

fn default_error_severity() -> String {
    "error".to_string()
}

/// Validation warning with field information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    #[serde(default = "default_warning_severity")]
    pub severity: String, // Always "warning"
}

fn default_warning_severity() -> String {
    "warning".to_string()
}

/// Result of site layout validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

// ============================================================================
// Publishing
// ============================================================================

/// A single publish operation: copy the files matching `patterns` out of
/// `source_dir` onto the hosting branch and commit them with `message`.
///
/// With `append = false` the branch contents are replaced wholesale; with
/// `append = true` the matched files are merged into whatever is already
/// published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Directory the include patterns are resolved against
    pub source_dir: PathBuf,

    /// Include patterns, relative to `source_dir` (glob syntax)
    pub patterns: Vec<String>,

    /// Commit message for the hosting-branch commit
    pub message: String,

    /// Merge into existing published content instead of replacing it
    pub append: bool,

    /// List matched files without committing or pushing
    pub dry_run: bool,
}

impl PublishRequest {
    /// Comma-separated pattern list for log and error messages
    pub fn patterns_display(&self) -> String {
        self.patterns.join(", ")
    }
}

/// Result of a publish operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishOutcome {
    /// Number of files copied onto the hosting branch
    pub files_published: usize,

    /// Commit id created on the hosting branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,

    /// Hosting branch the files landed on
    pub branch: String,

    /// True when the branch was already up to date and no commit was made
    pub skipped: bool,

    /// Matched files, reported instead of publishing in dry-run mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run_files: Option<Vec<String>>,
}

// ============================================================================
// Publisher Trait
// ============================================================================

/// Interface to the "publish directory to hosting branch" capability
///
/// The deploy sequencer only ever talks to this trait, so the git-backed
/// implementation can be swapped for a mock in tests.
///
/// # Examples
///
/// ```no_run
/// # use pages_publisher::core::{PagesPublisher, PublishOutcome, PublishRequest};
/// # use async_trait::async_trait;
/// # struct RecordingPublisher;
/// # #[async_trait]
/// # impl PagesPublisher for RecordingPublisher {
/// #   fn name(&self) -> &str { "recording" }
/// async fn publish(&self, request: &PublishRequest) -> anyhow::Result<PublishOutcome> {
///     Ok(PublishOutcome {
///         files_published: request.patterns.len(),
///         commit: None,
///         branch: "gh-pages".to_string(),
///         skipped: false,
///         dry_run_files: None,
///     })
/// }
/// # }
/// ```
#[async_trait]
pub trait PagesPublisher: Send + Sync {
    /// Publisher name (e.g., "git")
    fn name(&self) -> &str;

    /// Publish the files matching the request onto the hosting branch
    async fn publish(&self, request: &PublishRequest) -> anyhow::Result<PublishOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_creation() {
        let error = ValidationError {
            field: "docs".to_string(),
            message: "Documentation directory not found".to_string(),
            severity: "error".to_string(),
        };

        assert_eq!(error.field, "docs");
        assert_eq!(error.severity, "error");
    }

    #[test]
    fn test_validation_result_valid() {
        let result = ValidationResult {
            valid: true,
            errors: vec![],
            warnings: vec![],
        };

        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_publish_request_patterns_display() {
        let request = PublishRequest {
            source_dir: PathBuf::from("docs"),
            patterns: vec![
                "index.html".to_string(),
                "css/**/*.css".to_string(),
                "img/*".to_string(),
            ],
            message: "Publish styleguide docs".to_string(),
            append: false,
            dry_run: false,
        };

        assert_eq!(request.patterns_display(), "index.html, css/**/*.css, img/*");
    }

    #[test]
    fn test_publish_request_serialization() {
        let request = PublishRequest {
            source_dir: PathBuf::from("."),
            patterns: vec!["README.md".to_string()],
            message: "Publish README".to_string(),
            append: true,
            dry_run: false,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"append\":true"));

        let deserialized: PublishRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, request);
    }

    #[test]
    fn test_publish_outcome_skips_empty_optionals() {
        let outcome = PublishOutcome {
            files_published: 4,
            commit: None,
            branch: "gh-pages".to_string(),
            skipped: false,
            dry_run_files: None,
        };

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(!json.contains("commit"));
        assert!(!json.contains("dry_run_files"));
        assert!(json.contains("\"files_published\":4"));
    }

    #[test]
    fn test_publish_outcome_with_commit() {
        let outcome = PublishOutcome {
            files_published: 1,
            commit: Some("abc1234".to_string()),
            branch: "gh-pages".to_string(),
            skipped: false,
            dry_run_files: None,
        };

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("abc1234"));
    }
}
