//! Configuration structures and types for pages-publisher
//!
//! This module provides type-safe configuration management with serde
//! support, plus resolution of the sparse on-disk config into a fully
//! specified deploy plan.

use crate::core::error::DeployError;
use crate::core::traits::PublishRequest;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default git remote the hosting branch is pushed to
pub const DEFAULT_REMOTE: &str = "origin";

/// Default hosting branch
pub const DEFAULT_BRANCH: &str = "gh-pages";

/// Default documentation directory, relative to the project root
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Default entry HTML file inside the documentation directory
pub const DEFAULT_ENTRY: &str = "index.html";

/// Recursive CSS include pattern
pub const CSS_PATTERN: &str = "css/**/*.css";

/// Single-level image include pattern
pub const IMG_PATTERN: &str = "img/*";

/// Default README file, relative to the project root
pub const DEFAULT_README_FILE: &str = "README.md";

/// Fixed commit message for the docs step
pub const DEFAULT_DOCS_MESSAGE: &str = "Publish styleguide docs";

/// Fixed commit message for the readme step
pub const DEFAULT_README_MESSAGE: &str = "Publish README";

lazy_static! {
    /// Branch names: no leading dash or dot, path segments allowed
    static ref BRANCH_NAME_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/-]*$").unwrap();

    /// Remote names: same rules minus path separators
    static ref REMOTE_NAME_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap();
}

/// Root configuration object (`.pages-publisher.yml`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeployConfig {
    /// Schema version (required)
    pub version: String,

    /// Project basic information (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectConfig>,

    /// Docs step configuration (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<DocsConfig>,

    /// Readme step configuration (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<ReadmeConfig>,

    /// Publish options (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish: Option<PublishOptionsConfig>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            project: None,
            docs: None,
            readme: None,
            publish: None,
        }
    }
}

/// Project basic information
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project name (optional, informational)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Git remote to push to (default: "origin")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,

    /// Hosting branch (default: "gh-pages")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// Docs step configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocsConfig {
    /// Documentation directory, relative to the project root (default: "docs")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Entry HTML file inside the docs directory (default: "index.html")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    /// Override the full include pattern list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,

    /// Commit message override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Readme step configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReadmeConfig {
    /// README file, relative to the project root (default: "README.md")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Commit message override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Publish options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PublishOptionsConfig {
    /// Push the hosting branch after committing (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<bool>,

    /// List matched files without committing or pushing (default: false)
    #[serde(rename = "dryRun", skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

/// Fully resolved deploy plan: no optional holes left
///
/// Holds the exact two publish requests the sequencer will issue, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployPlan {
    pub project_path: PathBuf,
    pub remote: String,
    pub branch: String,
    pub push: bool,
    pub dry_run: bool,
    pub docs_request: PublishRequest,
    pub readme_request: PublishRequest,
}

impl DeployConfig {
    /// Resolve the sparse configuration into a complete [`DeployPlan`]
    ///
    /// Applies defaults for every unset field and validates remote and
    /// branch names before they reach git.
    pub fn resolve(&self, project_path: &Path) -> Result<DeployPlan, DeployError> {
        let project = self.project.clone().unwrap_or_default();
        let docs = self.docs.clone().unwrap_or_default();
        let readme = self.readme.clone().unwrap_or_default();
        let publish = self.publish.clone().unwrap_or_default();

        let remote = project.remote.unwrap_or_else(|| DEFAULT_REMOTE.to_string());
        if !REMOTE_NAME_RE.is_match(&remote) {
            return Err(DeployError::InvalidRemoteName { name: remote });
        }

        let branch = project.branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        if !BRANCH_NAME_RE.is_match(&branch) || branch.ends_with(".lock") {
            return Err(DeployError::InvalidBranchName { name: branch });
        }

        let dry_run = publish.dry_run.unwrap_or(false);

        let entry = docs.entry.unwrap_or_else(|| DEFAULT_ENTRY.to_string());
        let docs_patterns = docs.patterns.unwrap_or_else(|| {
            vec![entry, CSS_PATTERN.to_string(), IMG_PATTERN.to_string()]
        });

        let docs_request = PublishRequest {
            source_dir: project_path.join(docs.dir.as_deref().unwrap_or(DEFAULT_DOCS_DIR)),
            patterns: docs_patterns,
            message: docs
                .message
                .unwrap_or_else(|| DEFAULT_DOCS_MESSAGE.to_string()),
            append: false,
            dry_run,
        };

        let readme_request = PublishRequest {
            source_dir: project_path.to_path_buf(),
            patterns: vec![readme.file.unwrap_or_else(|| DEFAULT_README_FILE.to_string())],
            message: readme
                .message
                .unwrap_or_else(|| DEFAULT_README_MESSAGE.to_string()),
            append: true,
            dry_run,
        };

        Ok(DeployPlan {
            project_path: project_path.to_path_buf(),
            remote,
            branch,
            push: publish.push.unwrap_or(true),
            dry_run,
            docs_request,
            readme_request,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves_standard_requests() {
        let plan = DeployConfig::default().resolve(Path::new(".")).unwrap();

        assert_eq!(plan.remote, "origin");
        assert_eq!(plan.branch, "gh-pages");
        assert!(plan.push);
        assert!(!plan.dry_run);

        assert_eq!(plan.docs_request.source_dir, Path::new("./docs"));
        assert_eq!(
            plan.docs_request.patterns,
            vec!["index.html", "css/**/*.css", "img/*"]
        );
        assert_eq!(plan.docs_request.message, "Publish styleguide docs");
        assert!(!plan.docs_request.append);

        assert_eq!(plan.readme_request.source_dir, Path::new("."));
        assert_eq!(plan.readme_request.patterns, vec!["README.md"]);
        assert_eq!(plan.readme_request.message, "Publish README");
        assert!(plan.readme_request.append);
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let config = DeployConfig {
            project: Some(ProjectConfig {
                name: Some("styleguide".to_string()),
                remote: Some("upstream".to_string()),
                branch: Some("pages/live".to_string()),
            }),
            docs: Some(DocsConfig {
                dir: Some("site".to_string()),
                entry: Some("home.html".to_string()),
                patterns: None,
                message: Some("Deploy site".to_string()),
            }),
            publish: Some(PublishOptionsConfig {
                push: Some(false),
                dry_run: Some(true),
            }),
            ..Default::default()
        };

        let plan = config.resolve(Path::new("/repo")).unwrap();

        assert_eq!(plan.remote, "upstream");
        assert_eq!(plan.branch, "pages/live");
        assert!(!plan.push);
        assert!(plan.dry_run);
        assert!(plan.docs_request.dry_run);
        assert_eq!(plan.docs_request.source_dir, Path::new("/repo/site"));
        assert_eq!(
            plan.docs_request.patterns,
            vec!["home.html", "css/**/*.css", "img/*"]
        );
        assert_eq!(plan.docs_request.message, "Deploy site");
    }

    #[test]
    fn test_resolve_explicit_pattern_list_wins_over_entry() {
        let config = DeployConfig {
            docs: Some(DocsConfig {
                patterns: Some(vec!["**/*.html".to_string()]),
                entry: Some("ignored.html".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let plan = config.resolve(Path::new(".")).unwrap();
        assert_eq!(plan.docs_request.patterns, vec!["**/*.html"]);
    }

    #[test]
    fn test_resolve_rejects_bad_branch_name() {
        let config = DeployConfig {
            project: Some(ProjectConfig {
                branch: Some("-oops".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let result = config.resolve(Path::new("."));
        assert!(matches!(
            result,
            Err(DeployError::InvalidBranchName { name }) if name == "-oops"
        ));
    }

    #[test]
    fn test_resolve_rejects_lock_suffix_branch() {
        let config = DeployConfig {
            project: Some(ProjectConfig {
                branch: Some("gh-pages.lock".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(matches!(
            config.resolve(Path::new(".")),
            Err(DeployError::InvalidBranchName { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_remote_name() {
        let config = DeployConfig {
            project: Some(ProjectConfig {
                remote: Some("bad remote".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(matches!(
            config.resolve(Path::new(".")),
            Err(DeployError::InvalidRemoteName { .. })
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = r#"
version: "1.0"
project:
  remote: origin
  branch: gh-pages
docs:
  dir: docs
readme:
  file: README.md
publish:
  push: true
"#;

        let config: DeployConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(
            config.project.as_ref().unwrap().branch.as_deref(),
            Some("gh-pages")
        );

        let serialized = serde_yaml::to_string(&config).unwrap();
        let reparsed: DeployConfig = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(reparsed, config);
    }
}
