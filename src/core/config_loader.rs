//! Configuration file loader for pages-publisher
//!
//! This module provides configuration loading, validation, and merging
//! capabilities.

use super::config::*;
use crate::core::error::DeployError;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Configuration file name
pub const CONFIG_FILENAME: &str = ".pages-publisher.yml";

/// Configuration load options
#[derive(Debug, Clone, Default)]
pub struct ConfigLoadOptions {
    /// CLI arguments (highest priority)
    pub cli_args: Option<DeployConfig>,

    /// Environment variables
    pub env: HashMap<String, String>,
}

/// Configuration validation result
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationResult {
    /// Is configuration valid?
    pub valid: bool,

    /// Validation errors
    pub errors: Vec<ConfigValidationError>,

    /// Validation warnings
    pub warnings: Vec<ConfigValidationWarning>,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Field path (e.g., "project.branch")
    pub field: String,

    /// Error message
    pub message: String,
}

/// Configuration validation warning
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationWarning {
    /// Field path
    pub field: String,

    /// Warning message
    pub message: String,

    /// Suggestion
    pub suggestion: Option<String>,
}

/// Configuration file loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from multiple sources with priority
    ///
    /// Priority (high to low):
    /// 1. CLI arguments
    /// 2. Environment variables
    /// 3. Project config (./.pages-publisher.yml)
    /// 4. Default values
    pub async fn load(
        project_path: &Path,
        options: ConfigLoadOptions,
    ) -> Result<DeployConfig, DeployError> {
        let mut configs: Vec<DeployConfig> = Vec::new();

        // 4. Default values (lowest priority)
        configs.push(DeployConfig::default());

        // 3. Project config
        if let Some(project_config) = Self::load_project_config(project_path).await? {
            configs.push(project_config);
        }

        // 2. Environment variables
        if let Some(env_config) = Self::load_env_config(&options.env) {
            configs.push(env_config);
        }

        // 1. CLI arguments (highest priority)
        if let Some(cli_config) = options.cli_args {
            configs.push(cli_config);
        }

        Ok(Self::merge_configs(configs))
    }

    /// Load project configuration from ./.pages-publisher.yml
    async fn load_project_config(project_path: &Path) -> Result<Option<DeployConfig>, DeployError> {
        let config_path = project_path.join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&config_path).await.map_err(|e| {
            DeployError::ConfigError {
                message: format!("Failed to read config file: {}", e),
            }
        })?;

        let config: DeployConfig =
            serde_yaml::from_str(&content).map_err(|e| DeployError::ConfigError {
                message: format!("Failed to parse YAML config: {}", e),
            })?;

        Ok(Some(config))
    }

    /// Load configuration from environment variables
    fn load_env_config(env: &HashMap<String, String>) -> Option<DeployConfig> {
        let mut config = DeployConfig {
            version: String::new(),
            ..Default::default()
        };
        let mut has_changes = false;

        // PAGES_PUBLISHER_REMOTE -> project.remote
        // PAGES_PUBLISHER_BRANCH -> project.branch
        let remote = env.get("PAGES_PUBLISHER_REMOTE");
        let branch = env.get("PAGES_PUBLISHER_BRANCH");
        if remote.is_some() || branch.is_some() {
            config.project = Some(ProjectConfig {
                name: None,
                remote: remote.cloned(),
                branch: branch.cloned(),
            });
            has_changes = true;
        }

        // PAGES_PUBLISHER_DRY_RUN -> publish.dryRun
        if env.get("PAGES_PUBLISHER_DRY_RUN").map(|s| s.as_str()) == Some("true") {
            config.publish = Some(PublishOptionsConfig {
                push: None,
                dry_run: Some(true),
            });
            has_changes = true;
        }

        if has_changes { Some(config) } else { None }
    }

    /// Merge multiple configurations with priority
    fn merge_configs(configs: Vec<DeployConfig>) -> DeployConfig {
        let mut result = DeployConfig {
            version: String::new(),
            ..Default::default()
        };

        for config in configs {
            Self::merge_into(&mut result, config);
        }

        result
    }

    /// Merge source config into target
    fn merge_into(target: &mut DeployConfig, source: DeployConfig) {
        // Version
        if !source.version.is_empty() {
            target.version = source.version;
        }

        // Project
        if let Some(source_project) = source.project {
            let target_project = target.project.get_or_insert_with(ProjectConfig::default);

            if source_project.name.is_some() {
                target_project.name = source_project.name;
            }
            if source_project.remote.is_some() {
                target_project.remote = source_project.remote;
            }
            if source_project.branch.is_some() {
                target_project.branch = source_project.branch;
            }
        }

        // Docs
        if let Some(source_docs) = source.docs {
            let target_docs = target.docs.get_or_insert_with(DocsConfig::default);

            if source_docs.dir.is_some() {
                target_docs.dir = source_docs.dir;
            }
            if source_docs.entry.is_some() {
                target_docs.entry = source_docs.entry;
            }
            if source_docs.patterns.is_some() {
                target_docs.patterns = source_docs.patterns;
            }
            if source_docs.message.is_some() {
                target_docs.message = source_docs.message;
            }
        }

        // Readme
        if let Some(source_readme) = source.readme {
            let target_readme = target.readme.get_or_insert_with(ReadmeConfig::default);

            if source_readme.file.is_some() {
                target_readme.file = source_readme.file;
            }
            if source_readme.message.is_some() {
                target_readme.message = source_readme.message;
            }
        }

        // Publish options
        if let Some(source_publish) = source.publish {
            let target_publish = target
                .publish
                .get_or_insert_with(PublishOptionsConfig::default);

            if source_publish.push.is_some() {
                target_publish.push = source_publish.push;
            }
            if source_publish.dry_run.is_some() {
                target_publish.dry_run = source_publish.dry_run;
            }
        }
    }

    /// Validate configuration
    pub fn validate(config: &DeployConfig) -> ConfigValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // 1. Check version (required)
        if config.version.is_empty() {
            errors.push(ConfigValidationError {
                field: "version".to_string(),
                message: "Version is required".to_string(),
            });
        } else if config.version != "1.0" {
            warnings.push(ConfigValidationWarning {
                field: "version".to_string(),
                message: format!("Unknown version: {}", config.version),
                suggestion: Some("Currently supported version is \"1.0\" only".to_string()),
            });
        }

        // 2. Empty pattern override would publish nothing
        if let Some(docs) = &config.docs
            && let Some(patterns) = &docs.patterns
            && patterns.is_empty()
        {
            errors.push(ConfigValidationError {
                field: "docs.patterns".to_string(),
                message: "Pattern list must not be empty".to_string(),
            });
        }

        ConfigValidationResult {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Format validation result as human-readable string
    pub fn format_validation_result(result: &ConfigValidationResult) -> String {
        let mut lines = Vec::new();

        if result.valid {
            lines.push("✅ Configuration validation succeeded".to_string());
        } else {
            lines.push("❌ Configuration has errors".to_string());
        }

        if !result.errors.is_empty() {
            lines.push("\n🔴 Errors:".to_string());
            for error in &result.errors {
                lines.push(format!("  - [{}] {}", error.field, error.message));
            }
        }

        if !result.warnings.is_empty() {
            lines.push("\n🟡 Warnings:".to_string());
            for warning in &result.warnings {
                lines.push(format!("  - [{}] {}", warning.field, warning.message));
                if let Some(suggestion) = &warning.suggestion {
                    lines.push(format!("    Suggestion: {}", suggestion));
                }
            }
        }

        lines.join("\n")
    }
}
