//! Styleguide layout validation
//!
//! Pre-flight checks for the `check` command: verifies that the project
//! actually has the layout the two publish steps are about to sweep.

use crate::core::config::DeployPlan;
use crate::core::traits::{ValidationError, ValidationResult, ValidationWarning};
use std::path::Path;
use walkdir::WalkDir;

/// True for patterns that name a single file rather than a glob
fn is_literal(pattern: &str) -> bool {
    !pattern.contains(['*', '?', '['])
}

/// Validates the styleguide layout a deploy plan points at
pub struct SiteValidator;

impl Default for SiteValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate the layout consumed by the plan's two publish steps.
    ///
    /// Missing docs directory, entry HTML, or README are errors; a missing
    /// or empty `css`/`img` subdirectory and an empty README only warn.
    pub async fn validate(&self, plan: &DeployPlan) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let docs_dir = &plan.docs_request.source_dir;

        if !docs_dir.is_dir() {
            errors.push(ValidationError {
                field: "docs.dir".to_string(),
                message: format!("ドキュメントディレクトリが存在しません: {}", docs_dir.display()),
                severity: "error".to_string(),
            });
        } else {
            // Literal patterns (the entry HTML when defaulted) must resolve
            for pattern in plan.docs_request.patterns.iter().filter(|p| is_literal(p)) {
                if !docs_dir.join(pattern).is_file() {
                    errors.push(ValidationError {
                        field: "docs.entry".to_string(),
                        message: format!("エントリファイルが見つかりません: {}", pattern),
                        severity: "error".to_string(),
                    });
                }
            }

            Self::check_asset_dir(docs_dir, "css", &mut warnings);
            Self::check_asset_dir(docs_dir, "img", &mut warnings);
        }

        for pattern in plan.readme_request.patterns.iter().filter(|p| is_literal(p)) {
            let readme_path = plan.readme_request.source_dir.join(pattern);
            match tokio::fs::metadata(&readme_path).await {
                Ok(meta) if meta.is_file() => {
                    if meta.len() == 0 {
                        warnings.push(ValidationWarning {
                            field: "readme.file".to_string(),
                            message: format!("{}が空です", pattern),
                            severity: "warning".to_string(),
                        });
                    }
                }
                _ => {
                    errors.push(ValidationError {
                        field: "readme.file".to_string(),
                        message: format!("READMEが見つかりません: {}", pattern),
                        severity: "error".to_string(),
                    });
                }
            }
        }

        ValidationResult {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Warn when an expected asset subdirectory is missing or empty
    fn check_asset_dir(docs_dir: &Path, name: &str, warnings: &mut Vec<ValidationWarning>) {
        let dir = docs_dir.join(name);

        if !dir.is_dir() {
            warnings.push(ValidationWarning {
                field: format!("docs.{}", name),
                message: format!("{}ディレクトリがありません", name),
                severity: "warning".to_string(),
            });
            return;
        }

        let has_files = WalkDir::new(&dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .any(|e| e.file_type().is_file());

        if !has_files {
            warnings.push(ValidationWarning {
                field: format!("docs.{}", name),
                message: format!("{}ディレクトリが空です", name),
                severity: "warning".to_string(),
            });
        }
    }

    /// Format a validation result as human-readable console output
    pub fn format_result(result: &ValidationResult) -> String {
        let mut lines = Vec::new();

        if result.valid {
            lines.push("  ✅ Layout check passed".to_string());
        } else {
            lines.push("  ❌ Layout check failed".to_string());
        }

        for error in &result.errors {
            lines.push(format!("    - [{}] {}", error.field, error.message));
        }

        if !result.warnings.is_empty() {
            lines.push("  ⚠️  Warnings:".to_string());
            for warning in &result.warnings {
                lines.push(format!("    - [{}] {}", warning.field, warning.message));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DeployConfig;
    use std::fs;
    use tempfile::TempDir;

    fn full_fixture() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("README.md"), "# Styleguide\n").unwrap();
        fs::create_dir_all(root.join("docs/css")).unwrap();
        fs::create_dir_all(root.join("docs/img")).unwrap();
        fs::write(root.join("docs/index.html"), "<html></html>").unwrap();
        fs::write(root.join("docs/css/main.css"), "body {}").unwrap();
        fs::write(root.join("docs/img/logo.png"), [0u8; 4]).unwrap();

        temp_dir
    }

    async fn validate(root: &Path) -> ValidationResult {
        let plan = DeployConfig::default().resolve(root).unwrap();
        SiteValidator::new().validate(&plan).await
    }

    #[tokio::test]
    async fn test_complete_layout_is_valid() {
        let fixture = full_fixture();

        let result = validate(fixture.path()).await;

        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_missing_docs_dir_is_error() {
        let fixture = full_fixture();
        fs::remove_dir_all(fixture.path().join("docs")).unwrap();

        let result = validate(fixture.path()).await;

        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.field == "docs.dir"));
    }

    #[tokio::test]
    async fn test_missing_entry_html_is_error() {
        let fixture = full_fixture();
        fs::remove_file(fixture.path().join("docs/index.html")).unwrap();

        let result = validate(fixture.path()).await;

        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.field == "docs.entry"));
    }

    #[tokio::test]
    async fn test_missing_readme_is_error() {
        let fixture = full_fixture();
        fs::remove_file(fixture.path().join("README.md")).unwrap();

        let result = validate(fixture.path()).await;

        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.field == "readme.file"));
    }

    #[tokio::test]
    async fn test_empty_css_dir_warns() {
        let fixture = full_fixture();
        fs::remove_file(fixture.path().join("docs/css/main.css")).unwrap();

        let result = validate(fixture.path()).await;

        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.field == "docs.css"));
    }

    #[tokio::test]
    async fn test_missing_img_dir_warns() {
        let fixture = full_fixture();
        fs::remove_dir_all(fixture.path().join("docs/img")).unwrap();

        let result = validate(fixture.path()).await;

        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.field == "docs.img"));
    }

    #[tokio::test]
    async fn test_empty_readme_warns() {
        let fixture = full_fixture();
        fs::write(fixture.path().join("README.md"), "").unwrap();

        let result = validate(fixture.path()).await;

        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.field == "readme.file"));
    }

    #[tokio::test]
    async fn test_format_result_lists_errors() {
        let fixture = full_fixture();
        fs::remove_file(fixture.path().join("docs/index.html")).unwrap();

        let result = validate(fixture.path()).await;
        let formatted = SiteValidator::format_result(&result);

        assert!(formatted.contains("❌ Layout check failed"));
        assert!(formatted.contains("[docs.entry]"));
    }
}
