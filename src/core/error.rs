//! Error handling for styleguide publishing
//!
//! This module provides the domain error types with recovery guidance
//! using the thiserror crate for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for deploy operations
#[derive(Error, Debug)]
pub enum DeployError {
    // Publish step errors
    #[error("[docs] ドキュメントの公開に失敗しました: {message}")]
    DocsPublishFailed { message: String },

    #[error("[readme] READMEの公開に失敗しました: {message}")]
    ReadmePublishFailed { message: String },

    // Source errors
    #[error("ソースディレクトリが見つかりません: {path}")]
    SourceDirMissing { path: PathBuf },

    #[error("パターンに一致するファイルがありません: {patterns}")]
    NoFilesMatched { patterns: String },

    #[error("無効なincludeパターンです: {pattern}")]
    InvalidPattern { pattern: String },

    // Configuration errors
    #[error("設定の読み込みに失敗しました: {message}")]
    ConfigError { message: String },

    #[error("無効なブランチ名です: {name}")]
    InvalidBranchName { name: String },

    #[error("無効なリモート名です: {name}")]
    InvalidRemoteName { name: String },

    // Filesystem errors
    #[error("ファイル操作に失敗しました: {message}")]
    FileOperationFailed { message: String },

    // Git errors
    #[error("gitコマンドの実行に失敗しました: {message}")]
    GitCommandFailed { message: String },

    #[error("ステージング用ワークツリーの準備に失敗しました: {message}")]
    WorktreeSetupFailed { message: String },

    #[error("公開ブランチへのpushに失敗しました: {message}")]
    PushFailed { message: String },
}

impl DeployError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::SourceDirMissing { .. } | Self::InvalidPattern { .. }
        )
    }

    /// Get suggested actions for this error
    pub fn suggested_actions(&self) -> Vec<&'static str> {
        match self {
            Self::DocsPublishFailed { .. } => vec![
                "エラーメッセージを確認してください",
                "docsディレクトリの内容を確認してください",
            ],
            Self::ReadmePublishFailed { .. } => vec![
                "エラーメッセージを確認してください",
                "リポジトリルートにREADME.mdが存在するか確認してください",
            ],
            Self::SourceDirMissing { .. } => {
                vec!["ソースディレクトリのパスを確認してください"]
            }
            Self::NoFilesMatched { .. } => vec![
                "includeパターンを確認してください",
                "ソースディレクトリにファイルが存在するか確認してください",
            ],
            Self::InvalidPattern { .. } => {
                vec!["glob形式（例: css/**/*.css）で指定してください"]
            }
            Self::ConfigError { .. } => {
                vec![".pages-publisher.ymlの構文を確認してください"]
            }
            Self::InvalidBranchName { .. } => {
                vec!["英数字とハイフン、スラッシュのみ使用可能です（例: gh-pages）"]
            }
            Self::InvalidRemoteName { .. } => {
                vec!["リモート名を確認してください（例: origin）"]
            }
            Self::FileOperationFailed { .. } => vec![
                "ファイルの権限を確認してください",
                "ディスク容量を確認してください",
            ],
            Self::GitCommandFailed { .. } => vec![
                "コマンドの出力を確認してください",
                "gitがインストールされているか確認してください",
            ],
            Self::WorktreeSetupFailed { .. } => vec![
                "git worktree listで残留ワークツリーを確認してください",
                "git worktree pruneで掃除してください",
            ],
            Self::PushFailed { .. } => vec![
                "ネットワーク接続を確認してください",
                "リモートへのpush権限を確認してください",
            ],
        }
    }

    /// Get error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::DocsPublishFailed { .. } => "DOCS_PUBLISH_FAILED",
            Self::ReadmePublishFailed { .. } => "README_PUBLISH_FAILED",
            Self::SourceDirMissing { .. } => "SOURCE_DIR_MISSING",
            Self::NoFilesMatched { .. } => "NO_FILES_MATCHED",
            Self::InvalidPattern { .. } => "INVALID_PATTERN",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::InvalidBranchName { .. } => "INVALID_BRANCH_NAME",
            Self::InvalidRemoteName { .. } => "INVALID_REMOTE_NAME",
            Self::FileOperationFailed { .. } => "FILE_OPERATION_FAILED",
            Self::GitCommandFailed { .. } => "GIT_COMMAND_FAILED",
            Self::WorktreeSetupFailed { .. } => "WORKTREE_SETUP_FAILED",
            Self::PushFailed { .. } => "PUSH_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docs_publish_failed_error() {
        let error = DeployError::DocsPublishFailed {
            message: "remote hung up".to_string(),
        };

        assert!(error.is_recoverable());
        assert_eq!(error.code(), "DOCS_PUBLISH_FAILED");
        assert!(error.suggested_actions().len() > 0);
        let display = error.to_string();
        assert!(display.contains("[docs]"));
        assert!(display.contains("remote hung up"));
    }

    #[test]
    fn test_readme_publish_failed_error() {
        let error = DeployError::ReadmePublishFailed {
            message: "nothing staged".to_string(),
        };

        assert_eq!(error.code(), "README_PUBLISH_FAILED");
        assert!(error.to_string().contains("[readme]"));
    }

    #[test]
    fn test_source_dir_missing_not_recoverable() {
        let error = DeployError::SourceDirMissing {
            path: PathBuf::from("docs"),
        };

        assert!(!error.is_recoverable());
        assert_eq!(error.code(), "SOURCE_DIR_MISSING");
        assert!(error.to_string().contains("docs"));
    }

    #[test]
    fn test_no_files_matched_error() {
        let error = DeployError::NoFilesMatched {
            patterns: "index.html, css/**/*.css".to_string(),
        };

        assert!(error.is_recoverable());
        let actions = error.suggested_actions();
        assert!(actions.iter().any(|&a| a.contains("include")));
    }

    #[test]
    fn test_invalid_branch_name_error() {
        let error = DeployError::InvalidBranchName {
            name: "-bad".to_string(),
        };

        assert_eq!(error.code(), "INVALID_BRANCH_NAME");
        assert!(
            error
                .suggested_actions()
                .iter()
                .any(|&a| a.contains("gh-pages"))
        );
    }

    #[test]
    fn test_git_command_failed_with_message() {
        let error = DeployError::GitCommandFailed {
            message: "fatal: not a git repository".to_string(),
        };

        assert!(error.is_recoverable());
        assert!(error.to_string().contains("not a git repository"));
    }

    #[test]
    fn test_push_failed_error() {
        let error = DeployError::PushFailed {
            message: "connection reset".to_string(),
        };

        assert_eq!(error.code(), "PUSH_FAILED");
        let actions = error.suggested_actions();
        assert!(actions.iter().any(|&a| a.contains("push権限")));
    }

    #[test]
    fn test_config_error_display() {
        let error = DeployError::ConfigError {
            message: "unexpected key".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("設定"));
        assert!(display.contains("unexpected key"));
    }
}
