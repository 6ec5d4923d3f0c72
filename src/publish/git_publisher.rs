//! Git-backed pages publisher
//!
//! Implements [`PagesPublisher`] by staging the hosting branch in a
//! disposable worktree, applying replace or append semantics, committing
//! the matched files, and pushing to the configured remote.

use crate::core::error::DeployError;
use crate::core::traits::{PagesPublisher, PublishOutcome, PublishRequest};
use crate::publish::file_set::FileSet;
use crate::security::command_executor::SafeCommandExecutor;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// Default ceiling for a single git invocation
const GIT_TIMEOUT: Duration = Duration::from_secs(120);

/// Publishes file sets onto a git hosting branch
pub struct GitPagesPublisher {
    remote: String,
    branch: String,
    push: bool,
    executor: SafeCommandExecutor,
}

impl GitPagesPublisher {
    /// Create a publisher for the repository at `repo_root`.
    ///
    /// # Arguments
    ///
    /// * `repo_root` - Repository the hosting branch belongs to
    /// * `remote` - Remote the branch is pushed to
    /// * `branch` - Hosting branch name
    /// * `push` - Whether to push after committing
    pub fn new(
        repo_root: &Path,
        remote: &str,
        branch: &str,
        push: bool,
    ) -> Result<Self, DeployError> {
        let mut executor =
            SafeCommandExecutor::new(repo_root).map_err(|_| DeployError::SourceDirMissing {
                path: repo_root.to_path_buf(),
            })?;
        executor.set_timeout(GIT_TIMEOUT);

        Ok(Self {
            remote: remote.to_string(),
            branch: branch.to_string(),
            push,
            executor,
        })
    }

    /// Unique staging path under the system temp directory
    fn staging_path(&self) -> PathBuf {
        std::env::temp_dir().join(format!("pages-publisher-{}", Uuid::new_v4()))
    }

    /// True when the hosting branch exists locally
    async fn branch_exists(&self) -> Result<bool, DeployError> {
        let refname = format!("refs/heads/{}", self.branch);
        let output = self
            .executor
            .execute("git", &["show-ref", "--verify", "--quiet", &refname])
            .await
            .map_err(git_error)?;
        Ok(output.status.success())
    }

    /// Check out the hosting branch in a disposable worktree.
    ///
    /// A branch that only exists on the remote is fetched first; a branch
    /// that exists nowhere is created as an orphan so the first publish
    /// starts from empty history.
    async fn setup_worktree(&self, staging: &Path) -> Result<SafeCommandExecutor, DeployError> {
        if !self.branch_exists().await? {
            // The branch may exist on the remote only; a failed fetch just
            // means we create it fresh below.
            let refspec = format!("{}:{}", self.branch, self.branch);
            let _ = self
                .executor
                .execute("git", &["fetch", &self.remote, &refspec])
                .await;
        }

        let staging_str = staging.to_string_lossy().to_string();

        if self.branch_exists().await? {
            self.executor
                .execute_checked("git", &["worktree", "add", &staging_str, &self.branch])
                .await
                .map_err(worktree_error)?;

            let mut staged = SafeCommandExecutor::new(staging).map_err(worktree_error)?;
            staged.set_timeout(GIT_TIMEOUT);
            Ok(staged)
        } else {
            self.executor
                .execute_checked("git", &["worktree", "add", "--detach", &staging_str])
                .await
                .map_err(worktree_error)?;

            let mut staged = SafeCommandExecutor::new(staging).map_err(worktree_error)?;
            staged.set_timeout(GIT_TIMEOUT);

            staged
                .execute_checked("git", &["checkout", "--orphan", &self.branch])
                .await
                .map_err(worktree_error)?;
            staged
                .execute_checked("git", &["rm", "-r", "-q", "--ignore-unmatch", "."])
                .await
                .map_err(worktree_error)?;

            Ok(staged)
        }
    }

    /// Copy the matched files into the staging tree, commit, and push
    async fn stage_and_commit(
        &self,
        staged: &SafeCommandExecutor,
        staging: &Path,
        request: &PublishRequest,
        file_set: &FileSet,
    ) -> Result<PublishOutcome, DeployError> {
        if !request.append {
            // Replace semantics: drop everything the branch tracked
            staged
                .execute_checked("git", &["rm", "-r", "-q", "--ignore-unmatch", "."])
                .await
                .map_err(git_error)?;
        }

        for relative in file_set.files() {
            let target = staging.join(relative);
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| DeployError::FileOperationFailed {
                        message: format!("Failed to prepare staging tree: {}", e),
                    })?;
            }
            tokio::fs::copy(request.source_dir.join(relative), &target)
                .await
                .map_err(|e| DeployError::FileOperationFailed {
                    message: format!(
                        "Failed to copy {} into staging tree: {}",
                        relative.display(),
                        e
                    ),
                })?;
        }

        staged
            .execute_checked("git", &["add", "--all"])
            .await
            .map_err(git_error)?;

        let status = staged
            .execute_checked("git", &["status", "--porcelain"])
            .await
            .map_err(git_error)?;

        if status.is_empty() {
            // Branch already up to date; nothing to commit is a success
            return Ok(PublishOutcome {
                files_published: file_set.len(),
                commit: None,
                branch: self.branch.clone(),
                skipped: true,
                dry_run_files: None,
            });
        }

        staged
            .execute_checked("git", &["commit", "-q", "-m", &request.message])
            .await
            .map_err(git_error)?;

        let commit = staged
            .execute_checked("git", &["rev-parse", "--short", "HEAD"])
            .await
            .map_err(git_error)?;

        if self.push {
            staged
                .execute_checked("git", &["push", &self.remote, &self.branch])
                .await
                .map_err(|e| DeployError::PushFailed {
                    message: e.to_string(),
                })?;
        }

        Ok(PublishOutcome {
            files_published: file_set.len(),
            commit: Some(commit),
            branch: self.branch.clone(),
            skipped: false,
            dry_run_files: None,
        })
    }

    /// Remove the staging worktree; failures leave cleanup to `git worktree prune`
    async fn cleanup_worktree(&self, staging: &Path) {
        let staging_str = staging.to_string_lossy().to_string();
        let _ = self
            .executor
            .execute(
                "git",
                &["worktree", "remove", "--force", &staging_str],
            )
            .await;
    }
}

fn git_error(e: crate::security::command_executor::CommandError) -> DeployError {
    DeployError::GitCommandFailed {
        message: e.to_string(),
    }
}

fn worktree_error(e: crate::security::command_executor::CommandError) -> DeployError {
    DeployError::WorktreeSetupFailed {
        message: e.to_string(),
    }
}

#[async_trait]
impl PagesPublisher for GitPagesPublisher {
    fn name(&self) -> &str {
        "git"
    }

    async fn publish(&self, request: &PublishRequest) -> anyhow::Result<PublishOutcome> {
        let file_set = FileSet::expand(&request.source_dir, &request.patterns)?;

        if file_set.is_empty() {
            return Err(DeployError::NoFilesMatched {
                patterns: request.patterns_display(),
            }
            .into());
        }

        if request.dry_run {
            return Ok(PublishOutcome {
                files_published: file_set.len(),
                commit: None,
                branch: self.branch.clone(),
                skipped: false,
                dry_run_files: Some(file_set.display_list()),
            });
        }

        let staging = self.staging_path();
        let staged = self.setup_worktree(&staging).await?;

        let result = self
            .stage_and_commit(&staged, &staging, request, &file_set)
            .await;

        // Tear the worktree down on both paths
        self.cleanup_worktree(&staging).await;

        Ok(result?)
    }
}
