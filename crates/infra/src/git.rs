//! Git-backed schedule publishing
//!
//! Thin wrapper over the `git` binary. The schedule tree is an ordinary
//! clone; every run stages whatever changed, commits once, and pushes. A run
//! with no content changes commits nothing and skips the push.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use slotgrid_core::SchedulePublisher;
use slotgrid_domain::{Result, SlotgridError};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::InfraError;

/// Handle to the local schedule repository.
pub struct GitRepository {
    path: PathBuf,
    branch: String,
    remote_url: String,
}

impl GitRepository {
    pub fn new(path: impl Into<PathBuf>, branch: impl Into<String>, remote_url: impl Into<String>) -> Self {
        Self { path: path.into(), branch: branch.into(), remote_url: remote_url.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Clone the remote into the configured path.
    ///
    /// Refuses to clone over an existing path; callers decide whether an
    /// existing tree should be pulled instead.
    pub async fn clone_repo(&self) -> Result<()> {
        if self.path.exists() {
            return Err(SlotgridError::Git(format!(
                "destination path already exists: {}",
                self.path.display()
            )));
        }

        debug!(remote = %self.remote_url, path = %self.path.display(), branch = %self.branch, "cloning schedule repository");
        run_git(&[
            "clone",
            "--branch",
            &self.branch,
            &self.remote_url,
            &self.path.to_string_lossy(),
        ])
        .await?;
        Ok(())
    }

    /// Fast-forward the local tree from the remote.
    pub async fn pull(&self) -> Result<()> {
        self.run_in_repo(&["pull", "origin", &self.branch]).await?;
        Ok(())
    }

    async fn run_in_repo(&self, args: &[&str]) -> Result<String> {
        let path = self.path.to_string_lossy();
        let mut full: Vec<&str> = vec!["-C", &path];
        full.extend_from_slice(args);
        run_git(&full).await
    }
}

#[async_trait]
impl SchedulePublisher for GitRepository {
    async fn prepare(&self) -> Result<()> {
        if self.path.exists() {
            self.pull().await
        } else {
            self.clone_repo().await
        }
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let full_path = self.path.join(path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }
        tokio::fs::write(&full_path, content).await.map_err(InfraError::from)?;
        debug!(path, "wrote schedule document");
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<bool> {
        self.run_in_repo(&["add", "."]).await?;

        let status = self.run_in_repo(&["status", "--porcelain"]).await?;
        if status.trim().is_empty() {
            info!("no schedule changes to commit");
            return Ok(false);
        }

        self.run_in_repo(&["commit", "-m", message]).await?;
        Ok(true)
    }

    async fn push(&self) -> Result<()> {
        self.run_in_repo(&["push", "origin", &self.branch]).await?;
        info!(branch = %self.branch, "pushed schedule changes");
        Ok(())
    }
}

/// Run a git command, returning stdout on success and the combined output in
/// the error otherwise.
async fn run_git(args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .output()
        .await
        .map_err(|err| SlotgridError::Git(format!("failed to spawn git: {err}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        return Err(SlotgridError::Git(format!(
            "git {} failed: {}{}",
            args.first().unwrap_or(&"?"),
            stderr.trim(),
            stdout.trim(),
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
