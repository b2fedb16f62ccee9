use std::path::Path;

use crate::executor::{CommandExecutor, ExecError, RealExecutor};

/// Version-control client, parameterized over the executor for testability.
pub struct GitClient<E: CommandExecutor = RealExecutor> {
    executor: E,
}

impl GitClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for GitClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> GitClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Whether the working tree at `tree` has no uncommitted changes
    /// relative to HEAD.
    ///
    /// Runs `git diff-index --quiet HEAD`; exit 0 means clean, any other
    /// exit code means dirty.
    pub async fn is_worktree_clean(&self, tree: &Path) -> Result<bool, GitError> {
        let args = vec![
            "-C".to_owned(),
            tree.to_string_lossy().into_owned(),
            "diff-index".to_owned(),
            "--quiet".to_owned(),
            "HEAD".to_owned(),
        ];

        let code = self
            .executor
            .status("git", &args)
            .await
            .map_err(|e| GitError::Unavailable { source: e })?;

        Ok(code == 0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("git CLI not available")]
    Unavailable { source: ExecError },
}
