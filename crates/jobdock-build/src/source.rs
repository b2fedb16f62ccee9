use std::path::PathBuf;

use jobdock_core::{BuildRequest, Error, Result};
use jobdock_exec::{CommandExecutor, GitClient};
use tracing::warn;

/// How source code reaches the build context. Derived once per request and
/// consumed read-only by the Dockerfile generator and the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionPlan {
    /// Clone the remote repository inside the build, as CI itself would.
    CloneRemote { branch: String, repo_url: String },
    /// The local tree is a clean git checkout: transfer only its `.git`
    /// metadata and re-clone inside the build, skipping build artifacts and
    /// ignored files in the working tree.
    RecloneLocalGit { git_dir: PathBuf },
    /// Copy the full local tree. Fallback for trees that are not git
    /// repositories and for checkouts with uncommitted changes, which a
    /// reclone would silently lose.
    CopyLocalTree { path: PathBuf },
}

/// Decide how the build will acquire its source tree.
///
/// The dirty check is attempted exactly once; failure to run git at all is
/// treated like a dirty tree and falls back to copying the full tree rather
/// than aborting the build.
pub async fn plan_acquisition<E: CommandExecutor>(
    request: &BuildRequest,
    git: &GitClient<E>,
) -> Result<AcquisitionPlan> {
    let Some(tree) = &request.local_tree else {
        let repo_url = request.repo_url.clone().ok_or(Error::MissingRepoUrl)?;
        return Ok(AcquisitionPlan::CloneRemote {
            branch: request.branch.clone(),
            repo_url,
        });
    };

    let git_dir = tree.join(".git");
    if !git_dir.is_dir() {
        return Ok(AcquisitionPlan::CopyLocalTree { path: tree.clone() });
    }

    match git.is_worktree_clean(tree).await {
        Ok(true) => Ok(AcquisitionPlan::RecloneLocalGit { git_dir }),
        Ok(false) => {
            warn!(
                tree = %tree.display(),
                "local tree looks like a git repository but has uncommitted changes, copying the entire tree to be safe"
            );
            Ok(AcquisitionPlan::CopyLocalTree { path: tree.clone() })
        }
        Err(e) => {
            warn!(
                tree = %tree.display(),
                error = %e,
                "could not check the local tree for uncommitted changes, copying the entire tree to be safe"
            );
            Ok(AcquisitionPlan::CopyLocalTree { path: tree.clone() })
        }
    }
}
