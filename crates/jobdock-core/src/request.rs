use std::path::PathBuf;

use crate::error::{Error, Result};

/// The resolved intent for one invocation, built once from the command line
/// and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    /// Name of the job to build.
    pub job: String,
    /// Branch cloned when no local tree is given.
    pub branch: String,
    /// Repository cloned when no local tree is given.
    pub repo_url: Option<String>,
    /// Local source tree to build from instead of cloning.
    pub local_tree: Option<PathBuf>,
    /// Materialize Dockerfile and script here instead of building.
    pub out_dir: Option<PathBuf>,
    /// Override for the job's base container image.
    pub image: Option<String>,
    /// Tag applied to the built container.
    pub tag: Option<String>,
    /// Rewrite test.py invocations to keep results of failing runs.
    pub keep: bool,
    /// Skip running the installed script during the container build.
    pub noscript: bool,
}

impl BuildRequest {
    /// Reject unusable flag combinations before any artifact is generated.
    ///
    /// Directory mode is file emission only: there is no build-tool
    /// invocation to tag, and no filesystem context to copy a local tree
    /// from. `noscript` with an output directory is a benign no-op and is
    /// deliberately accepted.
    pub fn validate(&self) -> Result<()> {
        if self.out_dir.is_some() && (self.tag.is_some() || self.local_tree.is_some()) {
            return Err(Error::IncompatibleFlags);
        }
        if self.local_tree.is_none() && self.repo_url.is_none() {
            return Err(Error::MissingRepoUrl);
        }
        Ok(())
    }
}
