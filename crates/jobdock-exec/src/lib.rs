//! External process seams for jobdock.
//!
//! The version-control and container-build executables are invoked through
//! the narrow [`CommandExecutor`] trait so that planning and orchestration
//! code can be tested against scripted exit codes instead of real tools.

pub mod docker;
pub mod executor;
pub mod git;

pub use docker::{DockerClient, DockerError};
pub use executor::{CommandExecutor, ExecError, RealExecutor};
pub use git::{GitClient, GitError};
