use std::path::Path;

use crate::executor::{CommandExecutor, ExecError, RealExecutor};

/// Container-build client, parameterized over the executor for testability.
///
/// Non-zero build exit codes are not errors here: they are returned as-is so
/// the caller can propagate the build tool's own exit code verbatim.
pub struct DockerClient<E: CommandExecutor = RealExecutor> {
    executor: E,
}

impl DockerClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for DockerClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> DockerClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Run `docker build` with the Dockerfile piped on stdin and no build
    /// context. Returns the build's exit code.
    pub async fn build_from_stdin(
        &self,
        dockerfile: &str,
        tag: Option<&str>,
    ) -> Result<i32, DockerError> {
        let mut args = vec!["build".to_owned()];
        if let Some(tag) = tag {
            args.push("-t".to_owned());
            args.push(tag.to_owned());
        }
        args.push("-".to_owned());

        self.executor
            .status_with_stdin("docker", &args, dockerfile.as_bytes())
            .await
            .map_err(|e| DockerError::Unavailable { source: e })
    }

    /// Run `docker build` with an explicit Dockerfile path against `context`.
    /// Returns the build's exit code.
    pub async fn build_with_context(
        &self,
        dockerfile: &Path,
        context: &Path,
        tag: Option<&str>,
    ) -> Result<i32, DockerError> {
        let mut args = vec!["build".to_owned()];
        if let Some(tag) = tag {
            args.push("-t".to_owned());
            args.push(tag.to_owned());
        }
        args.push("-f".to_owned());
        args.push(dockerfile.to_string_lossy().into_owned());
        args.push(context.to_string_lossy().into_owned());

        self.executor
            .status("docker", &args)
            .await
            .map_err(|e| DockerError::Unavailable { source: e })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DockerError {
    #[error("docker CLI not available — install: https://docs.docker.com/get-docker/")]
    Unavailable { source: ExecError },
}
