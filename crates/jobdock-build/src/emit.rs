use std::io::Write;
use std::path::PathBuf;

use jobdock_exec::{CommandExecutor, DockerClient, DockerError};
use tempfile::NamedTempFile;

/// The generated build inputs: the job's shell script and the Dockerfile
/// that runs it.
#[derive(Debug, Clone)]
pub struct BuildArtifacts {
    pub script: String,
    pub dockerfile: String,
}

/// Destination for generated artifacts: files on disk, or a build-tool
/// process consuming them directly.
#[allow(async_fn_in_trait)]
pub trait ArtifactSink {
    /// Consume the artifacts and return the exit code to report.
    async fn emit(&mut self, artifacts: &BuildArtifacts) -> Result<i32, EmitError>;
}

/// Writes `Dockerfile` and `script.sh` into a directory; no build is run.
pub struct DirectorySink {
    out_dir: PathBuf,
}

impl DirectorySink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl ArtifactSink for DirectorySink {
    async fn emit(&mut self, artifacts: &BuildArtifacts) -> Result<i32, EmitError> {
        let dockerfile_path = self.out_dir.join("Dockerfile");
        std::fs::write(&dockerfile_path, &artifacts.dockerfile).map_err(|e| {
            EmitError::WriteArtifact {
                path: dockerfile_path.clone(),
                source: e,
            }
        })?;

        let script_path = self.out_dir.join("script.sh");
        std::fs::write(&script_path, &artifacts.script).map_err(|e| EmitError::WriteArtifact {
            path: script_path.clone(),
            source: e,
        })?;

        Ok(0)
    }
}

/// Streams the Dockerfile into `docker build`.
///
/// With a build context (local-tree plans) the Dockerfile goes through a
/// temporary file referenced with `-f`; the file is removed once the build
/// has been awaited, on success and failure alike. Without a context the
/// Dockerfile is piped over stdin and nothing touches disk.
pub struct DockerBuildSink<'a, E: CommandExecutor> {
    docker: &'a DockerClient<E>,
    context: Option<PathBuf>,
    tag: Option<String>,
}

impl<'a, E: CommandExecutor> DockerBuildSink<'a, E> {
    pub fn new(docker: &'a DockerClient<E>, context: Option<PathBuf>, tag: Option<String>) -> Self {
        Self {
            docker,
            context,
            tag,
        }
    }
}

impl<E: CommandExecutor> ArtifactSink for DockerBuildSink<'_, E> {
    async fn emit(&mut self, artifacts: &BuildArtifacts) -> Result<i32, EmitError> {
        match &self.context {
            Some(context) => {
                let mut dockerfile =
                    NamedTempFile::new().map_err(|e| EmitError::TempFile { source: e })?;
                dockerfile
                    .write_all(artifacts.dockerfile.as_bytes())
                    .map_err(|e| EmitError::TempFile { source: e })?;

                // `dockerfile` drops on every path out of this scope,
                // removing the temp file after the build has been awaited.
                let code = self
                    .docker
                    .build_with_context(dockerfile.path(), context, self.tag.as_deref())
                    .await?;

                Ok(code)
            }
            None => Ok(self
                .docker
                .build_from_stdin(&artifacts.dockerfile, self.tag.as_deref())
                .await?),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write {path}")]
    WriteArtifact {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to stage temporary Dockerfile")]
    TempFile { source: std::io::Error },

    #[error("could not invoke the container build tool")]
    Docker {
        #[from]
        source: DockerError,
    },
}
