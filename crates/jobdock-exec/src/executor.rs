/// Abstraction over external command execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks
/// returning scripted exit codes.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor: Send + Sync {
    /// Run a command with inherited stdio and return its exit code.
    async fn status(&self, program: &str, args: &[String]) -> Result<i32, ExecError>;

    /// Run a command with data piped to its stdin, stdout/stderr inherited,
    /// and return its exit code. Stdin is closed before waiting so the child
    /// sees end-of-stream.
    async fn status_with_stdin(
        &self,
        program: &str,
        args: &[String],
        stdin_data: &[u8],
    ) -> Result<i32, ExecError>;
}

/// Real subprocess executor.
pub struct RealExecutor;

impl CommandExecutor for RealExecutor {
    async fn status(&self, program: &str, args: &[String]) -> Result<i32, ExecError> {
        let status = tokio::process::Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(|e| ExecError::Spawn {
                program: program.to_owned(),
                source: e,
            })?;

        Ok(exit_code(status))
    }

    async fn status_with_stdin(
        &self,
        program: &str,
        args: &[String],
        stdin_data: &[u8],
    ) -> Result<i32, ExecError> {
        use std::process::Stdio;
        use tokio::io::AsyncWriteExt;

        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| ExecError::Spawn {
                program: program.to_owned(),
                source: e,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(stdin_data)
                .await
                .map_err(|e| ExecError::StdinWrite {
                    program: program.to_owned(),
                    source: e,
                })?;
            stdin
                .shutdown()
                .await
                .map_err(|e| ExecError::StdinWrite {
                    program: program.to_owned(),
                    source: e,
                })?;
        }

        let status = child.wait().await.map_err(|e| ExecError::Spawn {
            program: program.to_owned(),
            source: e,
        })?;

        Ok(exit_code(status))
    }
}

/// A child killed by a signal has no exit code; report it as a plain failure.
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("failed to run '{program}' — is it installed?")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to write to '{program}' stdin")]
    StdinWrite {
        program: String,
        source: std::io::Error,
    },
}
