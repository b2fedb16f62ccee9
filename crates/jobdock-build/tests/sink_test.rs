use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use jobdock_build::{ArtifactSink, BuildArtifacts, DirectorySink, DockerBuildSink};
use jobdock_exec::DockerClient;
use jobdock_exec::executor::{CommandExecutor, ExecError};
use mockall::mock;
use tempfile::TempDir;

mock! {
    Executor {}

    impl CommandExecutor for Executor {
        async fn status(&self, program: &str, args: &[String]) -> Result<i32, ExecError>;
        async fn status_with_stdin(
            &self,
            program: &str,
            args: &[String],
            stdin_data: &[u8],
        ) -> Result<i32, ExecError>;
    }
}

fn artifacts() -> BuildArtifacts {
    BuildArtifacts {
        script: "echo hi\n".to_owned(),
        dockerfile: "FROM ubuntu\nRUN /script.sh\n".to_owned(),
    }
}

/// What the mocked docker invocation observed: the `-f` Dockerfile path and
/// its content at the time of the call.
#[derive(Default)]
struct ObservedBuild {
    dockerfile_path: Option<PathBuf>,
    dockerfile_content: Option<String>,
    context: Option<PathBuf>,
}

fn observing_executor(code: i32, observed: Arc<Mutex<ObservedBuild>>) -> MockExecutor {
    let mut mock = MockExecutor::new();
    mock.expect_status().returning(move |_, args| {
        let mut seen = observed.lock().unwrap();
        if let Some(i) = args.iter().position(|a| a == "-f") {
            let path = PathBuf::from(&args[i + 1]);
            seen.dockerfile_content = std::fs::read_to_string(&path).ok();
            seen.dockerfile_path = Some(path);
        }
        seen.context = args.last().map(PathBuf::from);
        Ok(code)
    });
    mock
}

// ── DirectorySink ──

#[tokio::test]
async fn directory_sink_writes_both_artifacts() {
    let out = TempDir::new().unwrap();
    let mut sink = DirectorySink::new(out.path());

    let code = sink.emit(&artifacts()).await.unwrap();

    assert_eq!(code, 0);
    assert_eq!(
        std::fs::read_to_string(out.path().join("Dockerfile")).unwrap(),
        "FROM ubuntu\nRUN /script.sh\n"
    );
    assert_eq!(
        std::fs::read_to_string(out.path().join("script.sh")).unwrap(),
        "echo hi\n"
    );
}

#[tokio::test]
async fn directory_sink_fails_on_missing_directory() {
    let out = TempDir::new().unwrap();
    let mut sink = DirectorySink::new(out.path().join("does-not-exist"));

    assert!(sink.emit(&artifacts()).await.is_err());
}

// ── DockerBuildSink, stdin pipe ──

#[tokio::test]
async fn docker_sink_pipes_dockerfile_without_context() {
    let mut mock = MockExecutor::new();
    mock.expect_status_with_stdin()
        .withf(|program, args, stdin| {
            program == "docker"
                && args == ["build".to_owned(), "-".to_owned()]
                && stdin == b"FROM ubuntu\nRUN /script.sh\n"
        })
        .returning(|_, _, _| Ok(0));
    let docker = DockerClient::with_executor(mock);

    let mut sink = DockerBuildSink::new(&docker, None, None);
    let code = sink.emit(&artifacts()).await.unwrap();

    assert_eq!(code, 0);
}

#[tokio::test]
async fn docker_sink_forwards_tag() {
    let mut mock = MockExecutor::new();
    mock.expect_status_with_stdin()
        .withf(|_, args, _| {
            args == [
                "build".to_owned(),
                "-t".to_owned(),
                "ci:job".to_owned(),
                "-".to_owned(),
            ]
        })
        .returning(|_, _, _| Ok(0));
    let docker = DockerClient::with_executor(mock);

    let mut sink = DockerBuildSink::new(&docker, None, Some("ci:job".to_owned()));
    sink.emit(&artifacts()).await.unwrap();
}

// ── DockerBuildSink, filesystem context ──

#[tokio::test]
async fn docker_sink_stages_dockerfile_beside_context() {
    let context = TempDir::new().unwrap();
    let observed = Arc::new(Mutex::new(ObservedBuild::default()));
    let docker = DockerClient::with_executor(observing_executor(0, observed.clone()));

    let mut sink = DockerBuildSink::new(&docker, Some(context.path().to_path_buf()), None);
    let code = sink.emit(&artifacts()).await.unwrap();
    assert_eq!(code, 0);

    let seen = observed.lock().unwrap();
    // The build saw the full Dockerfile through the -f path...
    assert_eq!(
        seen.dockerfile_content.as_deref(),
        Some("FROM ubuntu\nRUN /script.sh\n")
    );
    // ...against the local tree as context...
    assert_eq!(seen.context.as_deref(), Some(context.path()));
    // ...and the temp file is gone once emit returns.
    assert!(!seen.dockerfile_path.as_deref().unwrap_or(Path::new("/")).exists());
}

#[tokio::test]
async fn docker_sink_removes_temp_dockerfile_on_build_failure() {
    let context = TempDir::new().unwrap();
    let observed = Arc::new(Mutex::new(ObservedBuild::default()));
    let docker = DockerClient::with_executor(observing_executor(3, observed.clone()));

    let mut sink = DockerBuildSink::new(&docker, Some(context.path().to_path_buf()), None);
    let code = sink.emit(&artifacts()).await.unwrap();

    // The build tool's exit code comes back verbatim.
    assert_eq!(code, 3);

    let seen = observed.lock().unwrap();
    let staged = seen.dockerfile_path.clone().unwrap();
    assert!(!staged.exists());
}
