use std::path::{Path, PathBuf};

use anyhow::Context;
use jobdock_build::{
    AcquisitionPlan, ArtifactSink, BuildArtifacts, DirectorySink, DockerBuildSink,
    DockerfileGenerator, generate_script, plan_acquisition,
};
use jobdock_core::{BuildRequest, PipelineConfig};
use jobdock_exec::{DockerClient, GitClient};

/// Execute one build request end to end. Returns the process exit code:
/// 0 for directory emission, the build tool's own code for streaming builds.
pub async fn build(cfg_path: &Path, request: BuildRequest) -> anyhow::Result<i32> {
    request.validate()?;

    let config = PipelineConfig::load(cfg_path)?;
    let job = config.job(&request.job)?;

    let git = GitClient::new();
    let plan = plan_acquisition(&request, &git).await?;

    let script = generate_script(&config, &job, request.keep)?;
    let generator = DockerfileGenerator::new(&request, &config, &job, &plan);

    match &request.out_dir {
        // Directory mode: materialize the artifacts, run nothing.
        Some(out_dir) => {
            let dockerfile = generator.render(None)?;
            let mut sink = DirectorySink::new(out_dir);
            let code = sink
                .emit(&BuildArtifacts { script, dockerfile })
                .await?;
            println!("Wrote Dockerfile and script.sh to {}", out_dir.display());
            Ok(code)
        }
        // Streaming mode: embed the script and hand the Dockerfile straight
        // to docker build.
        None => {
            let dockerfile = generator.render(Some(&script))?;
            let context = build_context(&plan)?;
            let docker = DockerClient::new();
            let mut sink = DockerBuildSink::new(&docker, context, request.tag.clone());
            let code = sink
                .emit(&BuildArtifacts { script, dockerfile })
                .await?;
            Ok(code)
        }
    }
}

/// The filesystem context handed to the build tool, when the plan copies
/// local files in. Remote clones need none and build from stdin alone.
fn build_context(plan: &AcquisitionPlan) -> anyhow::Result<Option<PathBuf>> {
    let dir = match plan {
        AcquisitionPlan::CloneRemote { .. } => return Ok(None),
        AcquisitionPlan::RecloneLocalGit { git_dir } => git_dir,
        AcquisitionPlan::CopyLocalTree { path } => path,
    };
    let dir = std::path::absolute(dir)
        .with_context(|| format!("failed to resolve build context {}", dir.display()))?;
    Ok(Some(dir))
}
