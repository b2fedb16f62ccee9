mod commands;

use std::path::PathBuf;

use clap::Parser;
use jobdock_core::BuildRequest;

#[derive(Parser)]
#[command(
    name = "jobdock",
    about = "Reproduce a CI pipeline job as a local container build"
)]
#[command(version)]
struct Cli {
    /// Branch of the repository to build
    #[arg(short, long, default_value = "master")]
    branch: String,

    /// Repository to clone inside the build
    #[arg(long, required_unless_present = "localtree")]
    repo: Option<String>,

    /// Local tree to build from instead of cloning
    #[arg(short, long)]
    localtree: Option<PathBuf>,

    /// Write the Dockerfile and script to this directory instead of building
    #[arg(short, long)]
    outdir: Option<PathBuf>,

    /// Rewrite test.py invocations to keep results of failing runs
    #[arg(short, long)]
    keep: bool,

    /// Override the job's base container image
    #[arg(short, long)]
    image: Option<String>,

    /// Do not run /script.sh during the container build
    #[arg(short, long)]
    noscript: bool,

    /// Tag to apply to the built container
    #[arg(short, long)]
    tag: Option<String>,

    /// Path to the pipeline configuration file
    cfgfile: PathBuf,

    /// Name of the job to build
    jobname: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let request = BuildRequest {
        job: cli.jobname,
        branch: cli.branch,
        repo_url: cli.repo,
        local_tree: cli.localtree,
        out_dir: cli.outdir,
        image: cli.image,
        tag: cli.tag,
        keep: cli.keep,
        noscript: cli.noscript,
    };

    let code = commands::build(&cli.cfgfile, request).await?;
    std::process::exit(code);
}
