use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jobdock_core::{BuildRequest, JobSpec, PipelineConfig, Result};

use crate::source::AcquisitionPlan;

/// Base64 columns per line in the generated `RUN echo` step.
const BASE64_WRAP_COLS: usize = 76;

/// Renders the container build definition for one job and its acquisition
/// plan. Pure text generation; the external tools named in the output are
/// only ever run by the container build itself.
pub struct DockerfileGenerator<'a> {
    request: &'a BuildRequest,
    config: &'a PipelineConfig,
    job: &'a JobSpec<'a>,
    plan: &'a AcquisitionPlan,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(
        request: &'a BuildRequest,
        config: &'a PipelineConfig,
        job: &'a JobSpec<'a>,
        plan: &'a AcquisitionPlan,
    ) -> Self {
        Self {
            request,
            config,
            job,
            plan,
        }
    }

    /// Render the Dockerfile.
    ///
    /// With `embedded_script`, the script is carried inline as base64 so the
    /// whole Dockerfile can be piped to the build tool as a single stream
    /// with no auxiliary files. Without it, a sibling `script.sh` file is
    /// referenced instead, for directory emission. Exactly one of the two
    /// forms appears in the output.
    pub fn render(&self, embedded_script: Option<&str>) -> Result<String> {
        let mut out = String::new();

        let image = match &self.request.image {
            Some(image) => image.as_str(),
            None => self.job.image()?,
        };
        out.push_str(&format!("FROM {image}\n"));

        // Fix the shell for RUN steps regardless of base image defaults.
        out.push_str("SHELL [ \"/bin/bash\", \"-c\" ]\n");

        // Job entries are declared after globals; image environment is
        // last-write-wins, so job values win on key collision.
        let global_variables = self.config.global_variables()?;
        let job_variables = self.job.variables()?;
        for (key, value) in global_variables.iter().chain(job_variables.iter()) {
            out.push_str(&format!("ENV {key}=\"{value}\"\n"));
        }

        match embedded_script {
            Some(script) => {
                out.push_str("RUN echo \\\n");
                out.push_str(&wrap_base64(&STANDARD.encode(script)));
                out.push_str(" | base64 -d > script.sh\n");
            }
            None => out.push_str("COPY script.sh .\n"),
        }
        out.push_str("RUN chmod a+x ./script.sh\n");

        match self.plan {
            AcquisitionPlan::CloneRemote { branch, repo_url } => {
                out.push_str(&format!("RUN git clone -b {branch} {repo_url} repo\n"));
            }
            AcquisitionPlan::RecloneLocalGit { .. } => {
                // The build context is the tree's .git directory itself.
                out.push_str("COPY / localtree.git\n");
                out.push_str("RUN git clone localtree.git repo\n");
            }
            AcquisitionPlan::CopyLocalTree { .. } => {
                out.push_str("COPY / repo\n");
            }
        }
        out.push_str("WORKDIR \"/repo\"\n");

        if !self.request.noscript {
            out.push_str("RUN /script.sh\n");
        }

        Ok(out)
    }
}

/// Splits base64 text into 76-column lines joined by backslash-newline so
/// the `RUN echo` step stays readable while remaining one shell word.
fn wrap_base64(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len() + 2 * encoded.len() / BASE64_WRAP_COLS);
    for (i, ch) in encoded.chars().enumerate() {
        if i > 0 && i % BASE64_WRAP_COLS == 0 {
            out.push_str("\\\n");
        }
        out.push(ch);
    }
    out
}
