//! Script and Dockerfile generation for jobdock.
//!
//! # Build pipeline
//!
//! ```text
//! jobdock <cfgfile> <jobname>
//!   1. Script      ── generate_script(): before_script + job script
//!   2. Plan        ── plan_acquisition(): clone | reclone | copy
//!   3. Dockerfile  ── DockerfileGenerator::render()
//!   4. Emit        ── DirectorySink (files) | DockerBuildSink (docker build)
//! ```
//!
//! # Acquisition strategy
//!
//! How source reaches the build context is decided once, up front:
//! - no local tree: clone the remote repository inside the build
//! - local tree, clean git checkout: copy only `.git` in and re-clone it,
//!   skipping build artifacts and ignored files in the working tree
//! - local tree otherwise: copy the whole tree (uncommitted changes would be
//!   lost by a reclone)

pub mod dockerfile;
pub mod emit;
pub mod script;
pub mod source;

pub use dockerfile::DockerfileGenerator;
pub use emit::{ArtifactSink, BuildArtifacts, DirectorySink, DockerBuildSink, EmitError};
pub use script::generate_script;
pub use source::{AcquisitionPlan, plan_acquisition};
