use jobdock_core::{JobSpec, PipelineConfig, Result};

/// Renders the shell script for one job: global `before_script` commands
/// followed by the job's own `script` commands, each newline-terminated.
///
/// With `keep_results`, `test.py` invocations in the job's commands are
/// rewritten to `test.py --keep || /bin/true` so a failing test run does not
/// abort the script when partial results are wanted. This is a literal
/// substring rewrite, not a shell-aware transform, and it does not apply to
/// `before_script`.
///
/// Pure function of its inputs; identical inputs yield byte-identical output.
pub fn generate_script(
    config: &PipelineConfig,
    job: &JobSpec<'_>,
    keep_results: bool,
) -> Result<String> {
    let mut script = String::new();

    for command in config.before_script()? {
        push_command(&mut script, &command);
    }

    for command in job.script()? {
        let command = if keep_results {
            command.replace("test.py", "test.py --keep || /bin/true")
        } else {
            command
        };
        push_command(&mut script, &command);
    }

    Ok(script)
}

/// Appends one command, expanding literal `\n` sequences (configs may encode
/// multi-line commands as a single scalar) and terminating with a newline.
fn push_command(script: &mut String, command: &str) {
    script.push_str(&command.replace("\\n", "\n"));
    if !command.ends_with('\n') {
        script.push('\n');
    }
}
