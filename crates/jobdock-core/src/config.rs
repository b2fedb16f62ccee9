use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Read-only view over a parsed pipeline configuration document.
///
/// The document is kept as a generic YAML tree rather than deserialized into
/// a fixed record type: unknown keys are ignored, and required keys fail only
/// when accessed. A job missing its `script` entry is therefore not caught at
/// load time; the error surfaces on [`JobSpec::script`].
#[derive(Debug)]
pub struct PipelineConfig {
    doc: Value,
}

impl PipelineConfig {
    /// Load a pipeline configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let doc = serde_yaml::from_str(&text).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self { doc })
    }

    /// Parse a pipeline configuration from YAML text already in memory.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let doc = serde_yaml::from_str(text).map_err(|e| Error::ConfigParse {
            path: PathBuf::from("<inline>"),
            source: e,
        })?;
        Ok(Self { doc })
    }

    /// Look up a job by name.
    pub fn job(&self, name: &str) -> Result<JobSpec<'_>> {
        let node = self.doc.get(name).ok_or_else(|| Error::JobNotFound {
            name: name.to_owned(),
        })?;
        Ok(JobSpec {
            name: name.to_owned(),
            node,
        })
    }

    /// Global `variables`, in document order. Empty when the section is
    /// absent.
    pub fn global_variables(&self) -> Result<Vec<(String, String)>> {
        match self.doc.get("variables") {
            Some(node) => variable_entries("variables", node),
            None => Ok(Vec::new()),
        }
    }

    /// Global `before_script` commands. Empty when the section is absent.
    pub fn before_script(&self) -> Result<Vec<String>> {
        match self.doc.get("before_script") {
            Some(node) => command_entries("before_script", node),
            None => Ok(Vec::new()),
        }
    }
}

/// Borrowed view over a single job entry in the pipeline configuration.
#[derive(Debug)]
pub struct JobSpec<'a> {
    name: String,
    node: &'a Value,
}

impl JobSpec<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The job's base container image.
    pub fn image(&self) -> Result<&str> {
        match self.node.get("image") {
            Some(Value::String(image)) => Ok(image),
            Some(_) => Err(Error::InvalidField {
                field: format!("{}.image", self.name),
                expected: "a string",
            }),
            None => Err(Error::MissingField {
                job: self.name.clone(),
                field: "image",
            }),
        }
    }

    /// Job-scoped `variables`, in document order. Empty when absent.
    pub fn variables(&self) -> Result<Vec<(String, String)>> {
        match self.node.get("variables") {
            Some(node) => variable_entries(&format!("{}.variables", self.name), node),
            None => Ok(Vec::new()),
        }
    }

    /// The job's `script` commands. A job without a script fails here, on
    /// access.
    pub fn script(&self) -> Result<Vec<String>> {
        match self.node.get("script") {
            Some(node) => command_entries(&format!("{}.script", self.name), node),
            None => Err(Error::MissingField {
                job: self.name.clone(),
                field: "script",
            }),
        }
    }
}

/// The YAML scalar text of a value, for variable rendering. Numbers and
/// booleans appear unquoted in real-world configs and keep their scalar form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn variable_entries(field: &str, node: &Value) -> Result<Vec<(String, String)>> {
    let mapping = node.as_mapping().ok_or_else(|| Error::InvalidField {
        field: field.to_owned(),
        expected: "a mapping",
    })?;
    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = key.as_str().ok_or_else(|| Error::InvalidField {
            field: field.to_owned(),
            expected: "a mapping with string keys",
        })?;
        let value = scalar_text(value).ok_or_else(|| Error::InvalidField {
            field: format!("{field}.{key}"),
            expected: "a scalar value",
        })?;
        entries.push((key.to_owned(), value));
    }
    Ok(entries)
}

fn command_entries(field: &str, node: &Value) -> Result<Vec<String>> {
    let sequence = node.as_sequence().ok_or_else(|| Error::InvalidField {
        field: field.to_owned(),
        expected: "a sequence",
    })?;
    sequence
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| Error::InvalidField {
                    field: field.to_owned(),
                    expected: "a sequence of strings",
                })
        })
        .collect()
}
