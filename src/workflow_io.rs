//! Load workflow sources and compiler settings from JSON, write compiled output.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::compiler::CompilerConfig;
use crate::types::WorkflowSource;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, std::io::Error> {
  let bytes = std::fs::read(path)?;
  serde_json::from_slice(&bytes)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Loads a [WorkflowSource] from `path`. Errors if the file is missing or not valid JSON.
#[instrument(level = "trace", skip(path), fields(path = %path.display()))]
pub fn load_workflow_source(path: &Path) -> Result<WorkflowSource, std::io::Error> {
  read_json(path)
}

/// Loads a [CompilerConfig] from `path`. Missing fields take their defaults.
#[instrument(level = "trace", skip(path), fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<CompilerConfig, std::io::Error> {
  read_json(path)
}

/// Writes `contents` to `path`, creating parent directories.
#[instrument(level = "trace", skip(path, contents), fields(path = %path.display()))]
pub fn write_output(path: &Path, contents: &str) -> Result<(), std::io::Error> {
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent)?;
    }
  }
  std::fs::write(path, contents)
}
