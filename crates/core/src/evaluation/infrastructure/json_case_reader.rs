use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::evaluation::domain::case_reader::CaseReader;
use crate::evaluation::domain::evaluation_case::EvaluationCase;
use crate::shared::constants::JSONL_CASE_EXTENSIONS;

#[derive(Error, Debug)]
pub enum CaseReadError {
    #[error("failed to read cases from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid case file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid case on line {line} of {path}: {source}")]
    JsonLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads evaluation cases from JSON files.
///
/// `.jsonl` / `.ndjson` files hold one case object per line (blank lines
/// are ignored); anything else must be a JSON array of case objects.
#[derive(Debug, Default)]
pub struct JsonCaseReader;

impl JsonCaseReader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<Vec<EvaluationCase>, CaseReadError> {
        let contents = fs::read_to_string(path).map_err(|source| CaseReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let cases = if is_json_lines(path) {
            parse_lines(path, &contents)?
        } else {
            serde_json::from_str(&contents).map_err(|source| CaseReadError::Json {
                path: path.to_path_buf(),
                source,
            })?
        };

        log::debug!("Loaded {} cases from {}", cases.len(), path.display());
        Ok(cases)
    }
}

impl CaseReader for JsonCaseReader {
    fn read_cases(&self, path: &Path) -> Result<Vec<EvaluationCase>, Box<dyn std::error::Error>> {
        Ok(self.load(path)?)
    }
}

fn is_json_lines(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| JSONL_CASE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn parse_lines(path: &Path, contents: &str) -> Result<Vec<EvaluationCase>, CaseReadError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| CaseReadError::JsonLine {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })
        })
        .collect()
}
