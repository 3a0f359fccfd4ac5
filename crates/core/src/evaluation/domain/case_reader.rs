use std::path::Path;

use super::evaluation_case::EvaluationCase;

/// Domain interface for loading evaluation cases from storage.
pub trait CaseReader: Send {
    fn read_cases(&self, path: &Path) -> Result<Vec<EvaluationCase>, Box<dyn std::error::Error>>;
}
