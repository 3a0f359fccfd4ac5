use serde::{Deserialize, Serialize};

/// One named reference/hypothesis pair to score.
///
/// Also accepts the field names used by ground-truth test sets:
/// `audio_file`, `ground_truth_transcription` and `transcription`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationCase {
    #[serde(default, alias = "audio_file", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(alias = "ground_truth_transcription")]
    pub reference: String,
    #[serde(alias = "transcription")]
    pub hypothesis: String,
}

impl EvaluationCase {
    pub fn new(name: Option<&str>, reference: &str, hypothesis: &str) -> Self {
        Self {
            name: name.map(str::to_string),
            reference: reference.to_string(),
            hypothesis: hypothesis.to_string(),
        }
    }

    /// The case name, or `case-<index>` (1-based) when unnamed.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("case-{}", index + 1),
        }
    }
}
