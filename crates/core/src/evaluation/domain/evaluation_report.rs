use serde::Serialize;

use crate::scoring::domain::edit_operation::EditCounts;
use crate::scoring::domain::word_error_rate::{error_rate, round_percentage, WerMeasurement};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseScore {
    pub name: String,
    pub measurement: WerMeasurement,
}

/// A case that could not be scored, with the reason why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCase {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportSummary {
    pub scored: usize,
    pub skipped: usize,
    pub reference_tokens: usize,
    pub counts: EditCounts,
    pub corpus_wer: Option<f64>,
    pub mean_wer: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    pub cases: Vec<CaseScore>,
    pub skipped: Vec<SkippedCase>,
}

impl EvaluationReport {
    pub fn total_counts(&self) -> EditCounts {
        let mut total = EditCounts::default();
        for case in &self.cases {
            total += case.measurement.counts;
        }
        total
    }

    pub fn total_reference_tokens(&self) -> usize {
        self.cases
            .iter()
            .map(|c| c.measurement.reference_tokens)
            .sum()
    }

    /// Pooled WER: all edits over all reference tokens. `None` if nothing
    /// was scored.
    pub fn corpus_wer(&self) -> Option<f64> {
        let reference_tokens = self.total_reference_tokens();
        if reference_tokens == 0 {
            return None;
        }
        Some(error_rate(self.total_counts().distance(), reference_tokens))
    }

    /// Unweighted average of per-case rates.
    pub fn mean_wer(&self) -> Option<f64> {
        if self.cases.is_empty() {
            return None;
        }
        let sum: f64 = self.cases.iter().map(|c| c.measurement.rate).sum();
        Some(round_percentage(sum / self.cases.len() as f64))
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            scored: self.cases.len(),
            skipped: self.skipped.len(),
            reference_tokens: self.total_reference_tokens(),
            counts: self.total_counts(),
            corpus_wer: self.corpus_wer(),
            mean_wer: self.mean_wer(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({
            "summary": self.summary(),
            "cases": self.cases,
            "skipped": self.skipped,
        }))
    }

    /// Plain-text table, one row per scored case, followed by skips and totals.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        let name_width = self
            .cases
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max(4);

        if !self.cases.is_empty() {
            lines.push(format!(
                "{:name_width$}  {:>5} {:>5} {:>5} {:>5} {:>5} {:>8}",
                "case", "ref", "hyp", "sub", "del", "ins", "WER"
            ));
            for case in &self.cases {
                let m = &case.measurement;
                lines.push(format!(
                    "{:name_width$}  {:>5} {:>5} {:>5} {:>5} {:>5} {:>7.2}%",
                    case.name,
                    m.reference_tokens,
                    m.hypothesis_tokens,
                    m.counts.substitutions,
                    m.counts.deletions,
                    m.counts.insertions,
                    m.rate
                ));
            }
        }

        for skipped in &self.skipped {
            lines.push(format!("skipped {}: {}", skipped.name, skipped.reason));
        }

        match self.corpus_wer() {
            Some(wer) => lines.push(format!(
                "Corpus WER: {wer:.2}% over {} reference tokens ({} scored, {} skipped)",
                self.total_reference_tokens(),
                self.cases.len(),
                self.skipped.len()
            )),
            None => lines.push(format!(
                "No cases scored ({} skipped)",
                self.skipped.len()
            )),
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::word_error_rate::measure_wer;
    use approx::assert_relative_eq;

    fn score(name: &str, reference: &str, hypothesis: &str) -> CaseScore {
        CaseScore {
            name: name.to_string(),
            measurement: measure_wer(reference, hypothesis).unwrap(),
        }
    }

    fn sample_report() -> EvaluationReport {
        EvaluationReport {
            cases: vec![
                score("short", "a b", "a b c"),
                score("long", "a b c d", "a b c"),
            ],
            skipped: vec![SkippedCase {
                name: "blank".to_string(),
                reason: "invalid argument: reference contains no tokens".to_string(),
            }],
        }
    }

    #[test]
    fn test_corpus_wer_pools_edits() {
        let report = sample_report();
        // 1 insertion + 1 deletion over 2 + 4 reference tokens
        assert_eq!(report.total_reference_tokens(), 6);
        assert_eq!(report.total_counts().distance(), 2);
        assert_relative_eq!(report.corpus_wer().unwrap(), 33.33, epsilon = 1e-9);
    }

    #[test]
    fn test_mean_wer_averages_rates() {
        let report = sample_report();
        // (50.0 + 25.0) / 2
        assert_relative_eq!(report.mean_wer().unwrap(), 37.5, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_report_has_no_rates() {
        let report = EvaluationReport::default();
        assert!(report.corpus_wer().is_none());
        assert!(report.mean_wer().is_none());
        assert_eq!(report.to_text(), "No cases scored (0 skipped)");
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample_report().summary();
        assert_eq!(summary.scored, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.counts.insertions, 1);
        assert_eq!(summary.counts.deletions, 1);
    }

    #[test]
    fn test_text_lists_cases_and_skips() {
        let text = sample_report().to_text();
        assert!(text.contains("short"));
        assert!(text.contains("50.00%"));
        assert!(text.contains("25.00%"));
        assert!(text.contains("skipped blank: invalid argument"));
        assert!(text.contains("Corpus WER: 33.33% over 6 reference tokens (2 scored, 1 skipped)"));
    }

    #[test]
    fn test_json_contains_summary_and_cases() {
        let json = sample_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["scored"], 2);
        assert_eq!(value["summary"]["corpus_wer"], 33.33);
        assert_eq!(value["cases"][0]["name"], "short");
        assert_eq!(value["cases"][0]["measurement"]["counts"]["insertions"], 1);
        assert_eq!(value["skipped"][0]["name"], "blank");
    }
}
