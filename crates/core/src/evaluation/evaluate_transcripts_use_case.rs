use std::path::Path;

use crate::evaluation::domain::case_reader::CaseReader;
use crate::evaluation::domain::evaluation_case::EvaluationCase;
use crate::evaluation::domain::evaluation_report::{CaseScore, EvaluationReport, SkippedCase};
use crate::evaluation::evaluation_logger::EvaluationLogger;
use crate::scoring::domain::token_sequence::TokenSequence;
use crate::scoring::domain::word_error_rate::{measure_wer, WerMeasurement};
use crate::shared::evaluation_settings::EvaluationSettings;

/// Scores a batch of transcripts against their ground truth.
///
/// Cases that cannot be scored (empty reference, over the token limit) are
/// reported as skipped with a reason rather than given a number.
pub struct EvaluateTranscriptsUseCase {
    reader: Box<dyn CaseReader>,
    logger: Box<dyn EvaluationLogger>,
    settings: EvaluationSettings,
}

impl EvaluateTranscriptsUseCase {
    pub fn new(
        reader: Box<dyn CaseReader>,
        logger: Box<dyn EvaluationLogger>,
        settings: EvaluationSettings,
    ) -> Self {
        Self {
            reader,
            logger,
            settings,
        }
    }

    pub fn execute(&mut self, path: &Path) -> Result<EvaluationReport, Box<dyn std::error::Error>> {
        let cases = self.reader.read_cases(path)?;
        self.logger.info(&format!(
            "Loaded {} cases from {}",
            cases.len(),
            path.display()
        ));
        Ok(self.evaluate(&cases))
    }

    pub fn evaluate(&mut self, cases: &[EvaluationCase]) -> EvaluationReport {
        let mut report = EvaluationReport::default();
        let total = cases.len();

        for (idx, case) in cases.iter().enumerate() {
            let name = case.label(idx);
            match self.score_case(case) {
                Ok(measurement) => {
                    self.logger.case_scored(&name, &measurement);
                    report.cases.push(CaseScore { name, measurement });
                }
                Err(reason) => {
                    self.logger.case_skipped(&name, &reason);
                    report.skipped.push(SkippedCase { name, reason });
                }
            }
            self.logger.progress(idx + 1, total);
        }

        self.logger.summary();
        report
    }

    fn score_case(&self, case: &EvaluationCase) -> Result<WerMeasurement, String> {
        if let Some(limit) = self.settings.max_tokens {
            let reference_tokens = TokenSequence::from_text(&case.reference).len();
            let hypothesis_tokens = TokenSequence::from_text(&case.hypothesis).len();
            if reference_tokens > limit || hypothesis_tokens > limit {
                return Err(format!(
                    "input too long: {reference_tokens} reference / {hypothesis_tokens} hypothesis tokens, limit is {limit}"
                ));
            }
        }
        measure_wer(&case.reference, &case.hypothesis).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::evaluation_logger::NullEvaluationLogger;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    // ─── Stubs ───

    struct StubCaseReader {
        cases: Vec<EvaluationCase>,
    }

    impl CaseReader for StubCaseReader {
        fn read_cases(
            &self,
            _: &Path,
        ) -> Result<Vec<EvaluationCase>, Box<dyn std::error::Error>> {
            Ok(self.cases.clone())
        }
    }

    struct FailingCaseReader;

    impl CaseReader for FailingCaseReader {
        fn read_cases(
            &self,
            _: &Path,
        ) -> Result<Vec<EvaluationCase>, Box<dyn std::error::Error>> {
            Err("disk on fire".into())
        }
    }

    #[derive(Default)]
    struct Events {
        scored: Vec<String>,
        skipped: Vec<String>,
        progress: Vec<(usize, usize)>,
        summaries: usize,
    }

    struct RecordingLogger {
        events: Arc<Mutex<Events>>,
    }

    impl EvaluationLogger for RecordingLogger {
        fn progress(&mut self, current: usize, total: usize) {
            self.events.lock().unwrap().progress.push((current, total));
        }
        fn case_scored(&mut self, name: &str, _: &WerMeasurement) {
            self.events.lock().unwrap().scored.push(name.to_string());
        }
        fn case_skipped(&mut self, name: &str, _: &str) {
            self.events.lock().unwrap().skipped.push(name.to_string());
        }
        fn info(&mut self, _: &str) {}
        fn summary(&self) {
            self.events.lock().unwrap().summaries += 1;
        }
    }

    fn use_case(cases: Vec<EvaluationCase>, settings: EvaluationSettings) -> EvaluateTranscriptsUseCase {
        EvaluateTranscriptsUseCase::new(
            Box::new(StubCaseReader { cases }),
            Box::new(NullEvaluationLogger),
            settings,
        )
    }

    #[test]
    fn test_scores_every_valid_case() {
        let cases = vec![
            EvaluationCase::new(Some("deletion"), "the cat sat on the mat", "the cat sat on mat"),
            EvaluationCase::new(Some("exact"), "hello world", "hello world"),
        ];
        let mut uc = use_case(cases, EvaluationSettings::default());
        let report = uc.execute(Path::new("cases.json")).unwrap();

        assert_eq!(report.cases.len(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(report.cases[0].name, "deletion");
        assert_relative_eq!(report.cases[0].measurement.rate, 16.67, epsilon = 1e-9);
        assert_relative_eq!(report.cases[1].measurement.rate, 0.0);
        // 1 edit over 8 reference tokens
        assert_relative_eq!(report.corpus_wer().unwrap(), 12.5, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_reference_is_skipped_not_scored() {
        let cases = vec![
            EvaluationCase::new(None, "   ", "something was said"),
            EvaluationCase::new(None, "a b", "a b"),
        ];
        let mut uc = use_case(cases, EvaluationSettings::default());
        let report = uc.execute(Path::new("cases.json")).unwrap();

        assert_eq!(report.cases.len(), 1);
        assert_eq!(report.cases[0].name, "case-2");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "case-1");
        assert!(report.skipped[0].reason.contains("invalid argument"));
    }

    #[test]
    fn test_token_limit_skips_long_cases() {
        let cases = vec![
            EvaluationCase::new(Some("long-ref"), "a b c d e", "a b"),
            EvaluationCase::new(Some("long-hyp"), "a b", "a b c d e"),
            EvaluationCase::new(Some("fits"), "a b c", "a b c"),
        ];
        let settings = EvaluationSettings {
            max_tokens: Some(3),
            ..EvaluationSettings::default()
        };
        let mut uc = use_case(cases, settings);
        let report = uc.execute(Path::new("cases.json")).unwrap();

        assert_eq!(report.cases.len(), 1);
        assert_eq!(report.cases[0].name, "fits");
        let skipped: Vec<&str> = report.skipped.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(skipped, vec!["long-ref", "long-hyp"]);
        assert!(report.skipped[0].reason.contains("limit is 3"));
    }

    #[test]
    fn test_reader_error_propagates() {
        let mut uc = EvaluateTranscriptsUseCase::new(
            Box::new(FailingCaseReader),
            Box::new(NullEvaluationLogger),
            EvaluationSettings::default(),
        );
        let err = uc.execute(Path::new("cases.json")).unwrap_err();
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn test_logger_sees_every_case() {
        let events = Arc::new(Mutex::new(Events::default()));
        let mut uc = EvaluateTranscriptsUseCase::new(
            Box::new(StubCaseReader { cases: vec![] }),
            Box::new(RecordingLogger {
                events: events.clone(),
            }),
            EvaluationSettings::default(),
        );
        let cases = vec![
            EvaluationCase::new(Some("ok"), "a", "a"),
            EvaluationCase::new(Some("blank"), "", "a"),
        ];
        uc.evaluate(&cases);

        let events = events.lock().unwrap();
        assert_eq!(events.scored, vec!["ok".to_string()]);
        assert_eq!(events.skipped, vec!["blank".to_string()]);
        assert_eq!(events.progress, vec![(1, 2), (2, 2)]);
        assert_eq!(events.summaries, 1);
    }

    #[test]
    fn test_no_cases_yields_empty_report() {
        let mut uc = use_case(vec![], EvaluationSettings::default());
        let report = uc.execute(Path::new("cases.json")).unwrap();
        assert!(report.cases.is_empty());
        assert!(report.corpus_wer().is_none());
    }
}
