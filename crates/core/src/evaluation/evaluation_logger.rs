use std::time::Instant;

use crate::scoring::domain::word_error_rate::WerMeasurement;

/// Injected sink for evaluation events.
///
/// Keeps the use case free of any particular output mechanism so the CLI,
/// tests and other callers can each observe scoring their own way.
pub trait EvaluationLogger: Send {
    /// Report case-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record a scored case.
    fn case_scored(&mut self, name: &str, measurement: &WerMeasurement);

    /// Record a case that could not be scored.
    fn case_skipped(&mut self, name: &str, reason: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullEvaluationLogger;

impl EvaluationLogger for NullEvaluationLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn case_scored(&mut self, _name: &str, _measurement: &WerMeasurement) {}
    fn case_skipped(&mut self, _name: &str, _reason: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger writing through the `log` facade.
///
/// Progress output is throttled to every `throttle_cases` cases.
pub struct StdoutEvaluationLogger {
    throttle_cases: usize,
    start_time: Instant,
    total_cases: usize,
    scored: usize,
    skipped: usize,
    edits: usize,
    reference_tokens: usize,
    messages: Vec<String>,
}

impl StdoutEvaluationLogger {
    pub fn new(throttle_cases: usize) -> Self {
        Self {
            throttle_cases: throttle_cases.max(1),
            start_time: Instant::now(),
            total_cases: 0,
            scored: 0,
            skipped: 0,
            edits: 0,
            reference_tokens: 0,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if nothing was seen.
    pub fn summary_string(&self) -> Option<String> {
        if self.scored == 0 && self.skipped == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Evaluation summary ({} cases, {:.1}ms):",
            self.scored + self.skipped,
            elapsed_ms
        )];
        if self.total_cases > 0 {
            lines.push(format!("  loaded: {}", self.total_cases));
        }
        lines.push(format!("  scored: {}", self.scored));
        lines.push(format!("  skipped: {}", self.skipped));
        lines.push(format!(
            "  edits: {} over {} reference tokens",
            self.edits, self.reference_tokens
        ));
        Some(lines.join("\n"))
    }
}

impl Default for StdoutEvaluationLogger {
    fn default() -> Self {
        Self::new(crate::shared::constants::DEFAULT_PROGRESS_THROTTLE)
    }
}

impl EvaluationLogger for StdoutEvaluationLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_cases = total;
        if total > 0 && (current % self.throttle_cases == 0 || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Scoring: {current}/{total} cases ({pct:.1}%)");
        }
    }

    fn case_scored(&mut self, name: &str, measurement: &WerMeasurement) {
        self.scored += 1;
        self.edits += measurement.edits();
        self.reference_tokens += measurement.reference_tokens;
        log::debug!("{name}: WER {:.2}%", measurement.rate);
    }

    fn case_skipped(&mut self, name: &str, reason: &str) {
        self.skipped += 1;
        log::warn!("Skipping {name}: {reason}");
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
