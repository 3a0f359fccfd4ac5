//! Word Error Rate (WER) over whitespace-delimited tokens.
//!
//! WER is the minimum number of token substitutions, deletions and
//! insertions needed to turn the reference into the hypothesis, divided by
//! the reference length and expressed as a percentage rounded to two
//! decimals. It is not symmetric and may exceed 100 when the hypothesis
//! carries many insertions.
//!
//! An empty reference has no defined rate. Every entry point here rejects
//! it with [`ScoringError::InvalidArgument`], whatever the hypothesis holds.

use serde::Serialize;

use super::alignment_matrix::AlignmentMatrix;
use super::edit_operation::EditCounts;
use super::scoring_error::ScoringError;
use super::sequence_aligner::{Alignment, SequenceAligner};
use super::token_sequence::TokenSequence;
use crate::shared::constants::WER_DECIMALS;

/// WER together with the edit breakdown that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WerMeasurement {
    pub counts: EditCounts,
    pub reference_tokens: usize,
    pub hypothesis_tokens: usize,
    /// Percentage, rounded to two decimals.
    pub rate: f64,
}

impl WerMeasurement {
    pub fn edits(&self) -> usize {
        self.counts.distance()
    }
}

/// Word Error Rate of `hypothesis` against `reference`, as a percentage.
pub fn calculate_wer(reference: &str, hypothesis: &str) -> Result<f64, ScoringError> {
    let reference = TokenSequence::from_text(reference);
    let hypothesis = TokenSequence::from_text(hypothesis);
    require_reference(&reference)?;

    let matrix = AlignmentMatrix::build(reference.as_slice(), hypothesis.as_slice());
    Ok(error_rate(matrix.distance(), reference.len()))
}

/// Same score as [`calculate_wer`], plus substitution/deletion/insertion counts.
pub fn measure_wer(reference: &str, hypothesis: &str) -> Result<WerMeasurement, ScoringError> {
    measure_wer_with_alignment(reference, hypothesis).map(|(measurement, _)| measurement)
}

/// [`measure_wer`] together with the token alignment it was derived from.
pub fn measure_wer_with_alignment(
    reference: &str,
    hypothesis: &str,
) -> Result<(WerMeasurement, Alignment), ScoringError> {
    let reference = TokenSequence::from_text(reference);
    let hypothesis = TokenSequence::from_text(hypothesis);
    require_reference(&reference)?;

    let alignment = SequenceAligner::align(reference.as_slice(), hypothesis.as_slice());
    let measurement = WerMeasurement {
        counts: alignment.counts(),
        reference_tokens: reference.len(),
        hypothesis_tokens: hypothesis.len(),
        rate: error_rate(alignment.distance(), reference.len()),
    };
    Ok((measurement, alignment))
}

/// `edits / reference_tokens * 100`, rounded. Callers guarantee a non-zero
/// reference length.
pub fn error_rate(edits: usize, reference_tokens: usize) -> f64 {
    round_percentage(edits as f64 / reference_tokens as f64 * 100.0)
}

/// Rounds to two decimals; exact halves go to the even neighbour.
pub fn round_percentage(value: f64) -> f64 {
    let scale = 10f64.powi(WER_DECIMALS);
    (value * scale).round_ties_even() / scale
}

fn require_reference(reference: &TokenSequence<'_>) -> Result<(), ScoringError> {
    if reference.is_empty() {
        return Err(ScoringError::InvalidArgument(
            "reference contains no tokens".to_string(),
        ));
    }
    Ok(())
}
