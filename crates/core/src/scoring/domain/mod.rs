pub mod alignment_matrix;
pub mod edit_operation;
pub mod scoring_error;
pub mod sequence_aligner;
pub mod token_sequence;
pub mod word_error_rate;
