pub mod domain;
pub mod evaluate_transcripts_use_case;
pub mod evaluation_logger;
pub mod infrastructure;
