/// Decimal places kept in reported error rates.
pub const WER_DECIMALS: i32 = 2;

/// Log evaluation progress every N cases.
pub const DEFAULT_PROGRESS_THROTTLE: usize = 10;

pub const JSONL_CASE_EXTENSIONS: &[&str] = &["jsonl", "ndjson"];
