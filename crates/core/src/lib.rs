pub mod evaluation;
pub mod scoring;
pub mod shared;
