pub mod case_reader;
pub mod evaluation_case;
pub mod evaluation_report;
