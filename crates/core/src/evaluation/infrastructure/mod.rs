pub mod json_case_reader;
