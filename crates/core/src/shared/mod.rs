pub mod constants;
pub mod evaluation_settings;
