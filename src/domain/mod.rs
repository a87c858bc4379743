pub mod artifact;
pub mod console_config;
pub mod endpoint;
pub mod error;
pub mod spec;
pub mod test_case;
pub mod translation;
