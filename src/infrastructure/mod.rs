pub mod api;
#[path = "config/mod.rs"]
pub mod config_mod;
pub use config_mod as config;
pub mod http;
pub mod security;
pub mod storage;
