pub mod analysis_client;
#[path = "config/mod.rs"]
pub mod config_mod;
pub use config_mod as config;
pub mod response;
pub mod storage;
