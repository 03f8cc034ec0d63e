pub mod config_warning;
pub mod version;
