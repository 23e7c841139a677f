mod check;
pub mod cors;
mod env;
mod error;
pub mod log;

pub use check::{check_sources, load_checked};
pub use env::{parse_allowed_origins, Settings};
pub use error::ConfigError;
