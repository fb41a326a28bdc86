pub mod config;
pub mod error;
pub mod types;

pub use config::DaybookConfig;
pub use error::{DaybookError, Result};
pub use types::*;
