pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::LocalStorage;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{engine::PriceEngine, store::PriceStore};
pub use crate::domain::model::{FileReport, FileStatus, IngestReport, PriceEntry};
pub use crate::utils::error::{PriceError, Result};
