pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::toml_config::BatchConfig;
#[allow(deprecated)]
pub use crate::core::formatter::print_name;
pub use crate::core::formatter::{format_name, title_case, truncate_chars, write_name, NameFormatter};
pub use crate::core::{batch::BatchPipeline, engine::BatchEngine};
pub use domain::model::{FormattedName, NamePart, MAX_NAME_LENGTH};
pub use utils::error::{NameError, Result};
