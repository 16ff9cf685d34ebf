pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::MAX_NAME_LENGTH;
#[cfg(feature = "cli")]
use crate::utils::{error::Result, validation::Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "better-name")]
#[command(version)]
#[command(about = "Format a first and last name into a short title-cased name")]
pub struct CliConfig {
    /// First name part. With no names at all the built-in demo runs.
    pub first_name: Option<String>,

    /// Last name part
    pub last_name: Option<String>,

    #[arg(long, default_value_t = MAX_NAME_LENGTH, help = "Maximum length of the formatted name (1-15)")]
    pub max_length: usize,

    #[arg(long, conflicts_with = "max_length", help = "Use the legacy print-only formatter (no length limit)")]
    pub print: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 未提供任何姓名時執行示範
    pub fn is_demo(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or("")
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or("")
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_range("max_length", self.max_length, 1, MAX_NAME_LENGTH)
    }
}
