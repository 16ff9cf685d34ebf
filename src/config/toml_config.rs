use crate::domain::model::MAX_NAME_LENGTH;
use crate::utils::error::{NameError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub batch: BatchInfo,
    pub input: InputConfig,
    pub format: Option<FormatConfig>,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub format: Option<InputFormat>,
    pub skip_blank: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

const VALID_INPUT_EXTENSIONS: [&str; 2] = ["csv", "json"];
const VALID_OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];
const VALID_LOG_FORMATS: [&str; 2] = ["compact", "json"];

impl BatchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NameError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NameError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NAMES_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NameError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("batch.name", &self.batch.name)?;

        validation::validate_path("input.path", &self.input.path)?;
        if self.input.format.is_none() {
            // 未指定格式時依副檔名判斷
            validation::validate_file_extensions(
                "input.path",
                std::slice::from_ref(&self.input.path),
                &VALID_INPUT_EXTENSIONS,
            )?;
        }

        validation::validate_range("format.max_length", self.max_length(), 1, MAX_NAME_LENGTH)?;

        validation::validate_path("output.path", &self.output.path)?;
        if self.output.formats.is_empty() {
            return Err(NameError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }
        for format in &self.output.formats {
            if !VALID_OUTPUT_FORMATS.contains(&format.as_str()) {
                return Err(NameError::InvalidConfigValueError {
                    field: "output.formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        VALID_OUTPUT_FORMATS.join(", ")
                    ),
                });
            }
        }

        if let Some(log_format) = self.logging.as_ref().and_then(|l| l.format.as_ref()) {
            if !VALID_LOG_FORMATS.contains(&log_format.as_str()) {
                return Err(NameError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: log_format.clone(),
                    reason: format!(
                        "Unsupported log format. Valid formats: {}",
                        VALID_LOG_FORMATS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    /// 取得輸入格式，未指定時依副檔名判斷
    pub fn input_format(&self) -> InputFormat {
        if let Some(format) = self.input.format {
            return format;
        }
        match Path::new(&self.input.path)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }

    pub fn input_path(&self) -> &str {
        &self.input.path
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn max_length(&self) -> usize {
        self.format
            .as_ref()
            .and_then(|f| f.max_length)
            .unwrap_or(MAX_NAME_LENGTH)
    }

    pub fn skip_blank(&self) -> bool {
        self.input.skip_blank.unwrap_or(true)
    }

    pub fn wants_format(&self, format: &str) -> bool {
        self.output.formats.iter().any(|f| f == format)
    }

    pub fn csv_filename(&self) -> &str {
        self.output
            .filenames
            .as_ref()
            .and_then(|f| f.csv.as_deref())
            .unwrap_or("formatted_names.csv")
    }

    pub fn json_filename(&self) -> &str {
        self.output
            .filenames
            .as_ref()
            .and_then(|f| f.json.as_deref())
            .unwrap_or("formatted_names.json")
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
