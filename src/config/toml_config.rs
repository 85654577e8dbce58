use crate::core::ConfigProvider;
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub game: GameConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub name: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub employees: String,
    pub previous: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub seed: Option<u64>,
}

/// Default result file name for a given round.
pub fn default_output_file(year: i32) -> String {
    format!("Secret-Santa-Game-Result-{}.csv", year)
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SantaError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| SantaError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        if config.output.path.is_none() {
            config.output.path = Some(default_output_file(config.year()));
        }

        Ok(config)
    }

    /// 替換環境變數 (例如 ${SANTA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SantaError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Round year, falling back to the current calendar year.
    pub fn year(&self) -> i32 {
        self.game
            .year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("input.employees", &self.input.employees)?;

        if let Some(previous) = &self.input.previous {
            validate_path("input.previous", previous)?;
        }

        validate_path("output.path", self.output_file())?;
        validate_file_extension("output.path", self.output_file(), &["csv", "json"])?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn employees_file(&self) -> &str {
        &self.input.employees
    }

    fn previous_file(&self) -> Option<&str> {
        self.input.previous.as_deref()
    }

    fn output_file(&self) -> &str {
        self.output.path.as_deref().unwrap_or_default()
    }

    fn seed(&self) -> Option<u64> {
        self.search.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
