use crate::adapters::serial::{DEFAULT_BAUD_RATE, DEFAULT_PID, DEFAULT_VID};
use crate::adapters::twitter::{DEFAULT_RULES_ENDPOINT, DEFAULT_STREAM_ENDPOINT};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, WordleError};
use crate::utils::validation::Validate;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub stream: StreamConfig,
    pub device: Option<DeviceConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    pub endpoint: Option<String>,
    pub rules_endpoint: Option<String>,
    pub bearer_token: Option<String>,
    #[serde(default = "default_track")]
    pub track: Vec<String>,
    pub timeout_seconds: Option<u64>,
    pub replay: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceConfig {
    pub port: Option<String>,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
    pub baud_rate: Option<u32>,
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub stats_interval: Option<u64>,
}

fn default_track() -> Vec<String> {
    vec!["wordle".to_string()]
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| WordleError::ConfigError {
                message: format!("cannot read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WordleError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TWITTER_BEARER_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| WordleError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn device(&self) -> DeviceConfig {
        self.device.clone().unwrap_or_default()
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn stream_endpoint(&self) -> &str {
        self.stream.endpoint.as_deref().unwrap_or(DEFAULT_STREAM_ENDPOINT)
    }

    fn rules_endpoint(&self) -> &str {
        self.stream
            .rules_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_RULES_ENDPOINT)
    }

    fn bearer_token(&self) -> &str {
        self.stream.bearer_token.as_deref().unwrap_or("")
    }

    fn track(&self) -> &[String] {
        &self.stream.track
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.stream.timeout_seconds
    }

    fn device_port(&self) -> Option<&str> {
        self.device.as_ref().and_then(|d| d.port.as_deref())
    }

    fn device_vid(&self) -> u16 {
        self.device().vid.unwrap_or(DEFAULT_VID)
    }

    fn device_pid(&self) -> u16 {
        self.device().pid.unwrap_or(DEFAULT_PID)
    }

    fn baud_rate(&self) -> u32 {
        self.device().baud_rate.unwrap_or(DEFAULT_BAUD_RATE)
    }

    fn dry_run(&self) -> bool {
        self.device().dry_run.unwrap_or(false)
    }

    fn replay_path(&self) -> Option<&str> {
        self.stream.replay.as_deref()
    }

    fn stats_interval(&self) -> u64 {
        self.logging
            .as_ref()
            .and_then(|l| l.stats_interval)
            .unwrap_or(0)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)
    }
}
