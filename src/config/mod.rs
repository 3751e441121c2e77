pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{Result, WordleError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url,
};

#[cfg(feature = "cli")]
use crate::adapters::serial::DEFAULT_BAUD_RATE;
#[cfg(feature = "cli")]
use crate::adapters::twitter::{DEFAULT_RULES_ENDPOINT, DEFAULT_STREAM_ENDPOINT};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

/// 兩種配置來源共用的檢查
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    // 重播模式不會連到串流，不需要 token
    if config.replay_path().is_none() {
        validate_url("stream.endpoint", config.stream_endpoint())?;
        validate_url("stream.rules_endpoint", config.rules_endpoint())?;
        validate_non_empty_string("stream.bearer_token", config.bearer_token())?;

        if config.bearer_token().starts_with("${") {
            return Err(WordleError::ConfigValidationError {
                field: "stream.bearer_token".to_string(),
                message: format!(
                    "environment variable placeholder {} was not resolved",
                    config.bearer_token()
                ),
            });
        }
    }

    if let Some(timeout) = config.timeout_seconds() {
        validate_positive_number("stream.timeout_seconds", timeout, 1)?;
    }

    if let Some(port) = config.device_port() {
        validate_path("device.port", port)?;
    }

    validate_range("device.baud_rate", config.baud_rate(), 300, 4_000_000)?;

    Ok(())
}

#[cfg(feature = "cli")]
fn parse_hex_u16(value: &str) -> std::result::Result<u16, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex id '{}': {}", value, e))
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "wordle-matrix")]
#[command(about = "Show Wordle results from a live stream on an LED matrix")]
pub struct CliConfig {
    /// Path to a TOML configuration file; flags below override it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_STREAM_ENDPOINT)]
    pub stream_endpoint: String,

    #[arg(long, default_value = DEFAULT_RULES_ENDPOINT)]
    pub rules_endpoint: String,

    #[arg(long, env = "TWITTER_BEARER_TOKEN", default_value = "", hide_env_values = true)]
    pub bearer_token: String,

    /// Keywords the stream rules should track
    #[arg(long, value_delimiter = ',', default_value = "wordle")]
    pub track: Vec<String>,

    /// Connect timeout for the stream request
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Serial port of the LED matrix (skips USB discovery)
    #[arg(short, long)]
    pub port: Option<String>,

    #[arg(long, value_parser = parse_hex_u16, default_value = "0x303a")]
    pub vid: u16,

    #[arg(long, value_parser = parse_hex_u16, default_value = "0x1001")]
    pub pid: u16,

    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud_rate: u32,

    /// Render to a simulated matrix in the log instead of the serial device
    #[arg(long)]
    pub dry_run: bool,

    /// Replay captured stream lines from a file ('-' for stdin)
    #[arg(long)]
    pub replay: Option<String>,

    /// Log statistics every N messages (0 = only at the end)
    #[arg(long, default_value_t = 0)]
    pub stats_interval: u64,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log in JSON format")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 套用命令列覆蓋設定到 TOML 配置
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        let device = config.device.get_or_insert_with(Default::default);

        if let Some(port) = &self.port {
            device.port = Some(port.clone());
            tracing::info!("🔧 Device port overridden to: {}", port);
        }

        if self.dry_run {
            device.dry_run = Some(true);
            tracing::info!("🔧 Dry run enabled from command line");
        }

        if let Some(replay) = &self.replay {
            config.stream.replay = Some(replay.clone());
            tracing::info!("🔧 Replay source overridden to: {}", replay);
        }

        if self.json_logs {
            config.logging.get_or_insert_with(Default::default).json = Some(true);
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn stream_endpoint(&self) -> &str {
        &self.stream_endpoint
    }

    fn rules_endpoint(&self) -> &str {
        &self.rules_endpoint
    }

    fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    fn track(&self) -> &[String] {
        &self.track
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn device_port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    fn device_vid(&self) -> u16 {
        self.vid
    }

    fn device_pid(&self) -> u16 {
        self.pid
    }

    fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn replay_path(&self) -> Option<&str> {
        self.replay.as_deref()
    }

    fn stats_interval(&self) -> u64 {
        self.stats_interval
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::adapters::serial::{DEFAULT_PID, DEFAULT_VID};

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["wordle-matrix"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let config = parse(&["--bearer-token", "abc"]);

        assert_eq!(config.stream_endpoint(), DEFAULT_STREAM_ENDPOINT);
        assert_eq!(config.track(), &["wordle".to_string()]);
        assert_eq!(config.device_vid(), DEFAULT_VID);
        assert_eq!(config.device_pid(), DEFAULT_PID);
        assert_eq!(config.baud_rate(), 115_200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_parses_hex_ids_and_track_list() {
        let config = parse(&[
            "--bearer-token",
            "abc",
            "--vid",
            "10c4",
            "--pid",
            "0xEA60",
            "--track",
            "wordle,worldle",
        ]);

        assert_eq!(config.device_vid(), 0x10c4);
        assert_eq!(config.device_pid(), 0xea60);
        assert_eq!(config.track().len(), 2);
    }

    #[test]
    fn test_cli_rejects_bad_hex() {
        let argv = ["wordle-matrix", "--vid", "zzzz"];
        assert!(CliConfig::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_live_stream_requires_token() {
        let config = parse(&["--bearer-token", ""]);
        assert!(config.validate().is_err());

        let replay = parse(&["--bearer-token", "", "--replay", "-", "--dry-run"]);
        assert!(replay.validate().is_ok());
    }

    #[test]
    fn test_overrides_apply_to_toml_config() {
        let mut toml = TomlConfig::from_toml_str("[stream]\nbearer_token = \"t\"\n").unwrap();
        let cli = parse(&["--port", "/dev/ttyACM3", "--dry-run", "--json-logs"]);

        cli.apply_overrides(&mut toml);

        assert_eq!(toml.device_port(), Some("/dev/ttyACM3"));
        assert!(toml.dry_run());
        assert!(toml.json_logs());
        assert_eq!(toml.replay_path(), None);
    }
}
