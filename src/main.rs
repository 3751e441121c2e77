use clap::Parser;
use wordle_matrix::app::pipeline;
use wordle_matrix::utils::error::ErrorSeverity;
use wordle_matrix::utils::logger;
use wordle_matrix::{CliConfig, TomlConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置並套用命令列覆蓋設定
    let toml_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(mut config) => {
                cli.apply_overrides(&mut config);
                Some(config)
            }
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    // 初始化日誌
    let json_logs = toml_config
        .as_ref()
        .map(|c| c.json_logs())
        .unwrap_or(cli.json_logs);
    if json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting wordle-matrix");
    if let Some(path) = &cli.config {
        tracing::info!("📁 Loaded configuration from: {}", path);
    }

    let result = match &toml_config {
        Some(config) => pipeline::run(config).await,
        None => pipeline::run(&cli).await,
    };

    match result {
        Ok(stats) => {
            tracing::info!(
                "✅ Done: {} messages, {} grids rendered",
                stats.messages_seen,
                stats.grids_rendered
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ wordle-matrix failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
