use crate::adapters::replay::ReplaySource;
use crate::adapters::serial::open_matrix;
use crate::adapters::simulator::SimulatedMatrix;
use crate::adapters::twitter::FilteredStreamClient;
use crate::core::engine::StreamEngine;
use crate::core::handler::WordleHandler;
use crate::core::render::clear_matrix;
use crate::core::{ConfigProvider, MessageSource};
use crate::utils::error::Result;
use crate::utils::monitor::StreamStats;
use crate::utils::validation::Validate;
use std::io::Write;

/// 依設定選擇訊息來源：重播檔案，或同步規則後連上即時串流
pub async fn open_source<C: ConfigProvider>(config: &C) -> Result<Box<dyn MessageSource>> {
    if let Some(path) = config.replay_path() {
        return Ok(Box::new(ReplaySource::open(path).await?));
    }

    let client = FilteredStreamClient::from_config(config)?;
    if !config.track().is_empty() {
        client.sync_rules(config.track()).await?;
    }

    Ok(Box::new(client.connect().await?))
}

/// Feed every message from `source` through a handler that owns `device`.
/// Returns the stats and hands the device back once the source ends.
pub async fn run_pipeline<S, D>(source: S, device: D, stats_interval: u64) -> Result<(StreamStats, D)>
where
    S: MessageSource,
    D: Write,
{
    let mut handler = WordleHandler::new(device);
    let mut engine = StreamEngine::new_with_monitoring(source, stats_interval);

    let stats = engine
        .run(|text| Ok(handler.process(text)?.is_rendered()))
        .await?;

    Ok((stats, handler.into_device()))
}

pub async fn run<C: ConfigProvider + Validate>(config: &C) -> Result<StreamStats> {
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    if config.dry_run() {
        tracing::info!("🔍 DRY RUN MODE - rendering to a simulated matrix");
        let source = open_source(config).await?;
        let (stats, _) = run_pipeline(source, SimulatedMatrix::new(), config.stats_interval()).await?;
        return Ok(stats);
    }

    // 先確認裝置存在再連線串流
    let mut device = open_matrix(config)?;
    clear_matrix(&mut device)?;

    let source = open_source(config).await?;
    let (stats, _) = run_pipeline(source, device, config.stats_interval()).await?;
    Ok(stats)
}
