use crate::domain::ports::MessageSource;
use crate::utils::error::Result;
use crate::utils::monitor::{StreamMonitor, StreamStats};

/// Pulls messages off a [`MessageSource`] one at a time and hands each to the
/// registered callback before reading the next one.
pub struct StreamEngine<S: MessageSource> {
    source: S,
    monitor: StreamMonitor,
}

impl<S: MessageSource> StreamEngine<S> {
    pub fn new(source: S) -> Self {
        Self::new_with_monitoring(source, 0)
    }

    pub fn new_with_monitoring(source: S, stats_interval: u64) -> Self {
        Self {
            source,
            monitor: StreamMonitor::new(stats_interval),
        }
    }

    /// Run until the source is exhausted. The callback returns whether the
    /// message produced a render; an error from it stops the engine.
    pub async fn run<F>(&mut self, mut on_message: F) -> Result<StreamStats>
    where
        F: FnMut(&str) -> Result<bool>,
    {
        tracing::info!("📡 Listening for messages...");

        while let Some(text) = self.source.next_message().await? {
            let rendered = match on_message(&text) {
                Ok(rendered) => rendered,
                Err(e) => {
                    self.monitor.log_final_stats();
                    return Err(e);
                }
            };
            self.monitor.record(rendered);
        }

        tracing::info!("Stream ended");
        self.monitor.log_final_stats();

        Ok(self.monitor.stats())
    }
}
