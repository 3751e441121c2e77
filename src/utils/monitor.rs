use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamStats {
    pub messages_seen: u64,
    pub grids_rendered: u64,
    pub elapsed_time: Duration,
}

/// 串流處理統計：收到幾則訊息、顯示了幾個 Wordle
pub struct StreamMonitor {
    start_time: Instant,
    messages_seen: u64,
    grids_rendered: u64,
    interval: u64,
}

impl StreamMonitor {
    /// `interval` 為每隔幾則訊息輸出一次統計，0 代表只在結束時輸出
    pub fn new(interval: u64) -> Self {
        Self {
            start_time: Instant::now(),
            messages_seen: 0,
            grids_rendered: 0,
            interval,
        }
    }

    pub fn record(&mut self, rendered: bool) {
        self.messages_seen += 1;
        if rendered {
            self.grids_rendered += 1;
        }

        if self.interval > 0 && self.messages_seen % self.interval == 0 {
            self.log_stats("Progress");
        }
    }

    pub fn stats(&self) -> StreamStats {
        StreamStats {
            messages_seen: self.messages_seen,
            grids_rendered: self.grids_rendered,
            elapsed_time: self.start_time.elapsed(),
        }
    }

    pub fn log_stats(&self, phase: &str) {
        let stats = self.stats();
        tracing::info!(
            "📊 {} - Messages: {}, Grids rendered: {}, Time: {:?}",
            phase,
            stats.messages_seen,
            stats.grids_rendered,
            stats.elapsed_time
        );
    }

    pub fn log_final_stats(&self) {
        self.log_stats("Final Stats");
    }
}

impl Default for StreamMonitor {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_counts_messages_and_grids() {
        let mut monitor = StreamMonitor::new(2);
        monitor.record(false);
        monitor.record(true);
        monitor.record(false);

        let stats = monitor.stats();
        assert_eq!(stats.messages_seen, 3);
        assert_eq!(stats.grids_rendered, 1);
    }
}
