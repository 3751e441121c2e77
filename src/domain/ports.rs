use crate::utils::error::Result;
use async_trait::async_trait;

/// 訊息來源：每次回傳一則完整的訊息文字，串流結束時回傳 None
#[async_trait]
pub trait MessageSource: Send {
    async fn next_message(&mut self) -> Result<Option<String>>;
}

pub trait ConfigProvider: Send + Sync {
    fn stream_endpoint(&self) -> &str;
    fn rules_endpoint(&self) -> &str;
    fn bearer_token(&self) -> &str;
    fn track(&self) -> &[String];
    fn timeout_seconds(&self) -> Option<u64>;

    fn device_port(&self) -> Option<&str>;
    fn device_vid(&self) -> u16;
    fn device_pid(&self) -> u16;
    fn baud_rate(&self) -> u32;

    fn dry_run(&self) -> bool;
    fn replay_path(&self) -> Option<&str>;
    fn stats_interval(&self) -> u64;
}

#[async_trait]
impl<S: MessageSource + ?Sized> MessageSource for Box<S> {
    async fn next_message(&mut self) -> Result<Option<String>> {
        (**self).next_message().await
    }
}
