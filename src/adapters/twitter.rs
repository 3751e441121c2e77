use crate::adapters::payload::{decode_line, LineBuffer};
use crate::domain::ports::{ConfigProvider, MessageSource};
use crate::utils::error::{Result, WordleError};
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_STREAM_ENDPOINT: &str = "https://api.twitter.com/2/tweets/search/stream";
pub const DEFAULT_RULES_ENDPOINT: &str = "https://api.twitter.com/2/tweets/search/stream/rules";

#[derive(Debug, Clone, Deserialize)]
pub struct StreamRule {
    #[serde(default)]
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RulesResponse {
    #[serde(default)]
    data: Vec<StreamRule>,
}

#[derive(Debug, Serialize)]
struct NewRule<'a> {
    value: &'a str,
    tag: &'a str,
}

#[derive(Debug, Serialize)]
struct AddRules<'a> {
    add: Vec<NewRule<'a>>,
}

/// Client for the v2 filtered stream: keeps the filter rules in sync and
/// opens the long-lived stream connection.
pub struct FilteredStreamClient {
    client: Client,
    stream_endpoint: String,
    rules_endpoint: String,
    bearer_token: String,
}

impl FilteredStreamClient {
    pub fn new(stream_endpoint: &str, rules_endpoint: &str, bearer_token: &str) -> Self {
        Self {
            client: Client::new(),
            stream_endpoint: stream_endpoint.to_string(),
            rules_endpoint: rules_endpoint.to_string(),
            bearer_token: bearer_token.to_string(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();

        // 只限制建立連線的時間，串流本身會一直開著
        if let Some(timeout) = config.timeout_seconds() {
            builder = builder.connect_timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            client: builder.build()?,
            stream_endpoint: config.stream_endpoint().to_string(),
            rules_endpoint: config.rules_endpoint().to_string(),
            bearer_token: config.bearer_token().to_string(),
        })
    }

    pub async fn rules(&self) -> Result<Vec<StreamRule>> {
        tracing::debug!("Fetching stream rules from: {}", self.rules_endpoint);
        let response = self
            .client
            .get(&self.rules_endpoint)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let response = check_status(response).await?;
        let rules: RulesResponse = response.json().await?;
        Ok(rules.data)
    }

    /// 為每個還沒有規則的關鍵字新增規則，回傳新增的數量
    pub async fn sync_rules(&self, track: &[String]) -> Result<usize> {
        let existing = self.rules().await?;
        let missing: Vec<&String> = track
            .iter()
            .filter(|keyword| !existing.iter().any(|rule| &rule.value == *keyword))
            .collect();

        if missing.is_empty() {
            tracing::info!("✅ Stream rules already cover {:?}", track);
            return Ok(0);
        }

        let body = AddRules {
            add: missing
                .iter()
                .map(|keyword| NewRule {
                    value: keyword,
                    tag: keyword,
                })
                .collect(),
        };

        tracing::info!("➕ Adding stream rules for {:?}", missing);
        let response = self
            .client
            .post(&self.rules_endpoint)
            .bearer_auth(&self.bearer_token)
            .json(&body)
            .send()
            .await?;
        check_status(response).await?;

        Ok(missing.len())
    }

    pub async fn connect(&self) -> Result<TweetStream> {
        tracing::info!("🔌 Connecting to stream: {}", self.stream_endpoint);
        let response = self
            .client
            .get(&self.stream_endpoint)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let response = check_status(response).await?;
        tracing::info!("✅ Connected, status {}", response.status());

        Ok(TweetStream::new(
            response.bytes_stream().map(|chunk| chunk.map(|b| b.to_vec())).boxed(),
        ))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(WordleError::StreamError {
        status: status.as_u16(),
        message,
    })
}

/// Newline-delimited JSON tweets from an open stream connection.
pub struct TweetStream {
    body: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    buffer: LineBuffer,
    finished: bool,
}

impl TweetStream {
    fn new(body: BoxStream<'static, reqwest::Result<Vec<u8>>>) -> Self {
        Self {
            body,
            buffer: LineBuffer::new(),
            finished: false,
        }
    }
}

#[async_trait]
impl MessageSource for TweetStream {
    async fn next_message(&mut self) -> Result<Option<String>> {
        loop {
            while let Some(line) = self.buffer.next_line() {
                if let Some(text) = decode_line(&line) {
                    return Ok(Some(text));
                }
            }

            if self.finished {
                return Ok(self.buffer.take_remainder().and_then(|line| decode_line(&line)));
            }

            match self.body.next().await {
                Some(chunk) => self.buffer.push(&chunk?),
                None => self.finished = true,
            }
        }
    }
}
