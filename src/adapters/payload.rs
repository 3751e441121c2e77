use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TweetPayload {
    pub data: Tweet,
    #[serde(default)]
    pub matching_rules: Vec<MatchingRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingRule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tag: Option<String>,
}

/// 解析串流中的一行。空行是 keep-alive，不是 tweet 的 JSON 也略過
pub fn decode_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match serde_json::from_str::<TweetPayload>(line) {
        Ok(payload) => {
            tracing::debug!(
                "Received tweet {} ({} matching rules)",
                payload.data.id,
                payload.matching_rules.len()
            );
            Some(payload.data.text)
        }
        Err(e) => {
            tracing::debug!("Skipping non-tweet stream line: {} ({})", line, e);
            None
        }
    }
}

/// Splits a byte stream into lines, holding partial lines (and partial UTF-8
/// sequences) until their terminating newline arrives.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    pub fn next_line(&mut self) -> Option<String> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=end).collect();
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// 串流結束時剩下沒有換行的資料
    pub fn take_remainder(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}
