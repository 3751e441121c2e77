use crate::adapters::payload::decode_line;
use crate::domain::ports::MessageSource;
use crate::utils::error::{Result, WordleError};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

type BoxedReader = Box<dyn AsyncRead + Unpin + Send>;

/// Replays a captured stream (the same newline-delimited JSON the live
/// endpoint sends) from a file, or from stdin when the path is `-`.
pub struct ReplaySource {
    path: String,
    lines: Lines<BufReader<BoxedReader>>,
}

impl ReplaySource {
    pub async fn open(path: &str) -> Result<Self> {
        let reader: BoxedReader = if path == "-" {
            tracing::info!("📼 Replaying messages from stdin");
            Box::new(tokio::io::stdin())
        } else {
            tracing::info!("📼 Replaying messages from: {}", path);
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|source| WordleError::ReplayError {
                    path: path.to_string(),
                    source,
                })?;
            Box::new(file)
        };

        let mut source = Self::from_reader(reader);
        source.path = if path == "-" { "stdin".to_string() } else { path.to_string() };
        Ok(source)
    }

    pub fn from_reader(reader: BoxedReader) -> Self {
        Self {
            path: "<reader>".to_string(),
            lines: BufReader::new(reader).lines(),
        }
    }
}

#[async_trait]
impl MessageSource for ReplaySource {
    async fn next_message(&mut self) -> Result<Option<String>> {
        // 讀取失敗（例如非 UTF-8）是擷取檔的問題，不是裝置的問題
        let path = &self.path;
        while let Some(line) = self
            .lines
            .next_line()
            .await
            .map_err(|source| WordleError::ReplayError {
                path: path.clone(),
                source,
            })?
        {
            if let Some(text) = decode_line(&line) {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ErrorCategory, ErrorSeverity};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CAPTURE: &str = concat!(
        r#"{"data":{"id":"1","text":"hello"}}"#,
        "\n\n",
        "garbage\n",
        r#"{"data":{"id":"2","text":"🟨⬛⬛⬛⬛\n🟩🟩🟩🟩🟩"}}"#,
        "\n"
    );

    #[tokio::test]
    async fn test_replay_from_reader() {
        let mut source = ReplaySource::from_reader(Box::new(std::io::Cursor::new(CAPTURE)));

        assert_eq!(source.next_message().await.unwrap().as_deref(), Some("hello"));
        assert_eq!(
            source.next_message().await.unwrap().as_deref(),
            Some("🟨⬛⬛⬛⬛\n🟩🟩🟩🟩🟩")
        );
        assert_eq!(source.next_message().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_replay_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(CAPTURE.as_bytes()).unwrap();

        let mut source = ReplaySource::open(temp_file.path().to_str().unwrap())
            .await
            .unwrap();

        let mut count = 0;
        while source.next_message().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_replay_missing_file() {
        let err = match ReplaySource::open("/nonexistent/capture.ndjson").await {
            Err(err) => err,
            Ok(_) => panic!("opening a missing capture should fail"),
        };

        assert!(matches!(
            &err,
            WordleError::ReplayError { path, .. } if path == "/nonexistent/capture.ndjson"
        ));
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[tokio::test]
    async fn test_replay_invalid_utf8_is_data_error() {
        let bytes: Vec<u8> = vec![0xff, 0xfe, b'\n'];
        let mut source = ReplaySource::from_reader(Box::new(std::io::Cursor::new(bytes)));

        let err = source.next_message().await.unwrap_err();

        assert!(matches!(err, WordleError::ReplayError { .. }));
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_ne!(err.severity(), ErrorSeverity::Critical);
    }
}
