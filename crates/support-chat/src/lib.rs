//! An out-of-the-box support chat for Resezy, wired from environment
//! settings.
//!
//! The crate includes a CLI tool for chatting in the terminal. You can also
//! use it as a library to assemble sessions for your own front ends.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod config;

use std::io;
use std::path::Path;

pub use config::{ChatConfig, ConfigError};
use support_chat_core::{Session, SessionBuilder};
use support_chat_gemini_model::{GeminiConfigBuilder, GeminiProvider};

/// File name used when exporting without an explicit path.
pub const DEFAULT_EXPORT_FILE: &str = "resezy-chat-history.json";

/// Creates a session builder from the settings.
///
/// With an API key, replies come from Gemini and fall back to the rule
/// table. Without one, the session runs offline.
pub fn session_builder(config: &ChatConfig) -> SessionBuilder {
    let builder = match &config.api_key {
        Some(api_key) => {
            let mut gemini = GeminiConfigBuilder::with_api_key(api_key);
            if let Some(model) = &config.model {
                gemini = gemini.with_model(model);
            }
            if let Some(base_url) = &config.base_url {
                gemini = gemini.with_base_url(base_url);
            }
            let gemini = gemini.build();
            info!("using model {}", gemini.model());
            SessionBuilder::with_model_provider(GeminiProvider::new(gemini))
        }
        None => {
            info!("no API key configured, running offline");
            SessionBuilder::offline()
        }
    };
    builder.with_typing_delay(config.typing_delay)
}

/// Writes the session transcript to a JSON file.
pub async fn export_transcript<P: AsRef<Path>>(
    session: &Session,
    path: P,
) -> io::Result<()> {
    let json = session.export_json().await.map_err(io::Error::other)?;
    tokio::fs::write(path.as_ref(), json).await?;
    debug!("exported transcript to {}", path.as_ref().display());
    Ok(())
}

/// Re-exports of [`support_chat_core`] crate.
pub mod core {
    pub use support_chat_core::*;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{Value, json};
    use tokio::time::{sleep, timeout};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_export_transcript() {
        let config = ChatConfig {
            typing_delay: Duration::from_millis(10),
            ..Default::default()
        };
        let session = session_builder(&config).build();
        session.submit("thank you").unwrap();
        sleep(Duration::from_secs(1)).await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        export_transcript(&session, &path).await.unwrap();

        let exported = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(
            value,
            json!([
                { "role": "user", "content": "thank you" },
                {
                    "role": "assistant",
                    "content": support_chat_core::offline_response("thank you"),
                },
            ])
        );
    }

    #[tokio::test]
    async fn test_export_to_missing_directory() {
        let session = session_builder(&ChatConfig::default()).build();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(DEFAULT_EXPORT_FILE);
        assert!(export_transcript(&session, &path).await.is_err());
    }

    #[tokio::test]
    async fn test_online_builder() {
        let config = ChatConfig {
            api_key: Some("key".to_owned()),
            base_url: Some("http://127.0.0.1:9".to_owned()),
            typing_delay: Duration::ZERO,
            ..Default::default()
        };
        let session = session_builder(&config).build();
        session.submit("How do I get started?").unwrap();
        // Nothing listens on the discard port, so the offline reply is used.
        let transcript = timeout(Duration::from_secs(30), async {
            loop {
                let transcript = session.transcript().await.unwrap();
                if transcript.len() == 2 {
                    break transcript;
                }
                sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .unwrap();
        assert_eq!(
            transcript.messages()[1].content,
            support_chat_core::offline_response("How do I get started?")
        );
    }
}
