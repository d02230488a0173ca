//! Conversation assistant seam.
//!
//! The AI backend is an external collaborator. Calls are bounded by a timeout
//! and any failure is answered with a fixed fallback reply.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Reply used when the backend fails or is too slow.
pub const FALLBACK_REPLY: &str =
    "Pasayloa ko, dili ko makatubag karon. (Sorry, I can't answer right now. Please try again.)";

/// Turns kept as context for the backend.
pub const MAX_HISTORY_TURNS: usize = 20;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant timed out after {0:?}")]
    Timeout(Duration),

    #[error("assistant backend failed: {0}")]
    Backend(String),

    #[error("assistant returned an empty reply")]
    EmptyReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// Reply handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    /// True when `text` is [`FALLBACK_REPLY`].
    pub fallback: bool,
}

/// A service that continues a conversation.
pub trait ConversationBackend {
    fn reply(
        &self,
        prompt: &str,
        history: &[ConversationTurn],
    ) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

/// Call `backend` under `timeout`.
pub async fn request_reply<B: ConversationBackend>(
    backend: &B,
    prompt: &str,
    history: &[ConversationTurn],
    timeout: Duration,
) -> Result<String, AssistantError> {
    let text = tokio::time::timeout(timeout, backend.reply(prompt, history))
        .await
        .map_err(|_| AssistantError::Timeout(timeout))??;

    let text = text.trim();
    if text.is_empty() {
        return Err(AssistantError::EmptyReply);
    }
    Ok(text.to_string())
}

/// A running conversation with bounded history.
#[derive(Debug, Default)]
pub struct Conversation {
    history: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Send `prompt`; failures yield the fallback reply and are not remembered.
    pub async fn ask<B: ConversationBackend>(
        &mut self,
        backend: &B,
        prompt: &str,
        timeout: Duration,
    ) -> AssistantReply {
        let prompt = prompt.trim();
        match request_reply(backend, prompt, &self.history, timeout).await {
            Ok(text) => {
                self.push(Speaker::User, prompt);
                self.push(Speaker::Assistant, &text);
                AssistantReply {
                    text,
                    fallback: false,
                }
            }
            Err(e) => {
                tracing::warn!("Assistant unavailable, using fallback reply: {}", e);
                AssistantReply {
                    text: FALLBACK_REPLY.to_string(),
                    fallback: true,
                }
            }
        }
    }

    fn push(&mut self, speaker: Speaker, text: &str) {
        self.history.push(ConversationTurn {
            speaker,
            text: text.to_string(),
        });
        if self.history.len() > MAX_HISTORY_TURNS {
            let excess = self.history.len() - MAX_HISTORY_TURNS;
            self.history.drain(..excess);
        }
    }
}

/// Backend with no remote service: answers dictionary lookups from the dataset.
pub struct GlossaryBackend {
    entries: Vec<bisaya_core::VocabularyEntry>,
}

impl GlossaryBackend {
    pub fn new(entries: Vec<bisaya_core::VocabularyEntry>) -> Self {
        Self { entries }
    }
}

impl ConversationBackend for GlossaryBackend {
    async fn reply(
        &self,
        prompt: &str,
        _history: &[ConversationTurn],
    ) -> Result<String, AssistantError> {
        let query = prompt.trim().trim_end_matches('?').to_lowercase();
        let found = self.entries.iter().find(|e| {
            e.source_word.to_lowercase() == query || e.english.to_lowercase() == query
        });

        match found {
            Some(entry) => {
                let example = entry.example(bisaya_core::Tier::Beginner);
                let mut reply = format!(
                    "{} ({}) means \"{}\".",
                    entry.source_word, entry.part_of_speech, entry.english
                );
                if !example.bisaya.is_empty() {
                    reply.push_str(&format!(" Example: {} ({})", example.bisaya, example.english));
                }
                Ok(reply)
            }
            None => Err(AssistantError::Backend(format!("no entry for '{}'", query))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bisaya_core::VocabularyEntry;
    use pretty_assertions::assert_eq;

    struct EchoBackend;

    impl ConversationBackend for EchoBackend {
        async fn reply(
            &self,
            prompt: &str,
            history: &[ConversationTurn],
        ) -> Result<String, AssistantError> {
            Ok(format!("{} [{}]", prompt, history.len()))
        }
    }

    struct SlowBackend(Duration);

    impl ConversationBackend for SlowBackend {
        async fn reply(&self, _: &str, _: &[ConversationTurn]) -> Result<String, AssistantError> {
            tokio::time::sleep(self.0).await;
            Ok("too late".to_string())
        }
    }

    struct BlankBackend;

    impl ConversationBackend for BlankBackend {
        async fn reply(&self, _: &str, _: &[ConversationTurn]) -> Result<String, AssistantError> {
            Ok("   ".to_string())
        }
    }

    #[tokio::test]
    async fn successful_reply_is_remembered() {
        let mut conversation = Conversation::new();
        let reply = conversation
            .ask(&EchoBackend, " Kumusta? ", Duration::from_secs(1))
            .await;
        assert_eq!(
            reply,
            AssistantReply {
                text: "Kumusta? [0]".to_string(),
                fallback: false
            }
        );

        let reply = conversation.ask(&EchoBackend, "Maayo", Duration::from_secs(1)).await;
        assert_eq!(reply.text, "Maayo [2]");
        assert_eq!(conversation.history().len(), 4);
        assert_eq!(conversation.history()[0].speaker, Speaker::User);
    }

    #[tokio::test]
    async fn slow_backend_gets_fallback() {
        let backend = SlowBackend(Duration::from_millis(200));
        let mut conversation = Conversation::new();
        let reply = conversation
            .ask(&backend, "hello", Duration::from_millis(20))
            .await;
        assert!(reply.fallback);
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert!(conversation.history().is_empty());

        assert!(matches!(
            request_reply(&backend, "hello", &[], Duration::from_millis(20)).await,
            Err(AssistantError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn blank_reply_is_an_error() {
        assert!(matches!(
            request_reply(&BlankBackend, "hi", &[], Duration::from_secs(1)).await,
            Err(AssistantError::EmptyReply)
        ));
    }

    #[tokio::test]
    async fn history_is_bounded() {
        let mut conversation = Conversation::new();
        for i in 0..MAX_HISTORY_TURNS {
            conversation
                .ask(&EchoBackend, &format!("q{i}"), Duration::from_secs(1))
                .await;
        }
        assert_eq!(conversation.history().len(), MAX_HISTORY_TURNS);
        assert_eq!(conversation.history().last().unwrap().speaker, Speaker::Assistant);
    }

    #[tokio::test]
    async fn glossary_backend_looks_up_words() {
        let mut entry = VocabularyEntry {
            source_word: "balay".to_string(),
            english: "house".to_string(),
            part_of_speech: "Noun".to_string(),
            ..Default::default()
        };
        entry.examples[0].bisaya = "Dako ang balay.".to_string();
        entry.examples[0].english = "The house is big.".to_string();
        let backend = GlossaryBackend::new(vec![entry]);

        let reply = backend.reply("House?", &[]).await.unwrap();
        assert_eq!(
            reply,
            "balay (Noun) means \"house\". Example: Dako ang balay. (The house is big.)"
        );
        assert!(backend.reply("iro", &[]).await.is_err());
    }
}
