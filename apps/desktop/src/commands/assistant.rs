//! Conversation assistant commands.

use crate::assistant::{AssistantReply, ConversationBackend};
use crate::state::AppState;

use super::CommandError;

/// Ask the assistant. Backend failures come back as the fallback reply.
pub async fn ask_assistant<B: ConversationBackend>(
    prompt: String,
    backend: &B,
    state: &AppState,
) -> Result<AssistantReply, CommandError> {
    if prompt.trim().is_empty() {
        return Err(CommandError::new("prompt must not be empty"));
    }
    let mut conversation = state.conversation.lock().await;
    Ok(conversation
        .ask(backend, &prompt, state.config.assistant_timeout)
        .await)
}

pub async fn reset_conversation(state: &AppState) -> Result<(), CommandError> {
    state.conversation.lock().await.clear();
    Ok(())
}
