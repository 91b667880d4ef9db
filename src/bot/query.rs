use super::client::{CleverbotClient, Reply};
use crate::error::Result;

/// Everything the server told us about the conversation so far.
///
/// An empty `conversation_id` means the next request starts a new
/// conversation. `last_response` and `random_number` stay `None` until a
/// reply has been received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    conversation_id: String,
    last_response: Option<String>,
    random_number: Option<i64>,
}

impl ConversationState {
    /// State for a brand-new conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue an existing conversation identified by `conversation_id`.
    pub fn resume(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            ..Self::default()
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    pub fn random_number(&self) -> Option<i64> {
        self.random_number
    }

    /// True until the server has handed out a conversation token.
    pub fn is_new(&self) -> bool {
        self.conversation_id.is_empty()
    }
}

impl From<Reply> for ConversationState {
    fn from(reply: Reply) -> Self {
        Self {
            conversation_id: reply.cs,
            last_response: Some(reply.output),
            random_number: Some(reply.random_number),
        }
    }
}

/// A single Cleverbot conversation.
///
/// Set [`phrase`](Self::phrase) and call [`send_request`](Self::send_request)
/// to get the next reply. The conversation token is carried between calls
/// automatically; a failed call leaves it (and the last reply) untouched, so
/// the caller can simply try again.
#[derive(Debug, Clone)]
pub struct CleverbotQuery {
    client: CleverbotClient,
    /// Next utterance to send.
    pub phrase: String,
    state: ConversationState,
}

impl CleverbotQuery {
    /// New conversation against the public endpoint. No network activity.
    pub fn new(api_key: impl Into<String>, phrase: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(CleverbotClient::new(api_key)?, phrase))
    }

    /// New conversation using an already configured client.
    pub fn with_client(client: CleverbotClient, phrase: impl Into<String>) -> Self {
        Self {
            client,
            phrase: phrase.into(),
            state: ConversationState::new(),
        }
    }

    pub fn api_key(&self) -> &str {
        self.client.api_key()
    }

    pub fn conversation_id(&self) -> &str {
        self.state.conversation_id()
    }

    /// Point the next request at another conversation. `""` starts a new one.
    pub fn set_conversation_id(&mut self, conversation_id: impl Into<String>) {
        self.state.conversation_id = conversation_id.into();
    }

    /// Start a new conversation on the next request.
    pub fn reset(&mut self) {
        self.state.conversation_id.clear();
    }

    pub fn last_response(&self) -> Option<&str> {
        self.state.last_response()
    }

    pub fn random_number(&self) -> Option<i64> {
        self.state.random_number()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Send the current phrase and record the reply.
    ///
    /// On success the conversation token, last response, and random number
    /// are replaced together. On failure nothing changes.
    pub async fn send_request(&mut self) -> Result<()> {
        let next = self.client.send(&self.phrase, &self.state).await?;
        self.state = next;
        Ok(())
    }
}
