pub mod client;
mod query;
mod transcript;

pub use client::{format_request, CleverbotClient, Reply};
pub use query::{CleverbotQuery, ConversationState};
pub use transcript::{Line, Speaker, Transcript};
