//! # Cleverchat - Cleverbot API client
//!
//! Sends phrases to the Cleverbot `getreply` endpoint and keeps track of the
//! conversation token between calls.
//!
//! ```no_run
//! # async fn demo() -> cleverchat::Result<()> {
//! let mut query = cleverchat::CleverbotQuery::new("YOUR_API_KEY", "Hello there")?;
//! query.send_request().await?;
//! println!("{}", query.last_response().unwrap_or_default());
//!
//! query.phrase = "How are you?".to_string();
//! query.send_request().await?;
//! # Ok(())
//! # }
//! ```

pub mod bot;
pub mod config;
pub mod constants;
pub mod error;
pub mod utils;

pub use bot::{format_request, CleverbotClient, CleverbotQuery, ConversationState, Reply, Transcript};
pub use config::Config;
pub use error::{CleverbotError, Result};
