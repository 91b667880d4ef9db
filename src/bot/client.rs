use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};
use url::Url;

use super::query::ConversationState;
use crate::config::Config;
use crate::constants::*;
use crate::error::{CleverbotError, Result};
use crate::utils::{collapse_whitespace, truncate_str};

/// One reply from the `getreply` endpoint.
///
/// Only the three fields the client tracks are decoded; anything else the
/// server sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reply {
    /// Conversation token to send with the next request.
    pub cs: String,
    /// Reply text.
    pub output: String,
    /// Opaque auxiliary value chosen by the server.
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub random_number: i64,
}

impl Reply {
    /// Parse a full response body. Line breaks inside the body are fine;
    /// bytes that are not UTF-8 are a parse failure.
    pub fn parse(body: impl AsRef<[u8]>) -> Result<Self> {
        let body = trim_ascii_whitespace(body.as_ref());
        if body.is_empty() {
            return Err(CleverbotError::EmptyBody);
        }
        Ok(serde_json::from_slice(body)?)
    }
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

fn int_or_numeric_string<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("random_number is not an integer: {:?}", s))),
    }
}

/// Build the request URL for one `getreply` call.
///
/// Every value is form-encoded, so whitespace in the phrase becomes `+`
/// (one per run) and reserved characters in the key or token are escaped.
/// The `cs` parameter is omitted when `conversation_id` is empty.
pub fn format_request(base_url: &Url, api_key: &str, phrase: &str, conversation_id: &str) -> Url {
    let mut url = base_url.clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("key", api_key)
            .append_pair("input", &collapse_whitespace(phrase))
            .append_pair("wrapper", WRAPPER_ID);
        if !conversation_id.is_empty() {
            query.append_pair("cs", conversation_id);
        }
    }
    url
}

/// Copy of `url` with the `key` parameter masked, for logging.
pub fn redact_key(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

/// Stateless Cleverbot API client.
///
/// Holds the credential and HTTP settings only. Conversation state is passed
/// in and handed back, so a failed call can never leave it half-updated.
#[derive(Debug, Clone)]
pub struct CleverbotClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl CleverbotClient {
    /// Client for the public endpoint with default timeouts.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(api_key, &Config::default())
    }

    pub fn from_config(api_key: impl Into<String>, config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs.max(MIN_TIMEOUT_SECS)))
            .connect_timeout(Duration::from_secs(
                config.connect_timeout_secs.max(MIN_TIMEOUT_SECS),
            ))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL that [`get_reply`](Self::get_reply) would request.
    pub fn request_url(&self, phrase: &str, conversation_id: &str) -> Url {
        format_request(&self.base_url, &self.api_key, phrase, conversation_id)
    }

    /// Send `phrase` in the context of `state` and return the state that
    /// follows from the reply. `state` itself is never touched.
    pub async fn send(&self, phrase: &str, state: &ConversationState) -> Result<ConversationState> {
        let reply = self.get_reply(phrase, state.conversation_id()).await?;
        Ok(ConversationState::from(reply))
    }

    /// Issue one GET to the reply endpoint and parse the body.
    pub async fn get_reply(&self, phrase: &str, conversation_id: &str) -> Result<Reply> {
        let url = self.request_url(phrase, conversation_id);
        debug!(
            url = %redact_key(&url),
            new_conversation = conversation_id.is_empty(),
            "sending getreply request"
        );

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "getreply request rejected");
            return Err(CleverbotError::Status {
                status,
                body: truncate_str(body.trim(), MAX_ERROR_BODY_CHARS),
            });
        }

        let body = response.bytes().await?;
        let reply = Reply::parse(&body)?;
        debug!(cs = %reply.cs, random_number = reply.random_number, "received reply");
        Ok(reply)
    }
}
