use serde::{Deserialize, Serialize};

use crate::errors::FeedError;
use crate::flex_id::FlexId;

/// Public mirror of the FanCode live-events feed.
pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/drmlive/fancode-live-events/main/fancode.json";

// The feed host answers differently to non-browser agents.
const FEED_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// One match record as the feed ships it. Every field is optional or
/// defaulted: a record missing half its fields still deserializes, and the
/// normalizer fills in the blanks per record.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawMatch {
    #[serde(default, alias = "id")]
    pub match_id: FlexId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub status: String,

    /// Formatted local-time string, e.g. "11:00:00 PM 21-10-2025"
    #[serde(default, rename = "startTime")]
    pub start_time: String,

    /// Thumbnail URL
    #[serde(default)]
    pub src: Option<String>,

    /// Server-side ad-insertion stream
    #[serde(default)]
    pub dai_url: Option<String>,

    /// Ad-free stream variant (subject to the regional host rewrite)
    #[serde(default)]
    pub adfree_url: Option<String>,

    #[serde(default)]
    pub event_category: Option<String>,

    #[serde(default)]
    pub team_1: Option<String>,

    #[serde(default)]
    pub team_2: Option<String>,

    #[serde(default)]
    pub event_name: Option<String>,

    #[serde(default)]
    pub match_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawMeta {
    #[serde(default)]
    pub last_updated_at: Option<String>,
}

/// HTTP client for the match feed. Fetching is idempotent and safe to retry;
/// each call is one GET with no session state.
#[derive(Debug, Clone)]
pub struct FeedClient {
    pub url: String,
    client: reqwest::Client,
}

impl FeedClient {
    pub fn new(url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(FEED_USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { url, client }
    }

    /// Fetches the feed body and parses it as JSON. All failure modes
    /// (network, non-2xx, bad JSON) come back as a typed `FeedError`; this
    /// never panics and never leaks a reqwest error type upward.
    pub async fn fetch_raw(&self) -> Result<serde_json::Value, FeedError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FeedError::MalformedJson(e.to_string()))
    }

    /// Fetch plus normalization in one call: the whole
    /// fetch → reshape → canonical-snapshot pipeline.
    pub async fn fetch_snapshot(
        &self,
        feed_tz: chrono_tz::Tz,
    ) -> Result<crate::parser::FeedSnapshot, FeedError> {
        let raw = self.fetch_raw().await?;
        crate::parser::normalize_feed(&raw, feed_tz)
    }
}
