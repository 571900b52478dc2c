//! Client for the PC Forge build service
//!
//! A build is requested with a single POST:
//!
//! - **Endpoint**: `POST {base_url}/api/build-pc`
//! - **Request**: `{ "query": "<free text>" }`
//! - **Response**: `{ "pc_build": "...", "filtered_requirements": "..." }`
//! - **Rejection**: non-success status with `{ "error": "<message>" }`, e.g. a
//!   400 when the query is not about PC building
//!
//! `pc_build` is the text fed to [`crate::parsers::build::BuildParser`];
//! `filtered_requirements` is shown verbatim. There is no retry.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ServerConfig;
use crate::error::ForgeError;

pub mod http_client;

use http_client::create_shared_client;

const BUILD_PC_PATH: &str = "api/build-pc";

/// Shown when the service omits the build text
pub const NO_BUILD_TEXT: &str = "No PC build generated.";

/// Shown when the service omits the requirements text
pub const NO_REQUIREMENTS_TEXT: &str = "No filtered requirements.";

static PC_TOPIC_REGEX: OnceLock<Regex> = OnceLock::new();

fn pc_topic_regex() -> &'static Regex {
    PC_TOPIC_REGEX.get_or_init(|| {
        Regex::new(r"(?i)\b(pc|computer|hardware|build)\b").expect("Failed to compile topic regex")
    })
}

/// True if the query mentions PC building as a whole word
pub fn is_pc_query(query: &str) -> bool {
    pc_topic_regex().is_match(query)
}

#[derive(Debug, Serialize)]
struct BuildRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct BuildResponse {
    pc_build: Option<String>,
    filtered_requirements: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// The service's answer to a build query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReply {
    /// Requirements summary, displayed as-is
    pub filtered_requirements: String,
    /// Build description to parse
    pub pc_build: String,
}

impl BuildResponse {
    /// Missing or empty texts are replaced by their placeholders
    fn into_reply(self) -> BuildReply {
        fn or_fallback(value: Option<String>, fallback: &str) -> String {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        }

        BuildReply {
            filtered_requirements: or_fallback(self.filtered_requirements, NO_REQUIREMENTS_TEXT),
            pc_build: or_fallback(self.pc_build, NO_BUILD_TEXT),
        }
    }
}

/// Client for the build endpoint
pub struct BuildClient {
    client: Arc<Client>,
    endpoint: Url,
    require_pc_topic: bool,
}

impl BuildClient {
    pub fn new(server: &ServerConfig) -> Result<Self, ForgeError> {
        Self::with_client(create_shared_client(server)?, &server.base_url)
    }

    /// Create a client reusing an existing HTTP client
    pub fn with_client(client: Arc<Client>, base_url: &str) -> Result<Self, ForgeError> {
        Ok(Self {
            client,
            endpoint: build_endpoint(base_url)?,
            require_pc_topic: false,
        })
    }

    /// Refuse queries that do not mention PC building before sending them
    pub fn require_pc_topic(mut self, require: bool) -> Self {
        self.require_pc_topic = require;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn http_client(&self) -> Arc<Client> {
        Arc::clone(&self.client)
    }

    /// Check a query locally, before any request is made
    pub fn check_query(&self, query: &str) -> Result<(), ForgeError> {
        if query.trim().is_empty() {
            return Err(ForgeError::EmptyQuery);
        }
        if self.require_pc_topic && !is_pc_query(query) {
            return Err(ForgeError::OffTopic);
        }
        Ok(())
    }

    /// Ask the service for a build
    pub async fn request_build(&self, query: &str) -> Result<BuildReply, ForgeError> {
        self.check_query(query)?;

        tracing::info!("Requesting build from {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&BuildRequest {
                query: query.trim(),
            })
            .send()
            .await
            .map_err(ForgeError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // Rejections carry a readable message; anything else is reported by status
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.error)
                .filter(|m| !m.trim().is_empty());

            return Err(match message {
                Some(message) => {
                    tracing::warn!("Build service rejected query ({status}): {message}");
                    ForgeError::Rejected(message)
                }
                None => {
                    tracing::warn!("Build service error: {status}");
                    ForgeError::Status(status)
                }
            });
        }

        let body: BuildResponse = response.json().await.map_err(ForgeError::Decode)?;

        tracing::debug!(
            "Received build reply: pc_build {} bytes, requirements {} bytes",
            body.pc_build.as_deref().map_or(0, str::len),
            body.filtered_requirements.as_deref().map_or(0, str::len)
        );

        Ok(body.into_reply())
    }
}

/// `{base_url}/api/build-pc`, keeping any path prefix of the base URL
fn build_endpoint(base_url: &str) -> Result<Url, ForgeError> {
    let mut base = base_url.trim().trim_end_matches('/').to_string();
    base.push('/');
    Ok(Url::parse(&base)?.join(BUILD_PC_PATH)?)
}
