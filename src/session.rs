//! Request/response cycle of the build assistant
//!
//! A [`BuildSession`] ties together the client, the parser, the form and
//! the chat log. Only one request may be outstanding per session; a submit
//! made while another is pending is refused instead of racing it.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, MutexGuard};

use crate::chat::{ChatLog, ChatMessage, FETCH_FAILED_TEXT};
use crate::client::{BuildClient, BuildReply};
use crate::error::ForgeError;
use crate::form::BuildForm;
use crate::parsers::ParsedBuild;
use crate::parsers::build::BuildParser;

/// Marks a request in flight until dropped
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Result of a successful submit
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub reply: BuildReply,
    pub build: ParsedBuild,
}

pub struct BuildSession {
    client: BuildClient,
    parser: BuildParser,
    form: Mutex<BuildForm>,
    chat: Mutex<ChatLog>,
    in_flight: AtomicBool,
}

impl BuildSession {
    pub fn new(client: BuildClient, parser: BuildParser, form: BuildForm) -> Self {
        Self {
            client,
            parser,
            form: Mutex::new(form),
            chat: Mutex::new(ChatLog::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a request is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn form(&self) -> MutexGuard<'_, BuildForm> {
        self.form.lock().await
    }

    pub async fn chat(&self) -> MutexGuard<'_, ChatLog> {
        self.chat.lock().await
    }

    /// Send a query, then parse the reply into the form.
    ///
    /// On failure the form keeps its previous contents and the chat log
    /// gets the generic failure notice; the returned error carries the cause.
    pub async fn submit(&self, query: &str) -> Result<BuildOutcome, ForgeError> {
        if let Err(err) = self.client.check_query(query) {
            self.chat.lock().await.push(ChatMessage::Notice(err.to_string()));
            return Err(err);
        }

        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            tracing::warn!("Ignoring query while a build request is pending");
            return Err(ForgeError::RequestInFlight);
        };

        let reply = match self.client.request_build(query).await {
            Ok(reply) => reply,
            Err(err) => {
                // The chat only ever shows the generic notice; details stay in the error
                tracing::error!("Build request failed: {err}");
                self.chat
                    .lock()
                    .await
                    .push(ChatMessage::Failure(FETCH_FAILED_TEXT.to_string()));
                return Err(err);
            }
        };

        self.chat.lock().await.push(ChatMessage::from(&reply));

        tracing::debug!("Parsing PC build data");
        let build = self.parser.parse(&reply.pc_build);
        self.form.lock().await.apply(&build);

        tracing::info!(
            "Build applied: {}/{} components, {} unparsed lines",
            build.filled(),
            build.len(),
            build.mismatches().len()
        );

        Ok(BuildOutcome { reply, build })
    }
}
