//! Chat transcript shown next to the build form

use crate::client::BuildReply;

/// Generic notice shown when a request fails
pub const FETCH_FAILED_TEXT: &str = "An error occurred while fetching data.";

/// One message in the chat output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    /// Local notice, e.g. asking for a non-empty question
    Notice(String),
    /// A successful reply, both texts kept verbatim
    Reply {
        requirements: String,
        build: String,
    },
    /// A failed request
    Failure(String),
}

impl ChatMessage {
    pub fn render(&self) -> String {
        match self {
            ChatMessage::Notice(text) | ChatMessage::Failure(text) => text.clone(),
            ChatMessage::Reply {
                requirements,
                build,
            } => format!("Filtered Requirements:\n{requirements}\n\nPC Build:\n{build}"),
        }
    }
}

impl From<&BuildReply> for ChatMessage {
    fn from(reply: &BuildReply) -> Self {
        ChatMessage::Reply {
            requirements: reply.filtered_requirements.clone(),
            build: reply.pc_build.clone(),
        }
    }
}

/// Append-only list of chat messages
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whole transcript, messages separated by a blank line
    pub fn render(&self) -> String {
        self.messages
            .iter()
            .map(ChatMessage::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
