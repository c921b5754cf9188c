//! Mock support chat.
//!
//! Support agents, canned replies and the in-memory support conversation.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use quickmart_core::{AgentId, AgentStatus, MessageId};
use rand::seq::IndexedRandom;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::instrument;
use uuid::Uuid;

use super::Latency;

const AGENT_DELAY_MS: u64 = 500;
const AUTOMATED_RESPONSE_DELAY_MS: u64 = 1000;
const SEND_DELAY_MS: u64 = 300;
const REPLY_DELAY_MS: u64 = 1000;

const GREETING: &str = "Hello! How can I help you today?";

const AUTOMATED_RESPONSES: [&str; 10] = [
    "Thank you for contacting QuickMart support. How can I help you today?",
    "I understand your concern. Let me look into that for you.",
    "I'm checking our system for more information about your order.",
    "Is there anything else you'd like to know about our services?",
    "I apologize for the inconvenience. We're working to resolve this issue as quickly as possible.",
    "Your satisfaction is our top priority. We'll make sure this is addressed properly.",
    "Thank you for your patience. I'm still looking into this matter.",
    "I've found the information you requested. Here's what I can tell you...",
    "Would you like me to connect you with a specialist who can provide more detailed assistance?",
    "Is there anything else I can help you with today?",
];

const SUPPORT_REPLIES: [&str; 5] = [
    "I'll look into that for you right away.",
    "Thanks for reaching out. Let me check that for you.",
    "I understand your concern. Here's what we can do.",
    "That's a great question. The answer is...",
    "I'm sorry to hear that. Let me help resolve this issue.",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("No support agent is online")]
    NoAgentOnline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: &'static str,
    /// Avatar image URL.
    pub avatar: &'static str,
    pub status: AgentStatus,
}

fn agents() -> [Agent; 3] {
    [
        Agent {
            id: AgentId::new("1"),
            name: "Sarah Johnson",
            avatar: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?q=80&w=100&auto=format&fit=crop",
            status: AgentStatus::Online,
        },
        Agent {
            id: AgentId::new("2"),
            name: "Michael Chen",
            avatar: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?q=80&w=100&auto=format&fit=crop",
            status: AgentStatus::Online,
        },
        Agent {
            id: AgentId::new("3"),
            name: "Jessica Williams",
            avatar: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?q=80&w=100&auto=format&fit=crop",
            status: AgentStatus::Offline,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

/// A message in the support conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: new_message_id(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// Acknowledgement for a sent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReceipt {
    pub success: bool,
    pub message_id: MessageId,
}

/// A user message together with the agent reply it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub message: ChatMessage,
    pub reply: ChatMessage,
}

/// Support chat service.
#[derive(Debug)]
pub struct ChatService {
    conversation: Mutex<Vec<ChatMessage>>,
    latency: Latency,
}

impl ChatService {
    /// A service whose conversation opens with the agent greeting.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        let mut greeting = ChatMessage::new(GREETING, Sender::Agent);
        greeting.timestamp -= ChronoDuration::minutes(1);
        Self {
            conversation: Mutex::new(vec![greeting]),
            latency,
        }
    }

    /// A random online agent.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::NoAgentOnline` if every agent is offline.
    #[instrument(skip(self))]
    pub async fn random_agent(&self) -> Result<Agent, ChatError> {
        self.latency.wait(AGENT_DELAY_MS).await;
        let online: Vec<Agent> = agents()
            .into_iter()
            .filter(|agent| agent.status == AgentStatus::Online)
            .collect();
        online
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(ChatError::NoAgentOnline)
    }

    /// A canned reply. The message content is not inspected.
    #[instrument(skip(self, _message))]
    pub async fn automated_response(&self, _message: &str) -> &'static str {
        self.latency.wait(AUTOMATED_RESPONSE_DELAY_MS).await;
        pick(&AUTOMATED_RESPONSES)
    }

    #[instrument(skip(self, _text))]
    pub async fn send_message(&self, _text: &str) -> SendReceipt {
        self.latency.wait(SEND_DELAY_MS).await;
        SendReceipt {
            success: true,
            message_id: new_message_id(),
        }
    }

    /// The conversation so far, oldest first.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.conversation.lock().await.clone()
    }

    /// Append a user message, then an agent reply once the reply delay has
    /// passed.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` if `text` is blank.
    #[instrument(skip(self, text))]
    pub async fn post_message(&self, text: &str) -> Result<Exchange, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let message = ChatMessage::new(text, Sender::User);
        self.conversation.lock().await.push(message.clone());

        self.latency.wait(REPLY_DELAY_MS).await;

        let reply = ChatMessage::new(pick(&SUPPORT_REPLIES), Sender::Agent);
        self.conversation.lock().await.push(reply.clone());

        tracing::debug!(message_id = %message.id, "Support reply sent");
        Ok(Exchange { message, reply })
    }
}

fn pick(replies: &[&'static str]) -> &'static str {
    replies.choose(&mut rand::rng()).copied().unwrap_or(GREETING)
}

fn new_message_id() -> MessageId {
    MessageId::new(Uuid::new_v4().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_random_agent_is_online() {
        let chat = ChatService::new(Latency::none());
        for _ in 0..20 {
            let agent = chat.random_agent().await.unwrap();
            assert_eq!(agent.status, AgentStatus::Online);
            assert_ne!(agent.name, "Jessica Williams");
        }
    }

    #[tokio::test]
    async fn test_automated_response_is_canned() {
        let chat = ChatService::new(Latency::none());
        let response = chat.automated_response("where is my order?").await;
        assert!(AUTOMATED_RESPONSES.contains(&response));
    }

    #[tokio::test]
    async fn test_send_message_acknowledges() {
        let chat = ChatService::new(Latency::none());
        let first = chat.send_message("hi").await;
        let second = chat.send_message("hi").await;
        assert!(first.success);
        assert_ne!(first.message_id, second.message_id);
    }

    #[tokio::test]
    async fn test_conversation_starts_with_greeting() {
        let chat = ChatService::new(Latency::none());
        let messages = chat.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, GREETING);
        assert_eq!(messages[0].sender, Sender::Agent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_message_appends_user_message_then_reply() {
        let chat = ChatService::new(Latency::new(true));
        let start = tokio::time::Instant::now();

        let exchange = chat.post_message("  My order is late ").await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(REPLY_DELAY_MS));
        assert_eq!(exchange.message.text, "My order is late");
        assert_eq!(exchange.message.sender, Sender::User);
        assert_eq!(exchange.reply.sender, Sender::Agent);
        assert!(SUPPORT_REPLIES.contains(&exchange.reply.text.as_str()));

        let messages = chat.messages().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1], exchange.message);
        assert_eq!(messages[2], exchange.reply);
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let chat = ChatService::new(Latency::none());
        assert_eq!(
            chat.post_message("   ").await.unwrap_err(),
            ChatError::EmptyMessage
        );
        assert_eq!(chat.messages().await.len(), 1);
    }
}
