use amigo_api::types::{
    ChatMessage, ConsensusCandidate, ConsensusCard, ConsensusStatus, ConsensusSummary,
};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Client-side identity for one logical message. The wire carries no id, so
/// the key is a fingerprint over the fields the backend echoes verbatim:
/// author, time string, and text. An optimistic local send and its later
/// server echo produce the same key, which is what lets the merge reconcile
/// them instead of rendering the message twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey(u64);

impl MessageKey {
    pub fn derive(author: &str, time: &str, text: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        author.hash(&mut hasher);
        time.hash(&mut hasher);
        text.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// What a message renders as. Decided once, here, when the wire shape is
/// normalized; nothing downstream sniffs JSON fields again.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Text,
    ConsensusOptions {
        status: Option<ConsensusStatus>,
        summary: Option<ConsensusSummary>,
        candidates: Vec<ConsensusCandidate>,
    },
    ConsensusReached(ConsensusCard),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub key: MessageKey,
    pub author: String,
    pub text: String,
    pub time: String,
    pub body: MessageBody,
    /// True for an optimistic local send that no poll has confirmed yet.
    pub pending: bool,
}

impl Message {
    /// Normalize one wire entry. A present `consensus_card` wins over the
    /// candidate list, preserving the original dispatch order.
    pub fn from_wire(wire: ChatMessage) -> Self {
        let key = MessageKey::derive(&wire.username, &wire.time, &wire.message);
        let body = match wire.consensus {
            Some(payload) => match payload.consensus_card {
                Some(card) => MessageBody::ConsensusReached(card),
                None => MessageBody::ConsensusOptions {
                    status: payload.status,
                    summary: payload.summary,
                    candidates: payload.candidates,
                },
            },
            None => MessageBody::Text,
        };
        Self {
            key,
            author: wire.username,
            text: wire.message,
            time: wire.time,
            body,
            pending: false,
        }
    }

    /// An optimistic local send, plain text by construction.
    pub fn local(author: impl Into<String>, text: impl Into<String>, time: impl Into<String>) -> Self {
        let author = author.into();
        let text = text.into();
        let time = time.into();
        Self {
            key: MessageKey::derive(&author, &time, &text),
            author,
            text,
            time,
            body: MessageBody::Text,
            pending: true,
        }
    }

    /// The server has echoed this message back.
    pub fn confirmed(mut self) -> Self {
        self.pending = false;
        self
    }
}
