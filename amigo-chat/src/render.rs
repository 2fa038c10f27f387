use crate::message::{Message, MessageBody};
use amigo_api::types::{ConsensusCandidate, ConsensusCard, ConsensusStatus, ConsensusSummary};

/// What one transcript entry renders as. Front ends only format these; all
/// classification happens here.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderBlock {
    /// The current user's message, right-aligned.
    OwnMessage {
        text: String,
        time: String,
        pending: bool,
    },
    /// Someone else's plain message, left-aligned.
    PeerMessage {
        author: String,
        text: String,
        time: String,
    },
    /// Destination options the group is still choosing between.
    DestinationCarousel {
        author: String,
        status: Option<ConsensusStatus>,
        summary: Option<ConsensusSummary>,
        candidates: Vec<ConsensusCandidate>,
    },
    /// The finalized plan.
    ConsensusCard {
        author: String,
        card: ConsensusCard,
    },
}

/// Pure dispatch of one message for one viewer. Own messages win over any
/// payload; consensus bodies split on card vs candidates; everything else is
/// peer text.
pub fn render_message(message: &Message, current_username: &str) -> RenderBlock {
    if message.author == current_username {
        return RenderBlock::OwnMessage {
            text: message.text.clone(),
            time: message.time.clone(),
            pending: message.pending,
        };
    }

    match &message.body {
        MessageBody::ConsensusReached(card) => RenderBlock::ConsensusCard {
            author: message.author.clone(),
            card: card.clone(),
        },
        MessageBody::ConsensusOptions {
            status,
            summary,
            candidates,
        } => RenderBlock::DestinationCarousel {
            author: message.author.clone(),
            status: *status,
            summary: summary.clone(),
            candidates: candidates.clone(),
        },
        MessageBody::Text => RenderBlock::PeerMessage {
            author: message.author.clone(),
            text: message.text.clone(),
            time: message.time.clone(),
        },
    }
}
