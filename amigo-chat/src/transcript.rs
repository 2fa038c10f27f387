use crate::message::{Message, MessageKey};
use std::collections::HashSet;

/// The client's view of one trip's chat: the last server-confirmed batch plus
/// any optimistic local sends the server has not echoed yet. Confirmed
/// messages keep server order; pending sends render after them.
#[derive(Debug, Default)]
pub struct Transcript {
    confirmed: Vec<Message>,
    pending: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile a freshly fetched batch. Union by key: the batch replaces
    /// the confirmed list (server order is authoritative), duplicate keys
    /// within one batch collapse, and every pending send whose key now
    /// appears in the batch is claimed by its echo. Returns true when
    /// anything visible changed, so merging an unchanged backend transcript
    /// twice is a no-op the second time.
    pub fn merge(&mut self, batch: Vec<Message>) -> bool {
        let mut seen: HashSet<MessageKey> = HashSet::new();
        let confirmed: Vec<Message> = batch
            .into_iter()
            .filter(|msg| seen.insert(msg.key))
            .map(Message::confirmed)
            .collect();

        let pending_before = self.pending.len();
        self.pending.retain(|msg| !seen.contains(&msg.key));

        let changed = confirmed != self.confirmed || self.pending.len() != pending_before;
        self.confirmed = confirmed;
        changed
    }

    /// Optimistic append. A message whose key is already visible is dropped.
    pub fn apply_local(&mut self, message: Message) -> bool {
        if self.contains(message.key) {
            return false;
        }
        self.pending.push(message);
        true
    }

    pub fn contains(&self, key: MessageKey) -> bool {
        self.confirmed
            .iter()
            .chain(self.pending.iter())
            .any(|msg| msg.key == key)
    }

    pub fn messages(&self) -> Vec<Message> {
        self.confirmed
            .iter()
            .chain(self.pending.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.confirmed.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
