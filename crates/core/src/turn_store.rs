use crate::message::{Message, Role};

/// Append-only, chronologically ordered history of one interview.
///
/// The transcript pairs messages by position (even index = question, odd index =
/// answer), so nothing here may reorder or remove entries.
#[derive(Debug, Default, Clone)]
pub struct TurnStore {
    messages: Vec<Message>,
}

impl TurnStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message to the end. Content is not validated; empty text is accepted.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// True when the newest message is a user message still waiting for a reply,
    /// which only happens after a failed model call.
    pub fn has_unanswered_user_message(&self) -> bool {
        self.last().is_some_and(|m| m.role() == Role::User)
    }
}
