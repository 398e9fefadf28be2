use crate::{
    completion::CompletionState,
    error::MinutesError,
    message::Message,
    model::ModelCapability,
    prompts::Prompts,
    transcript::format_transcript,
    turn_store::TurnStore,
};
use std::sync::Arc;

/// What one successful turn hands back to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub reply: String,
    /// Completion flag after this reply was evaluated.
    pub completed: bool,
}

/// One interview: its history, its completion flag and the model it talks to.
///
/// Calls take `&mut self`, so a single session is driven by one caller at a
/// time. Independent sessions share nothing but the (stateless) model handle.
pub struct InterviewSession<M: ?Sized> {
    model: Arc<M>,
    prompts: Arc<Prompts>,
    turns: TurnStore,
    completion: CompletionState,
}

impl<M: ModelCapability + ?Sized> InterviewSession<M> {
    pub fn new(model: Arc<M>, prompts: Arc<Prompts>) -> Self {
        Self {
            model,
            prompts,
            turns: TurnStore::new(),
            completion: CompletionState::default(),
        }
    }

    /// Records the user's text, asks the model for the next interview step and
    /// records its reply.
    ///
    /// Blank input is rejected before anything is stored or sent. If the model
    /// call fails the user message stays in the history without a reply, which
    /// [`InterviewSession::retry_pending`] can later answer.
    pub async fn submit_turn(&mut self, user_text: &str) -> Result<TurnReply, MinutesError> {
        if user_text.trim().is_empty() {
            return Err(MinutesError::EmptyInput);
        }

        self.turns.append(Message::user(user_text));
        tracing::info!(messages = self.turns.len(), "interview turn submitted");
        self.answer_pending().await
    }

    /// Re-asks the model about the last user message when a previous attempt failed.
    pub async fn retry_pending(&mut self) -> Result<TurnReply, MinutesError> {
        if !self.turns.has_unanswered_user_message() {
            return Err(MinutesError::NothingToRetry);
        }
        tracing::info!(messages = self.turns.len(), "retrying unanswered turn");
        self.answer_pending().await
    }

    async fn answer_pending(&mut self) -> Result<TurnReply, MinutesError> {
        let Some((pending, history)) = self.turns.all().split_last() else {
            return Err(MinutesError::NothingToRetry);
        };

        let reply = self
            .model
            .invoke(&self.prompts.interview, history, pending.content())
            .await
            .inspect_err(|e| tracing::warn!("interview model call failed: {e}"))?;

        self.turns.append(Message::assistant(reply.as_str()));
        if self.completion.observe(&reply) {
            tracing::info!("interview completion detected");
        }

        Ok(TurnReply {
            reply,
            completed: self.completion.is_completed(),
        })
    }

    pub fn turns(&self) -> &TurnStore {
        &self.turns
    }

    pub fn completion(&self) -> CompletionState {
        self.completion
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_completed()
    }

    /// Fresh `Q:`/`A:` rendering of the history; never stored back.
    pub fn transcript(&self) -> String {
        format_transcript(self.turns.all())
    }
}
