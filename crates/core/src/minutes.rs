use crate::{error::MinutesError, model::ModelCapability, prompts::Prompts};
use std::sync::Arc;

/// Turns a finished interview transcript into a Meeting Minutes document.
///
/// Each call is a single, independent model request with no conversational
/// memory. The model's text is returned untouched and failures are not retried.
pub struct MinutesGenerator<M: ?Sized> {
    model: Arc<M>,
    prompts: Arc<Prompts>,
}

impl<M: ModelCapability + ?Sized> MinutesGenerator<M> {
    pub fn new(model: Arc<M>, prompts: Arc<Prompts>) -> Self {
        Self { model, prompts }
    }

    pub async fn generate(&self, transcript: &str) -> Result<String, MinutesError> {
        let request = self.prompts.minutes_request(transcript);
        tracing::info!(transcript_bytes = transcript.len(), "generating meeting minutes");

        let minutes = self
            .model
            .invoke(&self.prompts.minutes, &[], &request)
            .await
            .inspect_err(|e| tracing::warn!("minutes model call failed: {e}"))?;

        tracing::debug!(minutes_bytes = minutes.len(), "meeting minutes generated");
        Ok(minutes)
    }
}
