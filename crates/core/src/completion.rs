//! Interview completion detection.
//!
//! The model is never asked for a structured "done" signal. Instead every
//! assistant reply is lowercased and checked for two fixed phrases that the
//! interview prompt tends to produce once all fields are gathered. This is a
//! heuristic over free text: a reply can contain both phrases early (premature
//! completion) or the model may never phrase its wrap-up that way (completion is
//! never detected). Both outcomes are known behaviour.

/// Both phrases must appear in the same reply.
pub const COMPLETION_MARKERS: [&str; 2] = ["additional information", "would like to add"];

/// Returns true when `reply` contains every completion marker, ignoring case.
pub fn signals_completion(reply: &str) -> bool {
    let normalized = reply.to_lowercase();
    COMPLETION_MARKERS
        .iter()
        .all(|marker| normalized.contains(marker))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionState {
    #[default]
    InProgress,
    /// Terminal; there is no transition back.
    Completed,
}

impl CompletionState {
    pub fn is_completed(&self) -> bool {
        matches!(self, CompletionState::Completed)
    }

    /// Feeds an assistant reply through the state machine. Returns true only on
    /// the call that moves the state from `InProgress` to `Completed`.
    pub fn observe(&mut self, reply: &str) -> bool {
        if self.is_completed() || !signals_completion(reply) {
            return false;
        }
        *self = CompletionState::Completed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_both_markers() {
        assert!(!signals_completion(
            "Is there any additional information about the budget?"
        ));
        assert!(!signals_completion("Anything else you would like to add?"));
        assert!(signals_completion(
            "All questions are done. Is there any additional information you would like to add?"
        ));
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        assert!(signals_completion(
            "ADDITIONAL INFORMATION you Would Like To Add?"
        ));
    }

    #[test]
    fn test_completed_is_absorbing() {
        let mut state = CompletionState::default();
        assert_eq!(state, CompletionState::InProgress);

        assert!(!state.observe("Who attended the meeting?"));
        assert!(state.observe("Any additional information you would like to add?"));
        assert!(state.is_completed());

        // Further replies never fire the transition again nor undo it.
        assert!(!state.observe("Any additional information you would like to add?"));
        assert!(!state.observe("What is the company name?"));
        assert_eq!(state, CompletionState::Completed);
    }
}
