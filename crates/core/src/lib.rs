pub mod completion;
pub mod error;
pub mod message;
pub mod minutes;
pub mod model;
pub mod prompts;
pub mod session;
pub mod transcript;
pub mod turn_store;

pub use completion::CompletionState;
pub use error::MinutesError;
pub use message::{Message, Role};
pub use minutes::MinutesGenerator;
pub use model::{ChatCompletionsClient, ModelCapability, ModelError, ModelSettings};
pub use prompts::Prompts;
pub use session::{InterviewSession, TurnReply};
pub use transcript::format_transcript;
pub use turn_store::TurnStore;
