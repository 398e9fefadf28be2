//! Console session driver.
//!
//! Turns lines typed by the user into interview turns, retries and minutes
//! requests. Everything the user should see is reported as a [`Command`] on
//! an mpsc channel; the runtime decides how to render it.

use anyhow::{Context, Result};
use minutes_core::{InterviewSession, MinutesError, MinutesGenerator, ModelCapability, Prompts, TurnReply};
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const INTERVIEW_COMPLETE_NOTICE: &str =
    "Interview completed! Type 'generate mom' to create Meeting Minutes or continue the conversation.";
pub const INCOMPLETE_INTERVIEW_NOTICE: &str =
    "Please complete the interview before generating Meeting Minutes.";
pub const EMPTY_CONVERSATION_NOTICE: &str =
    "Please start a conversation first before generating minutes.";
pub const GENERATING_NOTICE: &str = "Generating Meeting Minutes...";
pub const NOTHING_TO_RETRY_NOTICE: &str = "There is no unanswered message to retry.";
pub const PENDING_MESSAGE_NOTICE: &str =
    "Your previous message has not been answered yet. Type 'retry' to send it again.";

/// Side effects requested by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The interviewer's reply to a turn.
    Reply(String),
    /// Sent once, when the interview first reaches completion.
    InterviewComplete,
    Notice(String),
    /// A generated Meeting Minutes document, unmodified.
    Minutes(String),
    Error(String),
    Goodbye,
}

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    GenerateMinutes,
    Retry,
    Blank,
    Message(String),
}

impl Input {
    /// Commands are matched on the trimmed, lowercased line. Anything else is
    /// an interview message with its casing left alone.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Input::Blank,
            "quit" => Input::Quit,
            "generate mom" => Input::GenerateMinutes,
            "retry" => Input::Retry,
            _ => Input::Message(trimmed.to_string()),
        }
    }
}

pub struct SessionDriver<M: ?Sized> {
    session: InterviewSession<M>,
    generator: MinutesGenerator<M>,
    allow_early_minutes: bool,
    command_tx: mpsc::Sender<Command>,
}

impl<M: ModelCapability + ?Sized> SessionDriver<M> {
    pub fn new(
        model: Arc<M>,
        prompts: Arc<Prompts>,
        allow_early_minutes: bool,
        command_tx: mpsc::Sender<Command>,
    ) -> Self {
        Self {
            session: InterviewSession::new(Arc::clone(&model), Arc::clone(&prompts)),
            generator: MinutesGenerator::new(model, prompts),
            allow_early_minutes,
            command_tx,
        }
    }

    pub fn session(&self) -> &InterviewSession<M> {
        &self.session
    }

    /// Handles one line of input. Returns `Break` once the user has quit.
    ///
    /// Model failures are reported as [`Command::Error`] and do not end the
    /// session. An error is only returned when the command channel is closed.
    pub async fn handle_line(&mut self, line: &str) -> Result<ControlFlow<()>> {
        match Input::parse(line) {
            Input::Blank => {}
            Input::Quit => {
                tracing::info!(messages = self.session.turns().len(), "user ended the session");
                self.send(Command::Goodbye).await?;
                return Ok(ControlFlow::Break(()));
            }
            Input::Message(_) if self.session.turns().has_unanswered_user_message() => {
                // A second user message in a row would shift every later Q/A pair.
                self.send(Command::Notice(PENDING_MESSAGE_NOTICE.to_string()))
                    .await?;
            }
            Input::Message(text) => {
                let was_completed = self.session.is_completed();
                let result = self.session.submit_turn(&text).await;
                self.report_turn(result, was_completed).await?;
            }
            Input::Retry => {
                let was_completed = self.session.is_completed();
                let result = self.session.retry_pending().await;
                self.report_turn(result, was_completed).await?;
            }
            Input::GenerateMinutes => self.generate_minutes().await?,
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn report_turn(
        &self,
        result: Result<TurnReply, MinutesError>,
        was_completed: bool,
    ) -> Result<()> {
        match result {
            Ok(turn) => {
                self.send(Command::Reply(turn.reply)).await?;
                if turn.completed && !was_completed {
                    self.send(Command::InterviewComplete).await?;
                }
            }
            Err(MinutesError::EmptyInput) => {}
            Err(MinutesError::NothingToRetry) => {
                self.send(Command::Notice(NOTHING_TO_RETRY_NOTICE.to_string()))
                    .await?;
            }
            Err(e) => {
                tracing::error!("interview turn failed: {e}");
                self.send(Command::Error(format!("Error generating response: {e}")))
                    .await?;
            }
        }
        Ok(())
    }

    fn minutes_gate(&self) -> Result<(), MinutesError> {
        if self.allow_early_minutes {
            if self.session.turns().is_empty() {
                return Err(MinutesError::PreconditionNotMet(
                    EMPTY_CONVERSATION_NOTICE.to_string(),
                ));
            }
        } else if !self.session.is_completed() {
            return Err(MinutesError::PreconditionNotMet(
                INCOMPLETE_INTERVIEW_NOTICE.to_string(),
            ));
        }
        Ok(())
    }

    async fn generate_minutes(&self) -> Result<()> {
        if let Err(e) = self.minutes_gate() {
            let notice = match e {
                MinutesError::PreconditionNotMet(reason) => reason,
                other => other.to_string(),
            };
            return self.send(Command::Notice(notice)).await;
        }

        self.send(Command::Notice(GENERATING_NOTICE.to_string()))
            .await?;
        let transcript = self.session.transcript();
        match self.generator.generate(&transcript).await {
            Ok(minutes) => self.send(Command::Minutes(minutes)).await,
            Err(e) => {
                tracing::error!("minutes generation failed: {e}");
                self.send(Command::Error(format!("Error generating MoM: {e}")))
                    .await
            }
        }
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .context("command channel closed")
    }
}
