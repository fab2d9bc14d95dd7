//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns one conversation: the visible
//! transcript, the state machine that gates the greeting, and the single blocking completion
//! call made per user turn.

use std::time::Instant;

use crate::chat::config::ChatConfig;
use crate::chat::prompts::{GREETING, SYSTEM_INSTRUCTION};
use crate::client::CompletionService;
use crate::error::{Error, Result};
use crate::observability::{
    SESSION_CANCELLED_TURNS, SESSION_FAILED_TURNS, SESSION_GREETINGS, SESSION_REJECTED_INPUTS, SESSION_TURN_DURATION,
    SESSION_TURNS,
};
use crate::types::{ChatCompletionRequest, ChatMessage, Model, Role};

/// Lifecycle of a session.
///
/// `Uninitialized --greet--> AwaitingInput --submit--> Processing --reply--> AwaitingInput`.
/// There is no terminal state; a session ends when its owner drops it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing has been shown yet; the greeting is still pending.
    Uninitialized,
    /// The greeting is out and the session is waiting for user text.
    AwaitingInput,
    /// A completion request is in flight.
    Processing,
}

/// A chat session that owns conversation state and completion calls.
///
/// The transcript holds only user and assistant turns.  The system instruction is prepended
/// to each outbound request and is never stored.
pub struct ChatSession<S: CompletionService> {
    service: S,
    config: ChatConfig,
    transcript: Vec<ChatMessage>,
    state: SessionState,
    turns: u64,
    failed_turns: u64,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    /// The model used for the session.
    pub model: Model,
    /// The sampling temperature, if set.
    pub temperature: Option<f32>,
    /// The current lifecycle state.
    pub state: SessionState,
    /// The number of messages in the visible transcript, greeting included.
    pub message_count: usize,
    /// Completed user turns.
    pub turns: u64,
    /// Turns whose completion call failed and were answered with error text.
    pub failed_turns: u64,
}

impl<S: CompletionService> ChatSession<S> {
    /// Creates a new, uninitialized chat session.
    pub fn new(service: S, config: ChatConfig) -> Self {
        Self {
            service,
            config,
            transcript: Vec::new(),
            state: SessionState::Uninitialized,
            turns: 0,
            failed_turns: 0,
        }
    }

    /// Emits the greeting if the session has not been initialized yet.
    ///
    /// Returns the greeting exactly once per session; every later call returns `None`.
    pub fn greet(&mut self) -> Option<&str> {
        if self.state != SessionState::Uninitialized {
            return None;
        }
        SESSION_GREETINGS.click();
        self.transcript.push(ChatMessage::assistant(GREETING));
        self.state = SessionState::AwaitingInput;
        self.transcript.last().map(ChatMessage::content)
    }

    /// Sends user text to the model and records the reply.
    ///
    /// This method:
    /// 1. Emits the greeting first if the session is still uninitialized
    /// 2. Adds the user message to the transcript
    /// 3. Sends `[system instruction] + transcript` to the completion service
    /// 4. Adds the reply, or an `Error: ...` text if the call failed, to the transcript
    ///
    /// # Errors
    ///
    /// Returns a validation error, without touching the session, if `user_text` is empty or
    /// whitespace.  Completion failures are never returned; they become the reply.
    pub async fn submit(&mut self, user_text: &str) -> Result<String> {
        if user_text.trim().is_empty() {
            SESSION_REJECTED_INPUTS.click();
            return Err(Error::validation(
                "message must contain non-whitespace text",
                Some("user_text".to_string()),
            ));
        }

        self.recover_abandoned_turn();
        self.greet();

        self.transcript.push(ChatMessage::user(user_text));
        self.state = SessionState::Processing;

        let request = self.request();
        let start = Instant::now();
        let reply = match self.service.complete(&request).await {
            Ok(text) => text,
            Err(err) => {
                self.failed_turns += 1;
                SESSION_FAILED_TURNS.click();
                format!("Error: {err}")
            }
        };
        SESSION_TURN_DURATION.add(start.elapsed().as_secs_f64());
        SESSION_TURNS.click();

        self.transcript.push(ChatMessage::assistant(reply.clone()));
        self.turns += 1;
        self.state = SessionState::AwaitingInput;
        Ok(reply)
    }

    /// Runs [`submit`](Self::submit) until it finishes or `cancel` completes, whichever is first.
    ///
    /// Returns `Ok(None)` when cancelled.  The half-finished turn is rolled back, so the
    /// transcript is exactly as it was before the call.
    pub async fn submit_until<F>(&mut self, user_text: &str, cancel: F) -> Result<Option<String>>
    where
        F: Future<Output = ()>,
    {
        let outcome = tokio::select! {
            reply = self.submit(user_text) => Some(reply),
            _ = cancel => None,
        };
        match outcome {
            Some(reply) => reply.map(Some),
            None => {
                self.recover_abandoned_turn();
                SESSION_CANCELLED_TURNS.click();
                Ok(None)
            }
        }
    }

    /// Returns the message list that would be sent to the model right now.
    pub fn request_payload(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.transcript.len() + 1);
        messages.push(ChatMessage::system(SYSTEM_INSTRUCTION));
        messages.extend(self.transcript.iter().cloned());
        messages
    }

    fn request(&self) -> ChatCompletionRequest {
        ChatCompletionRequest::new(self.config.model.clone(), self.request_payload())
            .with_temperature(self.config.temperature)
    }

    // A submit future dropped mid-call leaves a dangling user entry; drop it so turns stay
    // strictly alternating.
    fn recover_abandoned_turn(&mut self) {
        if self.state != SessionState::Processing {
            return;
        }
        if self.transcript.last().map(ChatMessage::role) == Some(Role::User) {
            self.transcript.pop();
        }
        self.state = SessionState::AwaitingInput;
    }

    /// Discards the conversation and returns to the uninitialized state.
    ///
    /// The next `greet` or `submit` emits the greeting again.
    pub fn restart(&mut self) {
        self.transcript.clear();
        self.state = SessionState::Uninitialized;
        self.turns = 0;
        self.failed_turns = 0;
    }

    /// The visible transcript.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Returns the number of messages in the transcript.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the greeting has been emitted.
    pub fn is_initialized(&self) -> bool {
        self.state != SessionState::Uninitialized
    }

    /// Changes the model used for responses.
    pub fn set_model(&mut self, model: Model) {
        self.config.model = model;
    }

    /// Returns the current model.
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Sets the sampling temperature.
    pub fn set_temperature(&mut self, temperature: Option<f32>) {
        self.config.temperature = temperature;
    }

    /// Returns the current sampling temperature.
    pub fn temperature(&self) -> Option<f32> {
        self.config.temperature
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            state: self.state,
            message_count: self.message_count(),
            turns: self.turns,
            failed_turns: self.failed_turns,
        }
    }
}
