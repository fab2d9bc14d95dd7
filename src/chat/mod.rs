//! Chat application module for the cost-engineering assistant.
//!
//! This module provides a REPL chat session built on top of the completion client.  It
//! supports:
//!
//! - A one-time greeting followed by strictly alternating user/assistant turns
//! - A fixed system instruction sent with every request but never shown
//! - Completion failures rendered as assistant replies instead of errors
//! - Slash commands for session control
//!
//! # Architecture
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Conversation state and the completion call
//! - [`commands`]: Slash command parsing
//! - [`prompts`]: The fixed instruction and greeting texts
//! - `interrupt`: Ctrl+C handling for in-flight turns and replays

mod commands;
mod config;
mod interrupt;
pub mod prompts;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer, Typewriter};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{
    ChatArgs, ChatConfig, DEFAULT_TEMPERATURE, DEFAULT_TYPING_DELAY, MAX_TEMPERATURE,
    MIN_TEMPERATURE,
};
pub use interrupt::Interrupt;
pub use session::{ChatSession, SessionState, SessionStats};
