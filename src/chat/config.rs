//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved configuration that
//! drives a chat session and its display.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::error::{Error, Result};
use crate::types::Model;

/// Temperature the cost assistant was tuned with.
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

/// Lowest accepted sampling temperature.
pub const MIN_TEMPERATURE: f32 = 0.0;

/// Highest accepted sampling temperature.
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Delay between characters of the typewriter replay.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(5);

/// Command-line arguments for the costbench-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gpt-5.1)", "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature.
    #[arrrg(optional, "Sampling temperature 0.0-2.0 (default: 1.0)", "TEMP")]
    pub temperature: Option<String>,

    /// Base URL of the chat-completions API.
    #[arrrg(optional, "API base URL (default: $OPENAI_BASE_URL or OpenAI)", "URL")]
    pub base_url: Option<String>,

    /// Milliseconds per character of the typing animation.
    #[arrrg(optional, "Typing animation delay per character in ms (default: 5)", "MS")]
    pub typing_delay_ms: Option<u64>,

    /// Print replies at once instead of animating them.
    #[arrrg(flag, "Disable the typing animation")]
    pub no_typing: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log every completion request to stderr.
    #[arrrg(flag, "Log completion requests to stderr")]
    pub verbose: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing command-line
/// arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// Optional sampling temperature; `None` defers to the provider.
    pub temperature: Option<f32>,

    /// Base URL override for the completion API.
    pub base_url: Option<String>,

    /// Delay between characters when replaying a reply.
    pub typing_delay: Duration,

    /// Whether replies are replayed with the typing animation.
    pub typing_enabled: bool,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether completion requests are logged to stderr.
    pub verbose: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gpt-5.1
    /// - Temperature: 1.0
    /// - Typing: enabled, 5ms per character
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            temperature: Some(DEFAULT_TEMPERATURE),
            base_url: None,
            typing_delay: DEFAULT_TYPING_DELAY,
            typing_enabled: true,
            use_color: true,
            verbose: false,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the per-character typing delay.
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    /// Disables the typing animation.
    pub fn without_typing(mut self) -> Self {
        self.typing_enabled = false;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Enables request logging.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a sampling temperature, accepting only finite values in `0.0..=2.0`.
pub(crate) fn parse_temperature(value: &str) -> std::result::Result<f32, String> {
    let out_of_range = || {
        format!("expects a value between {MIN_TEMPERATURE} and {MAX_TEMPERATURE}")
    };
    let parsed: f32 = value.trim().parse().map_err(|_| out_of_range())?;
    if parsed.is_finite() && (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(out_of_range())
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = Error;

    fn try_from(args: ChatArgs) -> Result<Self> {
        let model = args
            .model
            .map(|s| {
                let Ok(model) = s.parse::<Model>();
                model
            })
            .unwrap_or_default();
        let temperature = match args.temperature.as_deref() {
            Some(value) => parse_temperature(value).map_err(|err| {
                Error::validation(
                    format!("--temperature {err}, got {value:?}"),
                    Some("temperature".to_string()),
                )
            })?,
            None => DEFAULT_TEMPERATURE,
        };
        let typing_delay = args
            .typing_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TYPING_DELAY);

        Ok(ChatConfig {
            model,
            temperature: Some(temperature),
            base_url: args.base_url,
            typing_delay,
            typing_enabled: !args.no_typing,
            use_color: !args.no_color,
            verbose: args.verbose,
        })
    }
}
