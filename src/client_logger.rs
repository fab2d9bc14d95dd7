//! Logging hook for completion client operations.
//!
//! This module provides the [`CompletionLogger`] trait that captures every request passing
//! through the [`OpenAi`](crate::OpenAi) client, and [`StderrLogger`], the one-line debug log
//! the chat binary enables with `--verbose`.

use std::io::{self, Write};
use std::time::Duration;

use crate::error::Error;
use crate::types::ChatCompletionRequest;

/// A trait for logging completion client operations.
///
/// Implement this trait to capture and record every API interaction.  Each request produces
/// one `log_request` call followed by exactly one of `log_response` or `log_error`.
///
/// # Example
///
/// ```rust,ignore
/// use costbench::{ChatCompletionRequest, CompletionLogger, Error};
/// use std::sync::Mutex;
/// use std::time::Duration;
///
/// struct Collecting {
///     lines: Mutex<Vec<String>>,
/// }
///
/// impl CompletionLogger for Collecting {
///     fn log_request(&self, request: &ChatCompletionRequest) {
///         self.lines.lock().unwrap().push(format!("{} messages", request.messages.len()));
///     }
///
///     fn log_response(&self, text: &str, elapsed: Duration) {
///         self.lines.lock().unwrap().push(format!("{} chars in {elapsed:?}", text.len()));
///     }
///
///     fn log_error(&self, error: &Error, elapsed: Duration) {
///         self.lines.lock().unwrap().push(format!("{error} after {elapsed:?}"));
///     }
/// }
/// ```
pub trait CompletionLogger: Send + Sync {
    /// Log an outgoing request before it is sent.
    fn log_request(&self, request: &ChatCompletionRequest);

    /// Log the completion text of a successful request.
    fn log_response(&self, text: &str, elapsed: Duration);

    /// Log a failed request.
    fn log_error(&self, error: &Error, elapsed: Duration);
}

/// Writes one line per event to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogger;

impl StderrLogger {
    /// Creates a new stderr logger.
    pub fn new() -> Self {
        Self
    }
}

impl CompletionLogger for StderrLogger {
    fn log_request(&self, request: &ChatCompletionRequest) {
        let _ = writeln!(io::stderr(), "{}", describe_request(request));
    }

    fn log_response(&self, text: &str, elapsed: Duration) {
        let _ = writeln!(
            io::stderr(),
            "[completion] ok chars={} elapsed={:.3}s",
            text.chars().count(),
            elapsed.as_secs_f64()
        );
    }

    fn log_error(&self, error: &Error, elapsed: Duration) {
        let _ = writeln!(
            io::stderr(),
            "[completion] error elapsed={:.3}s: {error}",
            elapsed.as_secs_f64()
        );
    }
}

fn describe_request(request: &ChatCompletionRequest) -> String {
    let temperature = request
        .temperature
        .map(|t| format!("{t:.2}"))
        .unwrap_or_else(|| "default".to_string());
    format!(
        "[completion] request model={} messages={} temperature={}",
        request.model,
        request.messages.len(),
        temperature
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatMessage, KnownModel, Model};

    #[test]
    fn request_description() {
        let request = ChatCompletionRequest::new(
            Model::Known(KnownModel::Gpt51),
            vec![ChatMessage::system("s"), ChatMessage::user("u")],
        )
        .with_temperature(Some(1.0));
        assert_eq!(
            describe_request(&request),
            "[completion] request model=gpt-5.1 messages=2 temperature=1.00"
        );
    }

    #[test]
    fn request_description_default_temperature() {
        let request = ChatCompletionRequest::new(Model::Custom("local".to_string()), vec![]);
        assert_eq!(
            describe_request(&request),
            "[completion] request model=local messages=0 temperature=default"
        );
    }
}
