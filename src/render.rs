//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction plus the [`Typewriter`], which
//! replays an already complete reply one character at a time.  The replay is purely cosmetic;
//! the session always holds the full text before anything is drawn.

use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::chat::DEFAULT_TYPING_DELAY;
use crate::types::{ChatMessage, Role};

/// ANSI escape code for bold text (used for the banner).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for info lines and the footer).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the assistant label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the user label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - Capturing output in tests
pub trait Renderer: Send {
    /// Print the title banner and credit line.
    fn print_banner(&mut self, title: &str, footer: &str);

    /// Begin a transcript entry for `role`.
    fn start_message(&mut self, role: Role);

    /// Print a chunk of message text.
    ///
    /// This is called once per character while the typewriter replays a reply.
    fn print_text(&mut self, text: &str);

    /// Finish the current transcript entry.
    fn finish_message(&mut self);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print a complete transcript entry at once.
    fn print_message(&mut self, message: &ChatMessage) {
        self.start_message(message.role());
        self.print_text(message.content());
        self.finish_message();
    }
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    line_start: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            line_start: true,
        }
    }

    /// Flushes stdout to ensure immediate display of replayed content.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn styled(&self, style: &str, text: &str) -> String {
        if self.use_color {
            format!("{style}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    fn write(&mut self, text: &str) {
        let _ = self.stdout.write_all(text.as_bytes());
        if let Some(last) = text.chars().last() {
            self.line_start = last == '\n';
        }
        self.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_banner(&mut self, title: &str, footer: &str) {
        let title = self.styled(ANSI_BOLD, title);
        let footer = self.styled(ANSI_DIM, footer);
        self.write(&format!("{title}\n{footer}\n\n"));
    }

    fn start_message(&mut self, role: Role) {
        if !self.line_start {
            self.write("\n");
        }
        let label = match role {
            Role::User => self.styled(ANSI_GREEN, "You:"),
            Role::Assistant => self.styled(ANSI_CYAN, "Assistant:"),
            Role::System => self.styled(ANSI_DIM, "System:"),
        };
        self.write(&format!("{label}\n"));
    }

    fn print_text(&mut self, text: &str) {
        self.write(text);
    }

    fn finish_message(&mut self) {
        if self.line_start {
            self.write("\n");
        } else {
            self.write("\n\n");
        }
    }

    fn print_error(&mut self, error: &str) {
        if !self.line_start {
            self.write("\n");
        }
        let line = self.styled(ANSI_RED, &format!("Error: {error}"));
        let _ = writeln!(io::stderr(), "{line}");
    }

    fn print_info(&mut self, info: &str) {
        if !self.line_start {
            self.write("\n");
        }
        let line = self.styled(ANSI_DIM, info);
        self.write(&format!("{line}\n"));
    }
}

/// Replays finished text character by character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typewriter {
    delay: Duration,
    enabled: bool,
}

impl Typewriter {
    /// Creates a typewriter with the given per-character delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            enabled: true,
        }
    }

    /// Creates a typewriter that prints everything at once.
    pub fn instant() -> Self {
        Self {
            delay: Duration::ZERO,
            enabled: false,
        }
    }

    /// Turns the animation on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the animation is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The per-character delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Writes `text` to the renderer, pausing between characters.
    ///
    /// When `interrupt` becomes set the remainder is written at once.  Returns true if the
    /// replay was cut short.
    pub async fn replay(
        &self,
        text: &str,
        renderer: &mut dyn Renderer,
        interrupt: Option<&AtomicBool>,
    ) -> bool {
        if !self.enabled || self.delay.is_zero() {
            renderer.print_text(text);
            return false;
        }
        let mut buf = [0u8; 4];
        for (idx, ch) in text.char_indices() {
            if interrupt.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                renderer.print_text(&text[idx..]);
                return true;
            }
            renderer.print_text(ch.encode_utf8(&mut buf));
            tokio::time::sleep(self.delay).await;
        }
        false
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_DELAY)
    }
}
