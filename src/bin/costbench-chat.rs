//! Interactive cost-engineering chat.
//!
//! This binary greets the user, then forwards each message, behind the fixed cost-engineering
//! instruction, to an OpenAI-compatible chat-completions API and types the reply out.
//!
//! # Usage
//!
//! ```bash
//! # OPENAI_API_KEY may also live in a .env file in the working directory
//! export OPENAI_API_KEY=sk-...
//! costbench-chat
//!
//! # Use a different model or a local OpenAI-compatible server
//! costbench-chat --model gpt-4o --base-url http://localhost:11434/v1
//!
//! # Print replies at once, without colors
//! costbench-chat --no-typing --no-color
//! ```
//!
//! # Commands
//!
//! - `/help` - Show available commands
//! - `/restart` - Start a fresh conversation
//! - `/history` - Show the conversation again
//! - `/typing on|off` - Toggle the typing animation
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application
//!
//! Ctrl+C while a request is in flight cancels it, and during a typed reply it prints the rest
//! at once.  A second Ctrl+C exits.

use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use costbench::chat::prompts::{FOOTER, WINDOW_TITLE};
use costbench::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, Interrupt, PlainTextRenderer, Renderer,
    Typewriter, help_text, parse_command,
};
use costbench::{CompletionService, Model, OpenAi, Role, StderrLogger};

/// Main entry point for the costbench-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; the key may come from the real environment.
    let _ = dotenvy::dotenv();

    let (args, _) = ChatArgs::from_command_line_relaxed("costbench-chat [OPTIONS]");
    let config = ChatConfig::try_from(args)?;

    let mut client = match &config.base_url {
        Some(base_url) => OpenAi::with_options(None, Some(base_url.clone()), None)?,
        None => OpenAi::new(None)?,
    };
    if config.verbose {
        client = client.with_logger(Arc::new(StderrLogger::new()));
    }

    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut typewriter = Typewriter::new(config.typing_delay);
    typewriter.set_enabled(config.typing_enabled);
    let mut session = ChatSession::new(client, config);
    let mut rl = DefaultEditor::new()?;

    // The first signal cancels the request in flight or skips the rest of the typing
    // animation; a second one, or any signal while idle, exits.
    let interrupt = Arc::new(Interrupt::new());
    let interrupt_clone = interrupt.clone();
    ctrlc::set_handler(move || {
        if !interrupt_clone.trigger() {
            std::process::exit(130);
        }
    })?;

    renderer.print_banner(WINDOW_TITLE, FOOTER);
    renderer.print_info(&format!(
        "Model: {}. Type /help for commands, /quit to exit.",
        session.model()
    ));
    greet(&mut session, &mut renderer, &typewriter, &interrupt).await;

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line.as_str());

                if let Some(cmd) = parse_command(&line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Restart => {
                            session.restart();
                            renderer.print_info("Started a new conversation.");
                            greet(&mut session, &mut renderer, &typewriter, &interrupt).await;
                        }
                        ChatCommand::History => {
                            for message in session.transcript() {
                                renderer.print_message(message);
                            }
                        }
                        ChatCommand::Model(model_name) => {
                            let Ok(model) = model_name.parse::<Model>();
                            session.set_model(model);
                            renderer.print_info(&format!("Model changed to: {}", model_name));
                        }
                        ChatCommand::Temperature(value) => {
                            session.set_temperature(Some(value));
                            renderer.print_info(&format!("temperature set to {:.2}", value));
                        }
                        ChatCommand::ClearTemperature => {
                            session.set_temperature(None);
                            renderer.print_info("temperature reset to model default");
                        }
                        ChatCommand::Typing(on) => {
                            typewriter.set_enabled(on);
                            if on {
                                renderer.print_info("Typing animation enabled.");
                            } else {
                                renderer.print_info("Typing animation disabled.");
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                interrupt.arm();
                match session.submit_until(&line, interrupt.wait()).await {
                    Ok(Some(reply)) => {
                        interrupt.arm();
                        renderer.start_message(Role::Assistant);
                        typewriter
                            .replay(&reply, &mut renderer, Some(interrupt.flag()))
                            .await;
                        renderer.finish_message();
                    }
                    Ok(None) => renderer.print_info("[request cancelled]"),
                    Err(err) => renderer.print_error(&err.to_string()),
                }
                interrupt.disarm();
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

async fn greet<S: CompletionService>(
    session: &mut ChatSession<S>,
    renderer: &mut PlainTextRenderer,
    typewriter: &Typewriter,
    interrupt: &Interrupt,
) {
    let Some(greeting) = session.greet().map(str::to_string) else {
        return;
    };
    interrupt.arm();
    renderer.start_message(Role::Assistant);
    typewriter
        .replay(&greeting, renderer, Some(interrupt.flag()))
        .await;
    renderer.finish_message();
    interrupt.disarm();
}

fn print_stats<S: CompletionService>(session: &ChatSession<S>) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Model: {}", stats.model);
    println!(
        "      Temperature: {}",
        stats
            .temperature
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "default".to_string())
    );
    println!("      State: {:?}", stats.state);
    println!("      Messages: {}", stats.message_count);
    println!("      Turns: {}", stats.turns);
    println!("      Failed turns: {}", stats.failed_turns);
}
