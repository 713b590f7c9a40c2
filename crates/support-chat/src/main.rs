//! Chat with the Resezy support assistant in the terminal.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use support_chat::core::conversation::Role;
use support_chat::core::{SessionEvent, SessionStage};
use support_chat::{ChatConfig, DEFAULT_EXPORT_FILE, export_transcript};
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

const BAR_CHAR: &str = "▎";

const HELP: &str = "\
Commands:
  /clear            start a new conversation
  /export [PATH]    save the conversation as JSON
  /help             show this message
  /quit             leave the chat";

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Message(&'a str),
    Clear,
    Export(&'a str),
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Empty;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Input::Message(line);
        };

        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(name, arg)| (name, arg.trim()))
            .unwrap_or((command, ""));
        match name {
            "clear" => Input::Clear,
            "export" if arg.is_empty() => Input::Export(DEFAULT_EXPORT_FILE),
            "export" => Input::Export(arg),
            "help" => Input::Help,
            "quit" | "exit" => Input::Quit,
            _ => Input::Unknown(name),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match ChatConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    debug!("config: {config:?}");

    let session = support_chat::session_builder(&config).build();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let subscribed = session.subscribe(move |event| {
        event_tx.send(event.clone()).ok();
    });
    if subscribed.is_err() {
        return;
    }

    if config.is_offline() {
        println!(
            "{}",
            "No GEMINI_API_KEY set, answering from the built-in knowledge."
                .dimmed()
        );
    }
    print_assistant(
        "Hello! I'm Resezy AI Assistant. How can I help you today?\n\
         Type /help to see the available commands.",
    );

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .map(|style| style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line().await else {
            break;
        };
        match Input::parse(&line) {
            Input::Empty => {}
            Input::Message(text) => {
                if session.submit(text).is_err() {
                    break;
                }
                if !wait_reply(&mut event_rx, &progress_style).await {
                    break;
                }
            }
            Input::Clear => {
                if session.clear().is_err() {
                    break;
                }
                println!("{}", "Conversation cleared.".dimmed());
            }
            Input::Export(path) => match export_transcript(&session, path).await
            {
                Ok(()) => {
                    println!("{}", format!("Saved to {path}").dimmed());
                }
                Err(err) => {
                    eprintln!("{}", format!("Failed to export: {err}").red());
                }
            },
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
            Input::Unknown(name) => {
                eprintln!("Unknown command /{name}, try /help");
            }
        }
    }

    session.close();
}

/// Shows a spinner until the session is idle again. Returns `false` if the
/// session has gone away.
async fn wait_reply(
    event_rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
    progress_style: &ProgressStyle,
) -> bool {
    let mut progress_bar = None;

    loop {
        // Create a new progress bar if it has been finished.
        progress_bar
            .get_or_insert_with(|| {
                let progress_bar = ProgressBar::new_spinner();
                progress_bar.set_style(progress_style.clone());
                progress_bar.set_message("💬 Typing...");
                progress_bar
            })
            .inc(1);

        let sleep = sleep(Duration::from_millis(100));
        let event = select! {
            event = event_rx.recv() => {
                let Some(event) = event else {
                    return false;
                };
                event
            },
            _ = sleep => {
                continue;
            }
        };

        match event {
            SessionEvent::Message(message)
                if message.role == Role::Assistant =>
            {
                // Finish the progress bar before printing anything else.
                if let Some(progress_bar) = progress_bar.take() {
                    progress_bar.finish_and_clear();
                }
                print_assistant(&message.content);
            }
            SessionEvent::StageChanged(SessionStage::Idle) => {
                if let Some(progress_bar) = progress_bar.take() {
                    progress_bar.finish_and_clear();
                }
                return true;
            }
            _ => {}
        }
    }
}

fn print_assistant(text: &str) {
    let bar = BAR_CHAR.bright_cyan();
    let mut lines = text.lines();
    if let Some(first) = lines.next() {
        println!("{bar}🤖 {}", first.bright_white());
    }
    for line in lines {
        println!("{bar}   {}", line.bright_white());
    }
    println!();
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(Input::parse("   \n"), Input::Empty);
        assert_eq!(Input::parse(" hello \n"), Input::Message("hello"));
        assert_eq!(Input::parse("/clear"), Input::Clear);
        assert_eq!(
            Input::parse("/export"),
            Input::Export(DEFAULT_EXPORT_FILE)
        );
        assert_eq!(
            Input::parse("/export  out/chat.json "),
            Input::Export("out/chat.json")
        );
        assert_eq!(Input::parse("/quit"), Input::Quit);
        assert_eq!(Input::parse("/bogus arg"), Input::Unknown("bogus"));
    }
}
