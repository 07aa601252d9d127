//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::{HELP, ReplCommand};
use crate::ConsoleChatView;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;
use streamchat_application::ThreadCoordinator;
use streamchat_domain::{Thread, ThreadId};
use tracing::debug;

/// Interactive chat REPL over a [`ThreadCoordinator`].
pub struct ChatRepl {
    coordinator: ThreadCoordinator,
    view: Arc<ConsoleChatView>,
    history_file: Option<PathBuf>,
    show_banner: bool,
}

impl ChatRepl {
    pub fn new(coordinator: ThreadCoordinator, view: Arc<ConsoleChatView>) -> Self {
        Self {
            coordinator,
            view,
            history_file: dirs::data_dir().map(|p| p.join("streamchat").join("history.txt")),
            show_banner: true,
        }
    }

    /// Override the line history location.
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_file = path;
        }
        self
    }

    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Run the interactive REPL until `/quit` or end of input.
    pub async fn run(mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if self.show_banner {
            self.print_welcome();
        }

        loop {
            let prompt = format!("[{}] > ", self.coordinator.title());
            let readline = tokio::task::block_in_place(|| rl.readline(&prompt));

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    if !self.handle(ReplCommand::parse(line)).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C stops a streaming reply, otherwise it only clears the line
                    if self.coordinator.close_session() {
                        self.view.notice("(stopped)");
                    } else {
                        println!("^C");
                    }
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        self.coordinator.close_session();
        if let Some(ref path) = self.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                 streamchat                  │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Type a message to chat, /help for commands.");
        println!();
    }

    /// Execute one command. Returns false when the REPL should exit.
    async fn handle(&mut self, command: ReplCommand) -> bool {
        if let Some(reason) = refusal(&command, self.coordinator.input_lock().is_locked()) {
            self.view.notice(reason);
            return true;
        }

        match command {
            ReplCommand::Send(text) => match self.coordinator.send_message(&text).await {
                Ok(thread_id) => debug!("Sent on {}", thread_id),
                Err(e) => self.view.error(&e.to_string()),
            },
            ReplCommand::Threads => {
                self.coordinator.refresh_threads().await;
                self.view.print_threads();
            }
            ReplCommand::Select(target) => {
                let thread_id = resolve_target(&self.coordinator.threads(), &target);
                if let Err(e) = self.coordinator.select_thread(thread_id, None).await {
                    self.view.error(&e.to_string());
                }
            }
            ReplCommand::New => self.coordinator.start_new_draft(),
            ReplCommand::Rename(name) => match self.coordinator.active_thread().cloned() {
                Some(thread_id) => self.coordinator.rename_thread(&thread_id, &name).await,
                None => self.view.notice("Nothing to rename: this chat is not saved yet."),
            },
            ReplCommand::Delete(target) => {
                let thread_id = match target {
                    Some(target) => Some(resolve_target(&self.coordinator.threads(), &target)),
                    None => self.coordinator.active_thread().cloned(),
                };
                match thread_id {
                    Some(thread_id) => self.coordinator.delete_thread(&thread_id).await,
                    None => self.view.notice("Nothing to delete."),
                }
            }
            ReplCommand::Stop => {
                if !self.coordinator.close_session() {
                    self.view.notice("No reply is streaming.");
                }
            }
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Quit => {
                println!("Bye!");
                return false;
            }
            ReplCommand::Usage(usage) => self.view.notice(&format!("Usage: {}", usage)),
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        true
    }
}

/// Why `command` cannot run now, if it cannot.
///
/// The input lock gates message sending only. Every slash command stays
/// available while a reply streams, so `/select`, `/new` and `/stop` can
/// supersede or close the open session.
fn refusal(command: &ReplCommand, locked: bool) -> Option<&'static str> {
    match command {
        ReplCommand::Send(_) if locked => {
            Some("A reply is still streaming; wait for it or /stop it before sending.")
        }
        _ => None,
    }
}

/// `n` (1-based list position) or a literal thread id.
fn resolve_target(threads: &[Thread], target: &str) -> ThreadId {
    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| threads.get(i))
        .map(|t| t.id.clone())
        .unwrap_or_else(|| ThreadId::new(target))
}
