//! Slash commands of the chat REPL.

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text: send as a message.
    Send(String),
    Threads,
    /// `/select <n|id>`
    Select(String),
    New,
    Rename(String),
    /// `/delete [n|id]`, the active thread when omitted.
    Delete(Option<String>),
    Stop,
    Help,
    Quit,
    /// Known command missing its argument.
    Usage(&'static str),
    Unknown(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty line.
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.strip_prefix('/') else {
            return Self::Send(line.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let arg = (!arg.is_empty()).then(|| arg.to_string());

        match (name, arg) {
            ("threads" | "t" | "ls", _) => Self::Threads,
            ("select" | "s" | "open", Some(target)) => Self::Select(target),
            ("select" | "s" | "open", None) => Self::Usage("/select <number|id>"),
            ("new" | "n", _) => Self::New,
            ("rename", Some(name)) => Self::Rename(name),
            ("rename", None) => Self::Usage("/rename <name>"),
            ("delete" | "rm", target) => Self::Delete(target),
            ("stop", _) => Self::Stop,
            ("help" | "h" | "?", _) => Self::Help,
            ("quit" | "exit" | "q", _) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

pub const HELP: &str = "\
Commands:
  /threads, /t          - List threads (most recent first)
  /select <n|id>, /s    - Open a thread by list number or id
  /new, /n              - Start a new chat
  /rename <name>        - Rename the open thread
  /delete [n|id], /rm   - Delete a thread (the open one by default)
  /stop                 - Stop the streaming reply
  /help, /h, /?         - Show this help
  /quit, /exit, /q      - Exit chat

Anything else is sent as a message. Ctrl-C stops a streaming reply.";
