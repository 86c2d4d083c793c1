//! Parsing of the shell's one-line commands.

/// A user command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    /// Open the detail view for an episode id.
    Open(String),
    Back,
    Reload,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  n, next          next page
  p, prev          previous page
  <id>, open <id>  show episode details
  b, back          back to the episode list
  r, reload        fetch the current view again
  h, help          this help
  q, quit          exit";

/// Parse one input line. Blank or unrecognised input yields `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let head = words.next()?.to_lowercase();
    let rest: Vec<&str> = words.collect();

    let command = match (head.as_str(), rest.as_slice()) {
        ("n" | "next", []) => Command::Next,
        ("p" | "prev" | "previous", []) => Command::Previous,
        ("b" | "back", []) => Command::Back,
        ("r" | "reload", []) => Command::Reload,
        ("h" | "help" | "?", []) => Command::Help,
        ("q" | "quit" | "exit", []) => Command::Quit,
        ("o" | "open", [id]) => Command::Open((*id).to_string()),
        (id, []) if id.chars().all(|c| c.is_ascii_digit()) => Command::Open(id.to_string()),
        _ => return None,
    };
    Some(command)
}
