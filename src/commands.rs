//! Slash commands

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    AddContext(String),
    Unknown(String),
}

/// `None` means the input is a question for the assistant, not a command.
pub fn parse(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }
    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };
    Some(match name {
        "/help" => Command::Help,
        "/exit" | "/quit" => Command::Exit,
        "/add-context" => Command::AddContext(rest.to_string()),
        other => Command::Unknown(other.to_string()),
    })
}

pub const HELP: &[&str] = &[
    "/help                 show this help",
    "/add-context <text>   add background the assistant should know",
    "/exit                 end the session (Ctrl-D also works)",
    "anything else is a question about the codebase",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse("where is the parser?"), None);
        assert_eq!(parse("  how does /api routing work"), None);
    }

    #[test]
    fn known_commands_parse() {
        assert_eq!(parse("/help"), Some(Command::Help));
        assert_eq!(parse("/exit"), Some(Command::Exit));
        assert_eq!(parse("/quit"), Some(Command::Exit));
        assert_eq!(parse(" /exit "), Some(Command::Exit));
    }

    #[test]
    fn add_context_keeps_its_payload() {
        assert_eq!(
            parse("/add-context the auth module is legacy"),
            Some(Command::AddContext("the auth module is legacy".to_string()))
        );
        assert_eq!(parse("/add-context"), Some(Command::AddContext(String::new())));
    }

    #[test]
    fn unknown_slash_is_reported() {
        assert_eq!(
            parse("/copy"),
            Some(Command::Unknown("/copy".to_string()))
        );
    }
}
