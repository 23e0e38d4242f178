//! Slash-command parsing and execution
//!
//! Input beginning with `/` is checked against the command registry before
//! anything reaches the backend. Anything else, including unrecognized
//! commands, is processed as a chat message.

use crate::core::app::App;

pub enum CommandResult {
    /// The command was handled entirely in the state layer.
    Continue,
    /// Not a command; submit it as a chat message.
    ProcessAsMessage(String),
    /// The caller must issue a model catalog fetch.
    RefreshModels,
}

pub struct CommandUsage {
    pub syntax: &'static str,
    pub description: &'static str,
}

struct Command {
    name: &'static str,
    usage: CommandUsage,
    handler: fn(&mut App, &str) -> CommandResult,
}

static COMMANDS: &[Command] = &[
    Command {
        name: "clear",
        usage: CommandUsage {
            syntax: "/clear",
            description: "Clear the conversation",
        },
        handler: handle_clear,
    },
    Command {
        name: "models",
        usage: CommandUsage {
            syntax: "/models",
            description: "Refresh and show the model catalog",
        },
        handler: handle_models,
    },
    Command {
        name: "log",
        usage: CommandUsage {
            syntax: "/log [filename]",
            description: "Enable or pause transcript logging",
        },
        handler: handle_log,
    },
    Command {
        name: "help",
        usage: CommandUsage {
            syntax: "/help",
            description: "Show help",
        },
        handler: handle_help,
    },
];

pub fn all_usages() -> impl Iterator<Item = &'static CommandUsage> {
    COMMANDS.iter().map(|c| &c.usage)
}

fn find_command(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|c| c.name == name)
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    match find_command(command_name) {
        Some(command) => (command.handler)(app, args),
        None => CommandResult::ProcessAsMessage(input.to_string()),
    }
}

fn handle_clear(app: &mut App, _args: &str) -> CommandResult {
    app.clear_transcript();
    app.set_status("Conversation cleared");
    CommandResult::Continue
}

fn handle_models(app: &mut App, _args: &str) -> CommandResult {
    app.conversation.begin_model_refresh();
    app.show_models_pane = true;
    CommandResult::RefreshModels
}

fn handle_log(app: &mut App, args: &str) -> CommandResult {
    let result = if args.is_empty() {
        app.logging.toggle()
    } else {
        app.logging.enable(args.to_string())
    };

    match result {
        Ok(message) => app.set_status(message),
        Err(e) => app.set_status(format!("Log error: {e}")),
    }
    CommandResult::Continue
}

fn handle_help(app: &mut App, _args: &str) -> CommandResult {
    app.show_help = true;
    CommandResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::CatalogState;
    use crate::utils::test_utils::create_test_app;

    #[test]
    fn plain_text_passes_through_as_a_message() {
        let mut app = create_test_app();
        match process_input(&mut app, "hello there") {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "hello there"),
            _ => panic!("expected pass-through"),
        }
    }

    #[test]
    fn unknown_commands_pass_through_as_messages() {
        let mut app = create_test_app();
        match process_input(&mut app, "/frobnicate now") {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "/frobnicate now"),
            _ => panic!("expected pass-through"),
        }
    }

    #[test]
    fn bare_slash_is_not_a_command() {
        let mut app = create_test_app();
        assert!(matches!(
            process_input(&mut app, "/"),
            CommandResult::ProcessAsMessage(_)
        ));
    }

    #[test]
    fn clear_command_resets_transcript_state() {
        let mut app = create_test_app();
        let pending = app.conversation.submit("hello").unwrap();
        app.conversation
            .resolve_chat(pending.generation, Ok("hi".to_string()));
        assert_eq!(app.conversation.messages().len(), 2);

        assert!(matches!(
            process_input(&mut app, "/clear"),
            CommandResult::Continue
        ));
        assert!(app.conversation.is_empty());
        assert!(app.status.is_some());
    }

    #[test]
    fn models_command_requests_a_refresh() {
        let mut app = create_test_app();
        assert!(matches!(
            process_input(&mut app, "/models"),
            CommandResult::RefreshModels
        ));
        assert!(app.show_models_pane);
        assert_eq!(app.conversation.catalog(), CatalogState::Loading);
    }

    #[test]
    fn log_command_enables_logging_to_a_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("chat.log");
        let mut app = create_test_app();

        let input = format!("/log {}", path.display());
        assert!(matches!(
            process_input(&mut app, &input),
            CommandResult::Continue
        ));
        assert!(app.logging.is_active());
    }

    #[test]
    fn help_command_opens_the_overlay() {
        let mut app = create_test_app();
        assert!(matches!(
            process_input(&mut app, "/help"),
            CommandResult::Continue
        ));
        assert!(app.show_help);
    }

    #[test]
    fn usages_cover_every_command() {
        let syntaxes: Vec<&str> = all_usages().map(|u| u.syntax).collect();
        assert!(syntaxes.contains(&"/clear"));
        assert!(syntaxes.contains(&"/models"));
        assert!(syntaxes.contains(&"/log [filename]"));
        assert!(syntaxes.contains(&"/help"));
    }
}
