use std::time::Instant;

use ratatui::text::{Line, Span};

use crate::core::conversation::{Conversation, PendingChat};
use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;

const WELCOME_TITLE: &str = "Welcome to Causerie";
const WELCOME_HINT: &str = "Start a conversation to explore your backend.";

/// Everything the interactive session owns: conversation state plus the
/// presentation-side bookkeeping (input buffer, scroll, panes, transcript
/// logging). Constructed once at startup and handed by reference to the
/// event loop.
pub struct App {
    pub conversation: Conversation,
    pub input: String,
    pub input_cursor_position: usize,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub show_models_pane: bool,
    pub show_help: bool,
    pub pulse_start: Instant,
    pub server_label: String,
    pub theme: Theme,
    pub logging: LoggingState,
    pub status: Option<String>,
    pub exit_requested: bool,
}

impl App {
    pub fn new(
        server_url: &str,
        theme: Theme,
        log_file: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let logging = LoggingState::new(log_file)?;

        Ok(App {
            conversation: Conversation::new(),
            input: String::new(),
            input_cursor_position: 0,
            scroll_offset: 0,
            auto_scroll: true,
            show_models_pane: false,
            show_help: false,
            pulse_start: Instant::now(),
            server_label: server_url.to_string(),
            theme,
            logging,
            status: None,
            exit_requested: false,
        })
    }

    /// Submit whatever is in the input buffer. Returns the ticket to hand
    /// to the network side, or `None` when the conversation rejected the
    /// input (blank, or a request is already outstanding).
    pub fn submit_input(&mut self) -> Option<PendingChat> {
        let pending = self.conversation.submit(&self.input)?;

        self.clear_input();
        self.auto_scroll = true;
        self.pulse_start = Instant::now();

        if let Err(e) = self.logging.log_message(&format!("You: {}", pending.text)) {
            tracing::warn!("failed to log message: {e}");
        }

        Some(pending)
    }

    /// Route a finished chat request back into the conversation and mirror
    /// any appended reply to the transcript log.
    pub fn apply_chat_outcome(&mut self, generation: u64, outcome: Result<String, String>) {
        let before = self.conversation.messages().len();
        self.conversation.resolve_chat(generation, outcome);

        if self.conversation.messages().len() > before {
            if let Some(reply) = self.conversation.messages().back() {
                if let Err(e) = self.logging.log_message(&reply.content) {
                    tracing::warn!("failed to log response: {e}");
                }
            }
        }
        self.auto_scroll = true;
    }

    pub fn clear_transcript(&mut self) {
        self.conversation.clear();
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn logging_status(&self) -> String {
        self.logging.status_string()
    }

    /// Transcript lines for the chat area. An empty log renders the
    /// welcome placeholder instead of nothing.
    pub fn build_display_lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();

        if self.conversation.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                WELCOME_TITLE,
                self.theme.user_prefix_style,
            )));
            lines.push(Line::from(Span::styled(
                WELCOME_HINT,
                self.theme.system_text_style,
            )));
            return lines;
        }

        for msg in self.conversation.messages() {
            if msg.is_user() {
                lines.push(Line::from(vec![
                    Span::styled("You: ", self.theme.user_prefix_style),
                    Span::styled(msg.content.as_str(), self.theme.user_text_style),
                ]));
                lines.push(Line::from(""));
            } else {
                for content_line in msg.content.lines() {
                    if content_line.trim().is_empty() {
                        lines.push(Line::from(""));
                    } else {
                        lines.push(Line::from(Span::styled(
                            content_line,
                            self.theme.assistant_text_style,
                        )));
                    }
                }
                lines.push(Line::from(""));
            }
        }

        lines
    }

    pub fn calculate_max_scroll_offset(&self, available_height: u16) -> u16 {
        let total_lines = self.build_display_lines().len() as u16;
        total_lines.saturating_sub(available_height)
    }

    /// Pin the view to the bottom while auto-scroll is on.
    pub fn update_scroll_position(&mut self, available_height: u16) {
        if self.auto_scroll {
            self.scroll_offset = self.calculate_max_scroll_offset(available_height);
        }
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16, available_height: u16) {
        let max_scroll = self.calculate_max_scroll_offset(available_height);
        self.scroll_offset = self.scroll_offset.saturating_add(amount).min(max_scroll);
        if self.scroll_offset >= max_scroll {
            self.auto_scroll = true;
        }
    }

    // Input editing. Cursor positions are char offsets, not byte offsets.

    pub fn insert_char_at_cursor(&mut self, c: char) {
        let byte_index = self
            .input
            .char_indices()
            .nth(self.input_cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len());
        self.input.insert(byte_index, c);
        self.input_cursor_position += 1;
    }

    pub fn insert_str_at_cursor(&mut self, s: &str) {
        let byte_index = self
            .input
            .char_indices()
            .nth(self.input_cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len());
        self.input.insert_str(byte_index, s);
        self.input_cursor_position += s.chars().count();
    }

    pub fn delete_char_before_cursor(&mut self) {
        if self.input_cursor_position == 0 {
            return;
        }
        let remove_at = self.input_cursor_position - 1;
        if let Some((byte_index, _)) = self.input.char_indices().nth(remove_at) {
            self.input.remove(byte_index);
            self.input_cursor_position = remove_at;
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.input_cursor_position = self.input_cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let max_position = self.input.chars().count();
        if self.input_cursor_position < max_position {
            self.input_cursor_position += 1;
        }
    }

    pub fn move_cursor_to_beginning(&mut self) {
        self.input_cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.input_cursor_position = self.input.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.input_cursor_position = 0;
    }
}
