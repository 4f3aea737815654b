use std::io::{ self, Write };
use log::{ debug, error };
use super::{ MessageList, MessageSink };
use crate::models::chat::{ ChatMessage, Role };

/// Prints messages as they are appended, keeping a `MessageList` model of the
/// viewport. Write failures are logged, never raised.
pub struct TerminalRenderer {
    out: Box<dyn Write + Send>,
    model: MessageList,
}

impl TerminalRenderer {
    pub fn new(out: Box<dyn Write + Send>, viewport_lines: usize) -> Self {
        Self { out, model: MessageList::new(viewport_lines) }
    }

    pub fn stdout(viewport_lines: usize) -> Self {
        Self::new(Box::new(io::stdout()), viewport_lines)
    }

    pub fn model(&self) -> &MessageList {
        &self.model
    }

    fn prefix(message: &ChatMessage) -> &'static str {
        match (message.role, message.emergency) {
            (_, true) => "[!]",
            (Role::User, false) => "you>",
            (Role::Bot, false) => "bot>",
        }
    }
}

pub fn format_message(message: &ChatMessage) -> String {
    let prefix = TerminalRenderer::prefix(message);
    let pad = " ".repeat(prefix.len() + 1);
    message.content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 { format!("{} {}", prefix, line) } else { format!("{}{}", pad, line) }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl MessageSink for TerminalRenderer {
    fn append(&mut self, message: ChatMessage) {
        if let Err(e) = writeln!(self.out, "{}", format_message(&message)) {
            error!("Failed to write message to terminal: {}", e);
        }
        self.model.append(message);
    }

    fn scroll_to_bottom(&mut self) {
        self.model.scroll_to_bottom();
        debug!(
            "Viewport at line {} shows {} of {} message(s)",
            self.model.scroll_top(),
            self.model.visible().len(),
            self.model.len()
        );
        if let Err(e) = self.out.flush() {
            error!("Failed to flush terminal: {}", e);
        }
    }
}
