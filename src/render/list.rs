use super::MessageSink;
use crate::models::chat::ChatMessage;

pub const DEFAULT_VIEWPORT_LINES: usize = 20;

/// In-memory message container with line-based scroll tracking.
#[derive(Debug, Clone)]
pub struct MessageList {
    messages: Vec<ChatMessage>,
    viewport_lines: usize,
    scroll_top: usize,
}

impl MessageList {
    pub fn new(viewport_lines: usize) -> Self {
        Self {
            messages: Vec::new(),
            viewport_lines: viewport_lines.max(1),
            scroll_top: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Total content height in lines.
    pub fn scroll_height(&self) -> usize {
        self.messages
            .iter()
            .map(|m| m.line_count())
            .sum()
    }

    pub fn max_scroll_top(&self) -> usize {
        self.scroll_height().saturating_sub(self.viewport_lines)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_top >= self.max_scroll_top()
    }

    /// Messages intersecting the current viewport.
    pub fn visible(&self) -> Vec<&ChatMessage> {
        let top = self.scroll_top;
        let bottom = top + self.viewport_lines;
        let mut line = 0;
        let mut visible = Vec::new();
        for message in &self.messages {
            let end = line + message.line_count();
            if end > top && line < bottom {
                visible.push(message);
            }
            line = end;
        }
        visible
    }
}

impl Default for MessageList {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_LINES)
    }
}

impl MessageSink for MessageList {
    fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.max_scroll_top();
    }
}
