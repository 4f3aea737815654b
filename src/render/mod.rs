pub mod list;
pub mod terminal;

use crate::models::chat::ChatMessage;
use crate::models::wire::{ ChatOutcome, EmergencyContacts, Mode };

pub use self::list::MessageList;
pub use self::terminal::TerminalRenderer;

pub const EMERGENCY_REMINDER: &str = "🚨 Remember: In an emergency, call 911 immediately!";

/// A scrolling message container.
pub trait MessageSink: Send {
    fn append(&mut self, message: ChatMessage);
    fn scroll_to_bottom(&mut self);
}

pub fn add_message<S: MessageSink + ?Sized>(sink: &mut S, message: ChatMessage) {
    sink.append(message);
    sink.scroll_to_bottom();
}

pub fn emergency_contacts_block(contacts: &EmergencyContacts) -> String {
    let mut block = String::from("Emergency Contacts:");
    for (service, number) in contacts {
        block.push('\n');
        block.push_str(&format!("{}: {}", service, number));
    }
    block
}

/// Renders the bot side of one submission. General mode reads contacts, kids mode the flag.
pub fn render_outcome<S: MessageSink + ?Sized>(sink: &mut S, mode: Mode, outcome: ChatOutcome) {
    match outcome {
        ChatOutcome::Ok { text, emergency_contacts, is_emergency } => {
            if let Some(text) = text {
                add_message(sink, ChatMessage::bot(text));
            }
            match mode {
                Mode::General => {
                    if let Some(contacts) = emergency_contacts {
                        add_message(sink, ChatMessage::emergency(emergency_contacts_block(&contacts)));
                    }
                }
                Mode::Kids => {
                    if is_emergency {
                        add_message(sink, ChatMessage::emergency(EMERGENCY_REMINDER));
                    }
                }
            }
        }
        ChatOutcome::Failed { .. } => {
            add_message(sink, ChatMessage::bot(mode.fallback_message()));
        }
    }
}
