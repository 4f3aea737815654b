use crate::models::wire::Mode;
use crate::render::MessageSink;
use crate::widget::{ ChatWidget, InputEvent, InputField, Key };
use log::{ debug, error, info };
use tokio::io::{ AsyncBufRead, AsyncBufReadExt };
use tokio::task::JoinSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    EmergencyInfo,
    SafetyTips,
    Quit,
    Message(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/emergency" => ConsoleCommand::EmergencyInfo,
            "/safety" => ConsoleCommand::SafetyTips,
            "/quit" => ConsoleCommand::Quit,
            _ => ConsoleCommand::Message(line.to_string()),
        }
    }
}

/// Reads lines as Enter presses. Deliveries run concurrently and render in arrival order;
/// all of them are awaited before returning.
pub async fn drive<R, S>(
    reader: R,
    widget: ChatWidget<S>
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>
    where R: AsyncBufRead + Unpin, S: MessageSink + 'static
{
    let mut lines = reader.lines();
    let mut input = InputField::default();
    let mut in_flight = JoinSet::new();
    let mut sent = 0;

    while let Some(line) = lines.next_line().await? {
        match ConsoleCommand::parse(&line) {
            ConsoleCommand::Quit => {
                info!("Quit requested");
                break;
            }
            ConsoleCommand::EmergencyInfo => {
                if let Err(e) = widget.show_emergency_info().await {
                    error!("Failed to show emergency info: {}", e);
                }
            }
            ConsoleCommand::SafetyTips => {
                if let Err(e) = widget.show_safety_tips().await {
                    error!("Failed to show safety tips: {}", e);
                }
            }
            ConsoleCommand::Message(text) => {
                if widget.mode() == Mode::Kids {
                    let local = widget.classify_locally(&text);
                    debug!(
                        "Local classification: {:?} (emergency: {})",
                        local.category,
                        local.is_emergency
                    );
                }
                input.set_value(text);
                if let Some(submission) = widget.capture(&InputEvent::KeyPress(Key::Enter), &mut input).await {
                    sent += 1;
                    let widget = widget.clone();
                    in_flight.spawn(async move {
                        widget.deliver(submission).await;
                    });
                }
            }
        }

        while let Some(done) = in_flight.try_join_next() {
            if let Err(e) = done {
                error!("Delivery task failed: {}", e);
            }
        }
    }

    if !in_flight.is_empty() {
        info!("Waiting for {} pending response(s)", in_flight.len());
    }
    while let Some(done) = in_flight.join_next().await {
        if let Err(e) = done {
            error!("Delivery task failed: {}", e);
        }
    }

    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(ConsoleCommand::parse("/emergency"), ConsoleCommand::EmergencyInfo);
        assert_eq!(ConsoleCommand::parse("  /safety "), ConsoleCommand::SafetyTips);
        assert_eq!(ConsoleCommand::parse("/quit"), ConsoleCommand::Quit);
        assert_eq!(ConsoleCommand::parse("/exit"), ConsoleCommand::Message("/exit".into()));
        assert_eq!(
            ConsoleCommand::parse("where is /emergency"),
            ConsoleCommand::Message("where is /emergency".into())
        );
    }
}
