use crate::classifier::{ Classification, KeywordClassifier };
use crate::config::keywords::{ KeywordError, EMERGENCY, SAFETY };
use crate::models::chat::ChatMessage;
use crate::models::wire::{ ChatOutcome, ChatRequest, Mode };
use crate::render::{ add_message, render_outcome, MessageSink };
use crate::transport::{ dispatch, ChatTransport };
use log::{ debug, info };
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Submit,
    KeyPress(Key),
}

impl InputEvent {
    pub fn triggers_submit(&self) -> bool {
        matches!(self, InputEvent::Submit | InputEvent::KeyPress(Key::Enter))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
}

impl InputField {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Returns the trimmed value and clears the field, or leaves it untouched when blank.
    pub fn take_trimmed(&mut self) -> Option<String> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            return None;
        }
        let message = trimmed.to_string();
        self.value.clear();
        Some(message)
    }
}

/// A captured, already echoed message waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: Uuid,
    pub message: String,
}

/// One chat controller bound to a mode, a transport and a message container.
pub struct ChatWidget<S: MessageSink> {
    mode: Mode,
    language: Option<String>,
    transport: Arc<dyn ChatTransport>,
    classifier: KeywordClassifier,
    view: Arc<Mutex<S>>,
}

impl<S: MessageSink> Clone for ChatWidget<S> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            language: self.language.clone(),
            transport: Arc::clone(&self.transport),
            classifier: self.classifier.clone(),
            view: Arc::clone(&self.view),
        }
    }
}

impl<S: MessageSink> ChatWidget<S> {
    pub fn new(
        mode: Mode,
        transport: Arc<dyn ChatTransport>,
        classifier: KeywordClassifier,
        view: Arc<Mutex<S>>
    ) -> Self {
        Self {
            mode,
            language: None,
            transport,
            classifier,
            view,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn view(&self) -> &Arc<Mutex<S>> {
        &self.view
    }

    /// Input capture: echoes the trimmed text as a user message and clears the field.
    pub async fn capture(&self, event: &InputEvent, input: &mut InputField) -> Option<Submission> {
        if !event.triggers_submit() {
            return None;
        }
        let message = input.take_trimmed()?;

        add_message(&mut *self.view.lock().await, ChatMessage::user(message.clone()));

        let submission = Submission { id: Uuid::new_v4(), message };
        debug!("Captured submission {} ({} mode)", submission.id, self.mode);
        Some(submission)
    }

    /// Sends the submission and renders whatever comes back. Never fails.
    pub async fn deliver(&self, submission: Submission) {
        let request = ChatRequest {
            message: submission.message,
            mode: self.mode,
            language: self.language.clone(),
        };
        let outcome = dispatch(self.transport.as_ref(), &request).await;
        if let ChatOutcome::Failed { reason } = &outcome {
            info!("Submission {} failed: {}", submission.id, reason);
        } else {
            info!("Submission {} answered", submission.id);
        }

        render_outcome(&mut *self.view.lock().await, self.mode, outcome);
    }

    /// Capture then deliver. Returns whether a request was sent.
    pub async fn handle_event(&self, event: InputEvent, input: &mut InputField) -> bool {
        match self.capture(&event, input).await {
            Some(submission) => {
                self.deliver(submission).await;
                true
            }
            None => false,
        }
    }

    /// Local preview only; the result is never sent to the server.
    pub fn classify_locally(&self, text: &str) -> Classification {
        self.classifier.classify(text)
    }

    pub async fn show_emergency_info(&self) -> Result<(), KeywordError> {
        self.show_canned(EMERGENCY).await
    }

    pub async fn show_safety_tips(&self) -> Result<(), KeywordError> {
        self.show_canned(SAFETY).await
    }

    async fn show_canned(&self, category: &str) -> Result<(), KeywordError> {
        let response = self.classifier.config().rule(category)?.response.clone();
        add_message(&mut *self.view.lock().await, ChatMessage::bot(response));
        Ok(())
    }
}
