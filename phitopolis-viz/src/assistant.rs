//! Chat assistant controller
//!
//! Holds the transcript and enforces one request in flight at a time. The
//! controller never performs I/O itself: [`AssistantController::submit`]
//! hands back the request to send, and the caller reports the outcome with
//! [`AssistantController::response_arrived`] or
//! [`AssistantController::response_failed`].

use serde::{Deserialize, Serialize};

/// First message shown in a fresh chat
pub const GREETING: &str = "Hello! I'm Phit, your virtual guide. Ask me about our tech stack, culture, or what it's like to work at Phitopolis.";

/// Shown in place of a reply when the request could not be completed
pub const FALLBACK_REPLY: &str =
    "Our systems are currently calibrating. Please try again in a moment.";

/// How many earlier transcript entries travel with each request
pub const HISTORY_WINDOW: usize = 5;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// CSS class used by the widget
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: f64,
}

/// Body of a chat request (mirrored by the server's `/api/chat` handler)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRequest {
    /// Texts of the most recent transcript entries, oldest first
    pub history: Vec<String>,
    /// The message just submitted
    pub message: String,
}

/// Body of a chat reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationReply {
    pub text: String,
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantState {
    /// Ready for a submission
    Idle,
    /// A request is in flight; submissions are rejected
    AwaitingResponse,
    /// The widget was torn down; late replies are dropped
    Closed,
}

/// Source of message timestamps
pub type Clock = Box<dyn Fn() -> f64>;

/// Chat controller state machine
pub struct AssistantController {
    transcript: Vec<Message>,
    state: AssistantState,
    input: String,
    clock: Clock,
}

impl AssistantController {
    /// Create a controller whose transcript starts with the greeting
    pub fn new(clock: Clock) -> Self {
        let greeting = Message {
            role: Role::Assistant,
            text: GREETING.to_string(),
            timestamp_ms: clock(),
        };
        Self {
            transcript: vec![greeting],
            state: AssistantState::Idle,
            input: String::new(),
            clock,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn state(&self) -> AssistantState {
        self.state
    }

    /// True while a request is in flight (the widget disables input)
    pub fn is_loading(&self) -> bool {
        self.state == AssistantState::AwaitingResponse
    }

    /// Current contents of the input box
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Submit the input buffer. See [`Self::submit_text`].
    pub fn submit(&mut self) -> Option<ConversationRequest> {
        let text = std::mem::take(&mut self.input);
        let request = self.submit_text(&text);
        if request.is_none() {
            // Rejected submissions leave the box as it was
            self.input = text;
        }
        request
    }

    /// Append a user message and return the request to dispatch.
    ///
    /// Returns `None` without touching the transcript when the text is blank
    /// or a request is already in flight.
    pub fn submit_text(&mut self, text: &str) -> Option<ConversationRequest> {
        if text.trim().is_empty() || self.state != AssistantState::Idle {
            return None;
        }

        let start = self.transcript.len().saturating_sub(HISTORY_WINDOW);
        let history = self.transcript[start..]
            .iter()
            .map(|m| m.text.clone())
            .collect();

        self.append(Role::User, text.to_string());
        self.input.clear();
        self.state = AssistantState::AwaitingResponse;

        Some(ConversationRequest {
            history,
            message: text.to_string(),
        })
    }

    /// Record the reply to the in-flight request.
    ///
    /// Returns false (and changes nothing) when no request is in flight,
    /// including after [`Self::close`].
    pub fn response_arrived(&mut self, text: impl Into<String>) -> bool {
        if self.state != AssistantState::AwaitingResponse {
            return false;
        }
        self.append(Role::Assistant, text.into());
        self.state = AssistantState::Idle;
        true
    }

    /// Record that the in-flight request failed; the fallback reply is shown
    pub fn response_failed(&mut self) -> bool {
        self.response_arrived(FALLBACK_REPLY)
    }

    /// Apply a request outcome
    pub fn resolve<E>(&mut self, outcome: Result<String, E>) -> bool {
        match outcome {
            Ok(text) => self.response_arrived(text),
            Err(_) => self.response_failed(),
        }
    }

    /// Detach from the UI. Anything that arrives afterwards is ignored.
    pub fn close(&mut self) {
        self.state = AssistantState::Closed;
    }

    fn append(&mut self, role: Role, text: String) {
        let timestamp_ms = (self.clock)();
        self.transcript.push(Message {
            role,
            text,
            timestamp_ms,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock that advances one second per reading
    fn ticking_clock() -> Clock {
        let now = Rc::new(Cell::new(1_700_000_000_000.0));
        Box::new(move || {
            let t = now.get();
            now.set(t + 1000.0);
            t
        })
    }

    fn controller() -> AssistantController {
        AssistantController::new(ticking_clock())
    }

    #[test]
    fn starts_with_greeting() {
        let c = controller();
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.transcript()[0].role, Role::Assistant);
        assert_eq!(c.transcript()[0].text, GREETING);
        assert_eq!(c.state(), AssistantState::Idle);
    }

    #[test]
    fn successful_exchange() {
        let mut c = controller();
        c.set_input("What tech do you use?");
        let request = c.submit().expect("accepted");

        assert_eq!(c.transcript().len(), 2);
        assert_eq!(c.state(), AssistantState::AwaitingResponse);
        assert!(c.is_loading());
        assert_eq!(c.input(), "");
        assert_eq!(request.message, "What tech do you use?");
        assert_eq!(request.history, vec![GREETING.to_string()]);

        assert!(c.response_arrived("We use modern distributed systems."));
        assert_eq!(c.transcript().len(), 3);
        let last = c.transcript().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.text, "We use modern distributed systems.");
        assert_eq!(c.state(), AssistantState::Idle);
    }

    #[test]
    fn failed_request_shows_fallback() {
        let mut c = controller();
        c.submit_text("What tech do you use?").unwrap();

        assert!(c.resolve::<&str>(Err("network down")));
        assert_eq!(c.transcript().len(), 3);
        assert_eq!(c.transcript()[2].text, FALLBACK_REPLY);
        assert_eq!(c.transcript()[2].role, Role::Assistant);
        assert_eq!(c.state(), AssistantState::Idle);
    }

    #[test]
    fn blank_submissions_are_ignored() {
        let mut c = controller();
        for text in ["", "   ", "\n\t "] {
            assert!(c.submit_text(text).is_none());
        }
        c.set_input("  ");
        assert!(c.submit().is_none());
        assert_eq!(c.input(), "  ");
        assert_eq!(c.transcript().len(), 1);
        assert_eq!(c.state(), AssistantState::Idle);
    }

    #[test]
    fn second_submit_while_waiting_is_rejected() {
        let mut c = controller();
        assert!(c.submit_text("first").is_some());
        c.set_input("second");
        assert!(c.submit().is_none());
        assert_eq!(c.transcript().len(), 2);
        assert_eq!(c.input(), "second");
        assert_eq!(c.state(), AssistantState::AwaitingResponse);
    }

    #[test]
    fn history_is_last_five_entries_before_the_new_message() {
        let mut c = controller();
        for i in 0..4 {
            c.submit_text(&format!("q{i}")).unwrap();
            c.response_arrived(format!("a{i}"));
        }
        // greeting + 8 entries
        assert_eq!(c.transcript().len(), 9);

        let request = c.submit_text("q4").unwrap();
        assert_eq!(request.history, vec!["a1", "q2", "a2", "q3", "a3"]);
        assert_eq!(request.message, "q4");
    }

    #[test]
    fn consecutive_user_messages_are_allowed_after_reply() {
        let mut c = controller();
        c.submit_text("one").unwrap();
        c.response_failed();
        c.submit_text("two").unwrap();
        let roles: Vec<Role> = c.transcript().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::Assistant, Role::User, Role::Assistant, Role::User]
        );
    }

    #[test]
    fn reply_without_request_is_ignored() {
        let mut c = controller();
        assert!(!c.response_arrived("unsolicited"));
        assert!(!c.response_failed());
        assert_eq!(c.transcript().len(), 1);
    }

    #[test]
    fn late_reply_after_close_is_dropped() {
        let mut c = controller();
        c.submit_text("hello").unwrap();
        c.close();

        assert!(!c.response_arrived("too late"));
        assert_eq!(c.transcript().len(), 2);
        assert_eq!(c.state(), AssistantState::Closed);
        assert!(c.submit_text("again").is_none());
    }

    #[test]
    fn timestamps_come_from_clock() {
        let mut c = controller();
        c.submit_text("hi").unwrap();
        c.response_arrived("hello");
        let stamps: Vec<f64> = c.transcript().iter().map(|m| m.timestamp_ms).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn submitted_text_is_kept_verbatim() {
        let mut c = controller();
        let request = c.submit_text("  padded  ").unwrap();
        assert_eq!(request.message, "  padded  ");
        assert_eq!(c.transcript()[1].text, "  padded  ");
    }

    #[test]
    fn request_wire_format() {
        let request = ConversationRequest {
            history: vec!["Hi".to_string()],
            message: "Hiring?".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"history":["Hi"],"message":"Hiring?"}"#);
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), r#""assistant""#);
    }
}
