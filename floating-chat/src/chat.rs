//! Chat interaction state: conversation, input buffer, armed tools.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared_types::{find_tool, Message, MessageId, SessionId, ToolDescriptor};

const ECHO_PREFIX: &str = "I received your message: ";

/// Text of the simulated assistant reply.
pub fn echo_reply(text: &str) -> String {
    format!("{ECHO_PREFIX}{text}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    Submit,
    LineBreak,
    Edit,
}

/// Plain Enter submits; Enter with any modifier becomes a line break.
pub fn classify_key(is_enter: bool, has_modifier: bool) -> KeyIntent {
    match (is_enter, has_modifier) {
        (true, false) => KeyIntent::Submit,
        (true, true) => KeyIntent::LineBreak,
        _ => KeyIntent::Edit,
    }
}

/// Catalog tools armed for the next outgoing message, in arming order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedTools {
    ids: Vec<&'static str>,
}

impl SelectedTools {
    /// Flip membership of `id`. Returns whether the tool is armed afterwards.
    ///
    /// Identifiers outside the catalog are ignored.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(tool) = find_tool(id) else {
            return false;
        };
        if let Some(pos) = self.ids.iter().position(|armed| *armed == tool.id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(tool.id);
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|armed| *armed == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[&'static str] {
        &self.ids
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.ids.iter().filter_map(|id| find_tool(id)).copied().collect()
    }
}

/// Everything the assistant backend needs to answer one user message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTurn {
    pub session: SessionId,
    /// Identifier reserved for the reply at submission time.
    pub reply_id: MessageId,
    pub text: String,
    pub history: Vec<Message>,
    pub armed_tools: Vec<ToolDescriptor>,
}

/// State of one mounted chat view. Dropped with the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    session: SessionId,
    messages: Vec<Message>,
    input: String,
    selected_tools: SelectedTools,
    pending_replies: Vec<MessageId>,
    next_seq: u64,
}

impl ChatSession {
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            messages: Vec::new(),
            input: String::new(),
            selected_tools: SelectedTools::default(),
            pending_replies: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected_tools(&self) -> &SelectedTools {
        &self.selected_tools
    }

    /// Replies reserved but not yet delivered or abandoned.
    pub fn pending_replies(&self) -> usize {
        self.pending_replies.len()
    }

    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty()
    }

    pub fn update_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Append a literal newline to the input buffer without submitting.
    pub fn insert_line_break(&mut self) {
        self.input.push('\n');
    }

    pub fn toggle_tool(&mut self, id: &str) -> bool {
        self.selected_tools.toggle(id)
    }

    fn next_id(&mut self) -> MessageId {
        self.next_seq += 1;
        MessageId {
            session: self.session,
            seq: self.next_seq,
        }
    }

    /// Submit the current input buffer.
    pub fn submit_input(&mut self, now: DateTime<Utc>) -> Option<UserTurn> {
        let text = self.input.clone();
        self.submit_message(&text, now)
    }

    /// Append a user message and reserve its reply.
    ///
    /// Blank text is a no-op: neither the conversation nor the input buffer
    /// changes.
    pub fn submit_message(&mut self, text: &str, now: DateTime<Utc>) -> Option<UserTurn> {
        if text.trim().is_empty() {
            return None;
        }

        let user_id = self.next_id();
        let reply_id = self.next_id();
        self.messages.push(Message::user(user_id, text, now));
        self.input.clear();
        self.pending_replies.push(reply_id);

        Some(UserTurn {
            session: self.session,
            reply_id,
            text: text.to_string(),
            history: self.messages.clone(),
            armed_tools: self.selected_tools.descriptors(),
        })
    }

    /// Append the assistant reply reserved under `reply_id`.
    ///
    /// Returns false, leaving the conversation untouched, when the reply
    /// belongs to another session or was already delivered.
    pub fn deliver_reply(
        &mut self,
        reply_id: MessageId,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> bool {
        if reply_id.session != self.session {
            return false;
        }
        let Some(pos) = self.pending_replies.iter().position(|id| *id == reply_id) else {
            return false;
        };
        self.pending_replies.remove(pos);
        self.messages.push(Message::assistant(reply_id, text, now));
        true
    }

    /// Forget a reservation whose reply will never arrive.
    pub fn abandon_reply(&mut self, reply_id: MessageId) -> bool {
        let before = self.pending_replies.len();
        self.pending_replies.retain(|id| *id != reply_id);
        before != self.pending_replies.len()
    }
}
