//! Shared types between the overlay and its assistant backend
//!
//! These types are used by both:
//! - the content-script overlay (Dioxus, WASM)
//! - any backend that answers user turns (native Rust)
//!
//! Serializable with serde for JSON over extension messaging/HTTP

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// One open-to-close lifetime of the overlay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Message identifier, unique within a session.
///
/// `seq` comes from a per-session monotonic counter, so two identifiers
/// handed out by the same session never compare equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId {
    pub session: SessionId,
    pub seq: u64,
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-msg-{}", self.session.0, self.seq)
    }
}

// ============================================================================
// Conversation
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

/// A single chat entry. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(id: MessageId, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            timestamp,
        }
    }

    pub fn assistant(id: MessageId, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Assistant,
            timestamp,
        }
    }
}

// ============================================================================
// Tool Catalog
// ============================================================================

/// Static catalog entry for an invokable capability.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct ToolDescriptor {
    pub id: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

pub const TOOL_CATALOG: [ToolDescriptor; 4] = [
    ToolDescriptor {
        id: "search",
        icon: "🔍",
        label: "Search",
    },
    ToolDescriptor {
        id: "navigate",
        icon: "🧭",
        label: "Navigate",
    },
    ToolDescriptor {
        id: "click",
        icon: "👆",
        label: "Click",
    },
    ToolDescriptor {
        id: "type",
        icon: "⌨️",
        label: "Type",
    },
];

/// Look up a catalog entry by identifier.
pub fn find_tool(id: &str) -> Option<&'static ToolDescriptor> {
    TOOL_CATALOG.iter().find(|tool| tool.id == id)
}

// ============================================================================
// Overlay Geometry
// ============================================================================

/// Screen-space centre of the activation control at click time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ActivationPosition {
    pub x: f64,
    pub y: f64,
}

/// Which edge the panel slides in from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SlideDirection {
    FromLeft,
    FromRight,
}

impl SlideDirection {
    /// Right-origin when the click lands strictly past the viewport midline.
    pub fn from_position(position: ActivationPosition, viewport_width: f64) -> Self {
        if position.x > viewport_width / 2.0 {
            SlideDirection::FromRight
        } else {
            SlideDirection::FromLeft
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SlideDirection::FromLeft => "slide-from-left",
            SlideDirection::FromRight => "slide-from-right",
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Duration of the panel's exit transition; the teardown timer waits this long.
pub const CLOSE_TRANSITION_MS: u32 = 300;
/// Delay before the simulated assistant reply lands.
pub const REPLY_DELAY_MS: u32 = 1000;
/// Pages whose address starts with one of these never get the overlay.
pub const BLOCKED_URL_PREFIXES: [&str; 4] = ["chrome://", "chrome-extension://", "about:", "file://"];
/// Packaged stylesheet, resolved through the extension runtime.
pub const STYLESHEET_PATH: &str = "content/floating-chat.css";
pub const ROOT_ELEMENT_ID: &str = "floating-chat-root";
pub const AFFORDANCE_ELEMENT_ID: &str = "floating-chat-activation";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    pub close_transition_ms: u32,
    pub reply_delay_ms: u32,
    pub blocked_url_prefixes: Vec<String>,
    pub stylesheet_path: String,
    pub root_element_id: String,
    pub affordance_element_id: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            close_transition_ms: CLOSE_TRANSITION_MS,
            reply_delay_ms: REPLY_DELAY_MS,
            blocked_url_prefixes: BLOCKED_URL_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
            stylesheet_path: STYLESHEET_PATH.to_string(),
            root_element_id: ROOT_ELEMENT_ID.to_string(),
            affordance_element_id: AFFORDANCE_ELEMENT_ID.to_string(),
        }
    }
}

impl OverlayConfig {
    pub fn is_blocked_url(&self, url: &str) -> bool {
        self.blocked_url_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
    }
}
