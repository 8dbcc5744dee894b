pub mod chat;
pub mod tools;

pub use chat::{FloatingChat, FloatingChatProps, MessageBubble, TypingIndicator};
pub use tools::{SelectedToolChips, ToolsPopup};
