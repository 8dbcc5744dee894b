use std::rc::Rc;

use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use shared_types::{Message, Sender};

use super::tools::{SelectedToolChips, ToolsPopup};
use crate::backend::{AssistantBackend, EchoBackend, GlooSleeper};
use crate::chat::{classify_key, ChatSession, KeyIntent};
use crate::lifecycle::{OverlayBridge, ViewProps};
use crate::tools::ToolSelector;

#[component]
pub fn FloatingChat(view: ViewProps) -> Element {
    let bridge = use_context::<OverlayBridge>();
    let ViewProps {
        session,
        direction,
        config,
    } = view;

    let mut is_open = use_signal(|| false);
    let mut chat = use_signal(|| ChatSession::new(session));
    let mut tool_selector = use_signal(ToolSelector::default);
    let mut end_anchor = use_signal(|| None::<Rc<MountedData>>);
    let backend = use_hook(|| Rc::new(EchoBackend::new(GlooSleeper, config.reply_delay_ms)));

    // Entry transition: first paint without `open`, then flip it on.
    use_effect(move || {
        is_open.set(true);
    });

    // Scroll to the newest message whenever the conversation grows.
    use_effect(move || {
        let _ = chat.read().messages().len();
        if let Some(anchor) = end_anchor.read().clone() {
            spawn(async move {
                let _ = anchor.scroll_to(ScrollBehavior::Smooth).await;
            });
        }
    });

    let send_message = use_callback(move |_| {
        let Some(turn) = chat.write().submit_input(Utc::now()) else {
            return;
        };
        let backend = backend.clone();
        // Scope-owned task: unmounting the view cancels it.
        spawn(async move {
            match backend.send_user_turn(&turn).await {
                Ok(reply) => {
                    if !chat.write().deliver_reply(turn.reply_id, reply.text, Utc::now()) {
                        dioxus_logger::tracing::debug!(
                            "Dropped reply {} for {}",
                            turn.reply_id,
                            turn.session
                        );
                    }
                }
                Err(e) => {
                    dioxus_logger::tracing::warn!("Assistant backend failed: {}", e);
                    chat.write().abandon_reply(turn.reply_id);
                }
            }
        });
    });

    let onkeydown = move |e: KeyboardEvent| {
        let modifiers = e.modifiers();
        let has_modifier =
            modifiers.shift() || modifiers.ctrl() || modifiers.alt() || modifiers.meta();
        match classify_key(e.key() == Key::Enter, has_modifier) {
            KeyIntent::Submit => {
                e.prevent_default();
                send_message.call(());
            }
            // Browsers only insert a newline natively for Shift+Enter.
            KeyIntent::LineBreak => {
                e.prevent_default();
                chat.write().insert_line_break();
            }
            KeyIntent::Edit => {}
        }
    };

    let on_close = move |_| {
        if !is_open() {
            return;
        }
        is_open.set(false);
        bridge.request_close(session);
    };

    let (messages, input, can_submit, pending, selected) = {
        let state = chat.read();
        (
            state.messages().to_vec(),
            state.input().to_string(),
            state.can_submit(),
            state.pending_replies() > 0,
            state.selected_tools().clone(),
        )
    };
    let entries = tool_selector.read().render(&selected);
    let popup_open = tool_selector.read().is_popup_open();

    let panel_class = format!(
        "floating-chat-glass-panel {} {}",
        if is_open() { "open" } else { "" },
        direction.css_class()
    );
    let panel_style = format!("transition-duration: {}ms;", config.close_transition_ms);

    rsx! {
        div {
            class: "{panel_class}",
            style: "{panel_style}",

            div {
                class: "floating-chat-header",
                h3 { "Assistant" }
                button {
                    class: "close-button",
                    onclick: on_close,
                    "×"
                }
            }

            div {
                class: "floating-chat-messages",
                div {
                    class: "messages-scroll-container",
                    for message in messages {
                        MessageBubble { key: "{message.id}", message }
                    }
                    if pending {
                        TypingIndicator {}
                    }
                    div {
                        class: "messages-end",
                        onmounted: move |e: MountedEvent| end_anchor.set(Some(e.data())),
                    }
                }
            }

            div {
                class: "floating-chat-input-container",
                SelectedToolChips { selected }

                div {
                    class: "input-row",
                    button {
                        class: "tools-toggle-button",
                        onclick: move |_| tool_selector.write().toggle_popup(),
                        "+"
                    }
                    textarea {
                        class: "chat-input",
                        placeholder: "Type a message...",
                        value: "{input}",
                        rows: "1",
                        oninput: move |e: FormEvent| chat.write().update_input(e.value()),
                        onkeydown,
                    }
                    button {
                        class: "send-button",
                        disabled: !can_submit,
                        onclick: move |_| send_message.call(()),
                        "Send"
                    }
                }

                if popup_open {
                    ToolsPopup {
                        entries,
                        on_toggle: move |id: String| {
                            chat.write().toggle_tool(&id);
                        },
                    }
                }
            }
        }
    }
}

#[component]
pub fn MessageBubble(message: Message) -> Element {
    let class = match message.sender {
        Sender::User => "message-bubble user",
        Sender::Assistant => "message-bubble assistant",
    };
    let sent_at = format_timestamp(message.timestamp);

    rsx! {
        div {
            class,
            title: "{sent_at}",
            div { class: "message-glass-backing", "{message.text}" }
        }
    }
}

#[component]
pub fn TypingIndicator() -> Element {
    rsx! {
        div {
            class: "message-bubble assistant",
            div {
                class: "message-glass-backing typing-indicator",
                span {}
                span {}
                span {}
            }
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%H:%M").to_string()
}
