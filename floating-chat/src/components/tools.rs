use dioxus::prelude::*;

use crate::chat::SelectedTools;
use crate::tools::{selected_chips, ToolEntry};

#[component]
pub fn ToolsPopup(entries: Vec<ToolEntry>, on_toggle: EventHandler<String>) -> Element {
    rsx! {
        div {
            class: "tools-popup",
            for entry in entries {
                button {
                    key: "{entry.descriptor.id}",
                    class: if entry.selected { "tool-button selected" } else { "tool-button" },
                    onclick: move |_| on_toggle.call(entry.descriptor.id.to_string()),
                    span { class: "tool-icon", "{entry.descriptor.icon}" }
                    span { class: "tool-label", "{entry.descriptor.label}" }
                }
            }
        }
    }
}

#[component]
pub fn SelectedToolChips(selected: SelectedTools) -> Element {
    if selected.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "selected-tools-display",
            for (id, chip) in selected.ids().iter().zip(selected_chips(&selected)) {
                span { key: "{id}", class: "selected-tool-chip", "{chip}" }
            }
        }
    }
}
