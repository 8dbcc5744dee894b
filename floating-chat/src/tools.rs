use shared_types::{ToolDescriptor, TOOL_CATALOG};

use crate::chat::SelectedTools;

/// One row of the tools popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolEntry {
    pub descriptor: ToolDescriptor,
    pub selected: bool,
}

/// Popup visibility. Independent of which tools are armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolSelector {
    popup_open: bool,
}

impl ToolSelector {
    pub fn catalog() -> &'static [ToolDescriptor] {
        &TOOL_CATALOG
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    pub fn toggle_popup(&mut self) {
        self.popup_open = !self.popup_open;
    }

    pub fn render(&self, selected: &SelectedTools) -> Vec<ToolEntry> {
        Self::catalog()
            .iter()
            .map(|descriptor| ToolEntry {
                descriptor: *descriptor,
                selected: selected.contains(descriptor.id),
            })
            .collect()
    }
}

/// Chip labels for armed tools, in arming order.
pub fn selected_chips(selected: &SelectedTools) -> Vec<String> {
    selected
        .descriptors()
        .iter()
        .map(|tool| format!("{} {}", tool.icon, tool.label))
        .collect()
}
