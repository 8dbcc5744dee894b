use dioxus_logger::tracing::Level;

use floating_chat::{start, OverlayConfig};

fn main() {
    // Initialize logging for WASM
    wasm_logger::init(wasm_logger::Config::default());
    dioxus_logger::init(Level::INFO).ok();

    start(OverlayConfig::default());
}
