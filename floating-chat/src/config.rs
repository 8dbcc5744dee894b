pub use shared_types::{OverlayConfig, CLOSE_TRANSITION_MS, REPLY_DELAY_MS};

/// Whether the overlay may initialize on a page with this address.
///
/// Checked once at startup; a denied page gets no affordance at all.
pub fn should_inject(page_url: &str, config: &OverlayConfig) -> bool {
    !config.is_blocked_url(page_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_pages_are_skipped() {
        let config = OverlayConfig::default();
        assert!(!should_inject("chrome://newtab/", &config));
        assert!(!should_inject("about:blank", &config));
        assert!(should_inject("https://docs.rs/dioxus", &config));
    }

    #[test]
    fn custom_denylist_replaces_default() {
        let config = OverlayConfig {
            blocked_url_prefixes: vec!["https://intranet.".to_string()],
            ..OverlayConfig::default()
        };
        assert!(!should_inject("https://intranet.example/", &config));
        assert!(should_inject("about:blank", &config));
    }
}
