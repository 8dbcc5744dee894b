use wasm_bindgen::JsValue;

/// Failures while building or tearing down the overlay.
///
/// These never escape into host-page script: the runtime logs them and
/// leaves the page untouched or the affordance inert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverlayError {
    #[error("isolation boundary unavailable: {0}")]
    IsolationUnavailable(String),

    #[error("no window or document available")]
    DocumentUnavailable,

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("failed to mount chat view: {0}")]
    ViewMount(String),
}

impl OverlayError {
    pub fn dom(err: JsValue) -> Self {
        Self::Dom(format!("{err:?}"))
    }

    pub fn isolation(err: JsValue) -> Self {
        Self::IsolationUnavailable(format!("{err:?}"))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("assistant backend unavailable: {0}")]
    Unavailable(String),

    #[error("assistant backend rejected the turn: {0}")]
    Rejected(String),
}
