//! Fixed-position button that opens the overlay.

use shared_types::ActivationPosition;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, MouseEvent};

use crate::error::OverlayError;

const AFFORDANCE_GLYPH: &str = "💬";
const AFFORDANCE_STYLE: &str = "position: fixed; bottom: 20px; right: 20px; width: 56px; \
     height: 56px; border-radius: 50%; background: rgba(59, 130, 246, 0.9); border: none; \
     cursor: pointer; font-size: 24px; z-index: 2147483646; \
     box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15); transition: all 0.3s ease; display: flex; \
     align-items: center; justify-content: center;";

pub struct Affordance {
    button: HtmlElement,
    _on_enter: Closure<dyn FnMut(Event)>,
    _on_leave: Closure<dyn FnMut(Event)>,
}

impl Affordance {
    /// Create the button and attach it to `document.body`.
    pub fn create(document: &Document, element_id: &str) -> Result<Self, OverlayError> {
        let body = document.body().ok_or(OverlayError::DocumentUnavailable)?;
        let button = document
            .create_element("button")
            .map_err(OverlayError::dom)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| OverlayError::Dom("button is not an HtmlElement".to_string()))?;
        button.set_id(element_id);
        button.set_inner_text(AFFORDANCE_GLYPH);
        button.style().set_css_text(AFFORDANCE_STYLE);

        let on_enter = scale_listener(&button, "scale(1.1)");
        let on_leave = scale_listener(&button, "scale(1)");
        button
            .add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())
            .map_err(OverlayError::dom)?;
        button
            .add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())
            .map_err(OverlayError::dom)?;

        body.append_child(&button).map_err(OverlayError::dom)?;

        Ok(Self {
            button,
            _on_enter: on_enter,
            _on_leave: on_leave,
        })
    }

    pub fn show(&self) {
        let _ = self.button.style().set_property("display", "flex");
    }

    pub fn hide(&self) {
        let _ = self.button.style().set_property("display", "none");
    }

    pub fn set_visible(&self, visible: bool) {
        if visible {
            self.show();
        } else {
            self.hide();
        }
    }

    /// Register the click handler. Lives for the rest of the page.
    pub fn on_click(&self, mut handler: impl FnMut(ActivationPosition) + 'static) {
        let button = self.button.clone();
        let closure = Closure::wrap(Box::new(move |_e: MouseEvent| {
            handler(center_of(&button));
        }) as Box<dyn FnMut(MouseEvent)>);

        let _ = self
            .button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Centre of the element in viewport coordinates.
fn center_of(element: &HtmlElement) -> ActivationPosition {
    let rect = element.get_bounding_client_rect();
    ActivationPosition {
        x: rect.left() + rect.width() / 2.0,
        y: rect.top() + rect.height() / 2.0,
    }
}

fn scale_listener(button: &HtmlElement, transform: &'static str) -> Closure<dyn FnMut(Event)> {
    let button = button.clone();
    Closure::wrap(Box::new(move |_e: Event| {
        let _ = button.style().set_property("transform", transform);
    }) as Box<dyn FnMut(Event)>)
}
