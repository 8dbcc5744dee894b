//! Page-side wiring: guard, affordance, lifecycle, teardown timer.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use dioxus_logger::tracing::{debug, error, info, warn};
use gloo_timers::future::TimeoutFuture;
use shared_types::{OverlayConfig, SessionId};

use crate::affordance::Affordance;
use crate::boundary::WebOverlayHost;
use crate::config::should_inject;
use crate::error::OverlayError;
use crate::interop::{document, on_dom_ready, page_url, viewport_width};
use crate::lifecycle::{OverlayBridge, OverlayLifecycle};

type SharedLifecycle = Rc<RefCell<OverlayLifecycle<WebOverlayHost>>>;

thread_local! {
    // Listeners hold weak references; this slot keeps the lifecycle alive.
    static OVERLAY: RefCell<Option<SharedLifecycle>> = const { RefCell::new(None) };
}

/// Install the overlay once the DOM is ready. Errors are logged, never thrown.
pub fn start(config: OverlayConfig) {
    let result = on_dom_ready(move || {
        if let Err(e) = init_floating_chat(config) {
            error!("Floating chat failed to initialize: {}", e);
        }
    });
    if let Err(e) = result {
        error!("Floating chat could not wait for DOM ready: {}", e);
    }
}

/// Returns `Ok(false)` when the page is on the denylist or already set up.
pub fn init_floating_chat(config: OverlayConfig) -> Result<bool, OverlayError> {
    if OVERLAY.with(|slot| slot.borrow().is_some()) {
        debug!("Floating chat already initialized");
        return Ok(false);
    }

    let url = page_url().unwrap_or_default();
    if !should_inject(&url, &config) {
        info!("Floating chat skipped on {}", url);
        return Ok(false);
    }

    let document = document()?;
    let affordance = Affordance::create(&document, &config.affordance_element_id)?;
    debug!("Activation affordance attached");

    let host = WebOverlayHost::new(document, config.clone(), affordance);
    let lifecycle: SharedLifecycle = Rc::new(RefCell::new(OverlayLifecycle::new(host, config)));

    let weak = Rc::downgrade(&lifecycle);
    lifecycle
        .borrow_mut()
        .host_mut()
        .set_bridge(OverlayBridge::new(move |session| {
            schedule_close(&weak, session);
        }));

    let weak = Rc::downgrade(&lifecycle);
    lifecycle
        .borrow()
        .host()
        .affordance()
        .on_click(move |position| {
            let Some(lifecycle) = weak.upgrade() else {
                return;
            };
            // Borrow fails only if a lifecycle call is already on the stack.
            let Ok(mut overlay) = lifecycle.try_borrow_mut() else {
                warn!("Activation raced an in-flight overlay transition");
                return;
            };
            if let Err(e) = overlay.activate(position, viewport_width()) {
                warn!("Activation failed: {}", e);
            }
        });

    OVERLAY.with(|slot| *slot.borrow_mut() = Some(lifecycle));
    Ok(true)
}

fn schedule_close(lifecycle: &Weak<RefCell<OverlayLifecycle<WebOverlayHost>>>, session: SessionId) {
    let Some(strong) = lifecycle.upgrade() else {
        return;
    };
    let Some(ticket) = strong.borrow_mut().request_close(session) else {
        debug!("Ignoring close request for {}", session);
        return;
    };

    let lifecycle = lifecycle.clone();
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(ticket.after_ms).await;
        if let Some(strong) = lifecycle.upgrade() {
            strong.borrow_mut().complete_close(ticket.session);
        }
    });
}
