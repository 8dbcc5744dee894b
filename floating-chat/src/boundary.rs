//! Shadow-DOM isolation boundary and the browser `OverlayHost`.

use dioxus::dioxus_core::VirtualDom;
use futures_util::future::{abortable, AbortHandle};
use shared_types::OverlayConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlLinkElement, ShadowRootInit, ShadowRootMode};

use crate::affordance::Affordance;
use crate::components::{FloatingChat, FloatingChatProps};
use crate::error::OverlayError;
use crate::interop::extension_resource_url;
use crate::lifecycle::{OverlayBridge, OverlayHost, ViewProps};

/// Host element plus the mount point inside its shadow root.
pub struct ShadowBoundary {
    container: Element,
    mount_point: Element,
    view: Option<AbortHandle>,
}

pub struct WebOverlayHost {
    document: Document,
    config: OverlayConfig,
    affordance: Affordance,
    bridge: Option<OverlayBridge>,
}

impl WebOverlayHost {
    pub fn new(document: Document, config: OverlayConfig, affordance: Affordance) -> Self {
        Self {
            document,
            config,
            affordance,
            bridge: None,
        }
    }

    /// Route close requests from mounted views back to the lifecycle.
    pub fn set_bridge(&mut self, bridge: OverlayBridge) {
        self.bridge = Some(bridge);
    }

    pub fn affordance(&self) -> &Affordance {
        &self.affordance
    }

    fn build_boundary(&self, container: &Element) -> Result<Element, OverlayError> {
        let shadow = container
            .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
            .map_err(OverlayError::isolation)?;

        let link = self
            .document
            .create_element("link")
            .map_err(OverlayError::dom)?
            .dyn_into::<HtmlLinkElement>()
            .map_err(|_| OverlayError::Dom("link is not an HtmlLinkElement".to_string()))?;
        link.set_rel("stylesheet");
        link.set_href(&extension_resource_url(&self.config.stylesheet_path));
        shadow.append_child(&link).map_err(OverlayError::dom)?;

        let mount_point = self
            .document
            .create_element("div")
            .map_err(OverlayError::dom)?;
        shadow.append_child(&mount_point).map_err(OverlayError::dom)?;
        Ok(mount_point)
    }
}

impl OverlayHost for WebOverlayHost {
    type Boundary = ShadowBoundary;

    fn create_boundary(&mut self) -> Result<ShadowBoundary, OverlayError> {
        let body = self.document.body().ok_or(OverlayError::DocumentUnavailable)?;
        let container = self
            .document
            .create_element("div")
            .map_err(OverlayError::dom)?;
        container.set_id(&self.config.root_element_id);
        body.append_child(&container).map_err(OverlayError::dom)?;

        match self.build_boundary(&container) {
            Ok(mount_point) => Ok(ShadowBoundary {
                container,
                mount_point,
                view: None,
            }),
            Err(e) => {
                // Never leave an unisolated container behind.
                container.remove();
                Err(match e {
                    OverlayError::Dom(msg) => OverlayError::IsolationUnavailable(msg),
                    other => other,
                })
            }
        }
    }

    fn attach_view(
        &mut self,
        boundary: &mut ShadowBoundary,
        view: ViewProps,
    ) -> Result<(), OverlayError> {
        let bridge = self
            .bridge
            .clone()
            .ok_or_else(|| OverlayError::ViewMount("no lifecycle bridge".to_string()))?;

        let props = FloatingChatProps::builder().view(view).build();
        let vdom = VirtualDom::new_with_props(FloatingChat, props).with_root_context(bridge);
        let web_config = dioxus_web::Config::new().rootelement(boundary.mount_point.clone());

        // Dropping the virtual dom unmounts the view and cancels its tasks.
        let (app, handle) = abortable(dioxus_web::run(vdom, web_config));
        wasm_bindgen_futures::spawn_local(async move {
            let _ = app.await;
        });
        boundary.view = Some(handle);
        Ok(())
    }

    fn detach_view(&mut self, boundary: &mut ShadowBoundary) {
        if let Some(handle) = boundary.view.take() {
            handle.abort();
        }
    }

    fn destroy_boundary(&mut self, boundary: ShadowBoundary) {
        boundary.container.remove();
    }

    fn set_affordance_visible(&mut self, visible: bool) {
        self.affordance.set_visible(visible);
    }
}
