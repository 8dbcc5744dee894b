//! Overlay lifecycle: singleton mount, entry direction, delayed teardown.
//!
//! `OverlayLifecycle` owns the only `OverlaySession` and is the only thing
//! that creates or destroys the isolation boundary. Rendering is reached
//! through the `OverlayHost` capability so the state machine runs the same
//! against the browser and against test doubles.

use std::rc::Rc;

use dioxus_logger::tracing::{debug, error, info};
use shared_types::{ActivationPosition, OverlayConfig, SessionId, SlideDirection};

use crate::error::OverlayError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayPhase {
    Absent,
    Opening,
    Open,
    Closing,
}

/// Everything the chat view needs at mount time.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewProps {
    pub session: SessionId,
    pub direction: SlideDirection,
    pub config: OverlayConfig,
}

/// Rendering capabilities the lifecycle drives.
pub trait OverlayHost {
    type Boundary;

    fn create_boundary(&mut self) -> Result<Self::Boundary, OverlayError>;
    fn attach_view(&mut self, boundary: &mut Self::Boundary, view: ViewProps)
        -> Result<(), OverlayError>;
    fn detach_view(&mut self, boundary: &mut Self::Boundary);
    fn destroy_boundary(&mut self, boundary: Self::Boundary);
    fn set_affordance_visible(&mut self, visible: bool);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Opened {
        session: SessionId,
        direction: SlideDirection,
    },
    /// A session already exists, or the overlay is inert.
    Ignored,
}

/// Teardown to run once the exit transition has had `after_ms` to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseTicket {
    pub session: SessionId,
    pub after_ms: u32,
}

struct OverlaySession<B> {
    id: SessionId,
    boundary: B,
    direction: SlideDirection,
    view_open: bool,
}

pub struct OverlayLifecycle<H: OverlayHost> {
    host: H,
    config: OverlayConfig,
    phase: OverlayPhase,
    session: Option<OverlaySession<H::Boundary>>,
    next_session: u64,
    inert: bool,
}

impl<H: OverlayHost> OverlayLifecycle<H> {
    pub fn new(host: H, config: OverlayConfig) -> Self {
        Self {
            host,
            config,
            phase: OverlayPhase::Absent,
            session: None,
            next_session: 1,
            inert: false,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Set after isolation failed; every later activation is ignored.
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn direction(&self) -> Option<SlideDirection> {
        self.session.as_ref().map(|s| s.direction)
    }

    pub fn view_open(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.view_open)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Handle an affordance click.
    pub fn activate(
        &mut self,
        position: ActivationPosition,
        viewport_width: f64,
    ) -> Result<Activation, OverlayError> {
        if self.inert || self.session.is_some() {
            debug!("Ignoring activation in phase {:?}", self.phase);
            return Ok(Activation::Ignored);
        }

        let mut boundary = match self.host.create_boundary() {
            Ok(boundary) => boundary,
            Err(e) => {
                self.inert = true;
                error!("Overlay disabled for this page: {}", e);
                return Err(e);
            }
        };

        let id = SessionId(self.next_session);
        self.next_session += 1;
        let direction = SlideDirection::from_position(position, viewport_width);
        self.phase = OverlayPhase::Opening;

        let view = ViewProps {
            session: id,
            direction,
            config: self.config.clone(),
        };
        if let Err(e) = self.host.attach_view(&mut boundary, view) {
            self.host.destroy_boundary(boundary);
            self.phase = OverlayPhase::Absent;
            error!("Failed to mount chat view: {}", e);
            return Err(e);
        }
        self.host.set_affordance_visible(false);

        self.session = Some(OverlaySession {
            id,
            boundary,
            direction,
            view_open: true,
        });
        self.phase = OverlayPhase::Open;
        info!("Opened overlay {} ({})", id, direction.css_class());

        Ok(Activation::Opened {
            session: id,
            direction,
        })
    }

    /// Start the exit transition. The boundary stays mounted until
    /// `complete_close` is called with the returned ticket's session.
    pub fn request_close(&mut self, session: SessionId) -> Option<CloseTicket> {
        if !matches!(self.phase, OverlayPhase::Opening | OverlayPhase::Open) {
            return None;
        }
        let current = self.session.as_mut().filter(|s| s.id == session)?;
        current.view_open = false;
        self.phase = OverlayPhase::Closing;

        Some(CloseTicket {
            session,
            after_ms: self.config.close_transition_ms,
        })
    }

    /// Unmount the view, drop the boundary and bring the affordance back.
    pub fn complete_close(&mut self, session: SessionId) -> bool {
        if self.phase != OverlayPhase::Closing || self.active_session() != Some(session) {
            return false;
        }
        let Some(mut current) = self.session.take() else {
            return false;
        };

        self.host.detach_view(&mut current.boundary);
        self.host.destroy_boundary(current.boundary);
        self.host.set_affordance_visible(true);
        self.phase = OverlayPhase::Absent;
        info!("Closed overlay {}", session);
        true
    }
}

/// Handle the mounted view uses to ask for its own teardown.
#[derive(Clone)]
pub struct OverlayBridge {
    on_close: Rc<dyn Fn(SessionId)>,
}

impl OverlayBridge {
    pub fn new(on_close: impl Fn(SessionId) + 'static) -> Self {
        Self {
            on_close: Rc::new(on_close),
        }
    }

    pub fn request_close(&self, session: SessionId) {
        (self.on_close)(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingHost {
        live_boundaries: usize,
        mounted: usize,
        affordance_visible: bool,
        fail_isolation: bool,
        fail_mount: bool,
    }

    impl OverlayHost for CountingHost {
        type Boundary = ();

        fn create_boundary(&mut self) -> Result<(), OverlayError> {
            if self.fail_isolation {
                return Err(OverlayError::IsolationUnavailable("no shadow".into()));
            }
            self.live_boundaries += 1;
            Ok(())
        }

        fn attach_view(&mut self, _: &mut (), _: ViewProps) -> Result<(), OverlayError> {
            if self.fail_mount {
                return Err(OverlayError::ViewMount("boom".into()));
            }
            self.mounted += 1;
            Ok(())
        }

        fn detach_view(&mut self, _: &mut ()) {
            self.mounted -= 1;
        }

        fn destroy_boundary(&mut self, _: ()) {
            self.live_boundaries -= 1;
        }

        fn set_affordance_visible(&mut self, visible: bool) {
            self.affordance_visible = visible;
        }
    }

    fn lifecycle() -> OverlayLifecycle<CountingHost> {
        let host = CountingHost {
            affordance_visible: true,
            ..Default::default()
        };
        OverlayLifecycle::new(host, OverlayConfig::default())
    }

    const RIGHT: ActivationPosition = ActivationPosition { x: 900.0, y: 700.0 };

    #[test]
    fn second_click_is_ignored() {
        let mut overlay = lifecycle();
        let first = overlay.activate(RIGHT, 1000.0).unwrap();
        assert!(matches!(first, Activation::Opened { .. }));
        assert_eq!(overlay.activate(RIGHT, 1000.0).unwrap(), Activation::Ignored);
        assert_eq!(overlay.host().live_boundaries, 1);
        assert_eq!(overlay.host().mounted, 1);
    }

    #[test]
    fn stale_close_requests_are_ignored() {
        let mut overlay = lifecycle();
        overlay.activate(RIGHT, 1000.0).unwrap();
        let session = overlay.active_session().unwrap();

        assert!(overlay.request_close(SessionId(session.0 + 1)).is_none());
        assert!(!overlay.complete_close(session));

        let ticket = overlay.request_close(session).unwrap();
        assert_eq!(ticket.after_ms, 300);
        assert!(overlay.request_close(session).is_none());
        assert!(overlay.complete_close(session));
        assert!(!overlay.complete_close(session));
    }

    #[test]
    fn isolation_failure_leaves_inert_affordance() {
        let mut overlay = lifecycle();
        overlay.host_mut().fail_isolation = true;

        let err = overlay.activate(RIGHT, 1000.0).unwrap_err();
        assert!(matches!(err, OverlayError::IsolationUnavailable(_)));
        assert!(overlay.is_inert());
        assert!(overlay.host().affordance_visible);

        overlay.host_mut().fail_isolation = false;
        assert_eq!(overlay.activate(RIGHT, 1000.0).unwrap(), Activation::Ignored);
        assert_eq!(overlay.host().live_boundaries, 0);
    }

    #[test]
    fn mount_failure_releases_boundary() {
        let mut overlay = lifecycle();
        overlay.host_mut().fail_mount = true;

        assert!(overlay.activate(RIGHT, 1000.0).is_err());
        assert_eq!(overlay.phase(), OverlayPhase::Absent);
        assert_eq!(overlay.host().live_boundaries, 0);
        assert!(!overlay.is_inert());
    }

    #[test]
    fn sessions_get_fresh_ids() {
        let mut overlay = lifecycle();
        overlay.activate(RIGHT, 1000.0).unwrap();
        let first = overlay.active_session().unwrap();
        overlay.request_close(first).unwrap();
        overlay.complete_close(first);

        overlay.activate(RIGHT, 1000.0).unwrap();
        assert_ne!(overlay.active_session(), Some(first));
    }

    #[test]
    fn bridge_forwards_session() {
        let seen = Rc::new(Cell::new(None));
        let sink = seen.clone();
        let bridge = OverlayBridge::new(move |session| sink.set(Some(session)));
        bridge.clone().request_close(SessionId(4));
        assert_eq!(seen.get(), Some(SessionId(4)));
    }
}
