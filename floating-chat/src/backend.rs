//! Seam between the chat view and whatever answers user turns.

use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;

use crate::chat::{echo_reply, UserTurn};
use crate::error::BackendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantTurn {
    pub text: String,
}

#[async_trait(?Send)]
pub trait AssistantBackend {
    async fn send_user_turn(&self, turn: &UserTurn) -> Result<AssistantTurn, BackendError>;
}

/// Timer capability so replies can be delayed without tying the backend to
/// the browser event loop.
pub trait Sleeper {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

/// Browser timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooSleeper;

impl Sleeper for GlooSleeper {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        Box::pin(TimeoutFuture::new(ms))
    }
}

/// Local stand-in: waits `delay_ms` then echoes the user's text.
pub struct EchoBackend<S> {
    sleeper: S,
    delay_ms: u32,
}

impl<S: Sleeper> EchoBackend<S> {
    pub fn new(sleeper: S, delay_ms: u32) -> Self {
        Self { sleeper, delay_ms }
    }
}

#[async_trait(?Send)]
impl<S: Sleeper> AssistantBackend for EchoBackend<S> {
    async fn send_user_turn(&self, turn: &UserTurn) -> Result<AssistantTurn, BackendError> {
        self.sleeper.sleep(self.delay_ms).await;
        Ok(AssistantTurn {
            text: echo_reply(&turn.text),
        })
    }
}
