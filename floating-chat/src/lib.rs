pub mod affordance;
pub mod backend;
pub mod boundary;
pub mod chat;
pub mod components;
pub mod config;
pub mod error;
pub mod interop;
pub mod lifecycle;
pub mod runtime;
pub mod tools;

pub use backend::*;
pub use chat::*;
pub use components::*;
pub use config::*;
pub use error::*;
pub use lifecycle::*;
pub use runtime::{init_floating_chat, start};
pub use tools::*;
