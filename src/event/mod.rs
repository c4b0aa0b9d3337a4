//! Event system: input events, click actions, messages, and dispatch.

pub mod action;
pub mod handler;
pub mod input;
pub mod message;

pub use action::UiAction;
pub use handler::EventDispatcher;
pub use input::{InputEvent, Key, KeyEvent, Modifiers};
pub use message::{Envelope, Message};
