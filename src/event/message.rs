//! Message trait and envelope.
//!
//! The [`Message`] trait is object-safe and supports downcasting via `Any`.
//! Timers, key listeners and intersection observers all deliver their
//! callbacks as boxed messages wrapped in an [`Envelope`], so every
//! asynchronous callback runs on a later pass of the site's message loop.

use std::any::Any;

use crate::dom::node::NodeId;

// ---------------------------------------------------------------------------
// Message trait
// ---------------------------------------------------------------------------

/// Object-safe message trait.
pub trait Message: Send + 'static {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Human-readable name for this message type.
    fn message_name(&self) -> &str;
}

/// Implement [`Message`] for one or more types, using the type name as the
/// message name.
#[macro_export]
macro_rules! impl_message {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::event::message::Message for $ty {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }
                fn message_name(&self) -> &str {
                    stringify!($ty)
                }
            }
        )+
    };
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Wraps a boxed message with routing metadata.
pub struct Envelope {
    /// The message payload.
    pub message: Box<dyn Message>,
    /// The node the message concerns, if any.
    pub target: Option<NodeId>,
    /// Whether this message has been handled.
    pub handled: bool,
}

impl Envelope {
    /// Wrap a message with no target node.
    pub fn new(message: impl Message) -> Self {
        Self::from_boxed(Box::new(message))
    }

    /// Wrap an already boxed message.
    pub fn from_boxed(message: Box<dyn Message>) -> Self {
        Self {
            message,
            target: None,
            handled: false,
        }
    }

    /// Wrap a message aimed at a specific node.
    pub fn targeted(message: impl Message, target: NodeId) -> Self {
        Self {
            target: Some(target),
            ..Self::new(message)
        }
    }

    /// Attempt to downcast the message to a concrete type.
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.message.as_any().downcast_ref::<T>()
    }

    /// Whether the payload is of type `T`.
    pub fn is<T: Message>(&self) -> bool {
        self.message.as_any().is::<T>()
    }

    /// Mark this envelope as handled.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("message_name", &self.message.message_name())
            .field("target", &self.target)
            .field("handled", &self.handled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[derive(Debug, PartialEq)]
    struct Ping(u32);
    struct Pong;
    crate::impl_message!(Ping, Pong);

    #[test]
    fn macro_names_messages() {
        assert_eq!(Ping(1).message_name(), "Ping");
        assert_eq!(Pong.message_name(), "Pong");
    }

    #[test]
    fn downcast_to_concrete() {
        let env = Envelope::new(Ping(7));
        assert_eq!(env.downcast_ref::<Ping>(), Some(&Ping(7)));
        assert!(env.downcast_ref::<Pong>().is_none());
        assert!(env.is::<Ping>());
    }

    #[test]
    fn targeted_envelope() {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        let node = nodes.insert(());
        let mut env = Envelope::targeted(Pong, node);
        assert_eq!(env.target, Some(node));
        assert!(!env.handled);
        env.mark_handled();
        assert!(env.handled);
    }

    #[test]
    fn debug_shows_name() {
        let env = Envelope::from_boxed(Box::new(Pong));
        assert!(format!("{env:?}").contains("\"Pong\""));
    }
}
