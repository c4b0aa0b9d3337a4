//! Modal lifecycle: scroll lock, Escape listener and deferred focus.
//!
//! While open, a [`ModalController`] holds exactly one scroll lock token and
//! one Escape listener. Every way of closing, including teardown, gives both
//! back, so repeated open/close cycles never stack locks or listeners.

use std::time::Duration;

use crate::browser::{Host, ListenerId, MessageFactory, ScrollLockToken, TimerId};
use crate::dom::node::NodeId;
use crate::event::input::Key;
use crate::reactive::{create_signal, ReadSignal, WriteSignal};

/// Posted by the Escape listener of an open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissModal;

/// Posted once the modal content has mounted, to move focus into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalFocus;

crate::impl_message!(DismissModal, ModalFocus);

fn dismiss_message() -> Box<dyn crate::event::message::Message> {
    Box::new(DismissModal)
}

/// Open/close state plus the resources an open modal holds.
#[derive(Debug)]
pub struct ModalController {
    open: ReadSignal<bool>,
    set_open: WriteSignal<bool>,
    lock: Option<ScrollLockToken>,
    escape: Option<ListenerId>,
    focus_timer: Option<TimerId>,
    focus_target: Option<NodeId>,
    dismiss: MessageFactory,
}

impl ModalController {
    /// A closed modal whose Escape key posts [`DismissModal`].
    pub fn new() -> Self {
        Self::with_dismiss(dismiss_message)
    }

    /// A closed modal whose Escape key posts the message built by `dismiss`.
    pub fn with_dismiss(dismiss: MessageFactory) -> Self {
        let (open, set_open) = create_signal(false);
        Self {
            open,
            set_open,
            lock: None,
            escape: None,
            focus_timer: None,
            focus_target: None,
            dismiss,
        }
    }

    /// Open the modal and schedule focus on `focus_target` for the next
    /// pass. Returns `false` if it was already open.
    pub fn open(&mut self, host: &mut Host, focus_target: NodeId) -> bool {
        if self.lock.is_some() {
            return false;
        }
        self.lock = Some(host.scroll_lock.acquire());
        self.escape = Some(host.keys.add(Key::Escape, self.dismiss));
        self.focus_target = Some(focus_target);
        self.focus_timer = Some(host.timers.set_timeout(Duration::ZERO, ModalFocus));
        self.set_open.set(true);
        tracing::debug!("modal opened");
        true
    }

    /// Close the modal and give back everything it holds. Returns `false`
    /// if it was already closed.
    pub fn close(&mut self, host: &mut Host) -> bool {
        let Some(token) = self.lock.take() else {
            return false;
        };
        host.scroll_lock.release(token);
        if let Some(listener) = self.escape.take() {
            host.keys.remove(listener);
        }
        if let Some(timer) = self.focus_timer.take() {
            host.timers.clear_timeout(timer);
        }
        self.focus_target = None;
        self.set_open.set(false);
        tracing::debug!("modal closed");
        true
    }

    /// Move focus into the modal once its content exists.
    pub fn on_focus_timer(&mut self, host: &mut Host) -> bool {
        self.focus_timer = None;
        match self.focus_target {
            Some(target) if self.is_open() => host.focus(target),
            _ => false,
        }
    }

    /// Change where focus goes, e.g. back to a field after failed validation.
    pub fn refocus(&mut self, host: &mut Host, target: NodeId) -> bool {
        self.focus_target = Some(target);
        self.is_open() && host.focus(target)
    }

    pub fn is_open(&self) -> bool {
        self.open.get_untracked()
    }

    /// The open state as a signal.
    pub fn open_signal(&self) -> ReadSignal<bool> {
        self.open.clone()
    }

    /// Release everything on unmount.
    pub fn teardown(&mut self, host: &mut Host) {
        self.close(host);
    }
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}
