//! Site components: reveal tracking, content grids, navigation, modal and
//! the stub sign-up forms.
//!
//! Components keep their state in signals. Effects turn that state into
//! [`DomPatch`]es on a shared [`PatchQueue`], which the site commits to the
//! document once per processing pass, the way a renderer commits a frame.

pub mod modal;
pub mod navigation;
pub mod newsletter;
pub mod reveal;
pub mod section_grid;
pub mod signup;
pub mod toggles;

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

pub use modal::{DismissModal, ModalController, ModalFocus};
pub use navigation::{NavigationController, NavigationNodes, ScrollToAnchor};
pub use newsletter::{validate_email, NewsletterDialog, SubmitError, ValidationError};
pub use reveal::RevealController;
pub use section_grid::{GridKind, SectionGrid};
pub use signup::{NewsletterSection, ShopTeaser, SignupResolved, SignupState};
pub use toggles::ToggleSet;

/// Class that marks a card or panel as animated in.
pub const REVEALED: &str = "revealed";

// ---------------------------------------------------------------------------
// DomPatch
// ---------------------------------------------------------------------------

/// A single change an effect wants made to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomPatch {
    /// Add (`on`) or remove a class.
    Class {
        node: NodeId,
        class: &'static str,
        on: bool,
    },
    /// Enable or disable a control.
    Disabled { node: NodeId, disabled: bool },
    /// Take a node out of layout or put it back.
    Hidden { node: NodeId, hidden: bool },
    /// Replace the text content.
    Text { node: NodeId, text: String },
}

impl DomPatch {
    /// Apply to the document. Patches for removed nodes are dropped.
    pub fn apply(&self, dom: &mut Dom) -> bool {
        match self {
            DomPatch::Class { node, class, on } => {
                dom.get_mut(*node).map(|d| d.set_class(class, *on))
            }
            DomPatch::Disabled { node, disabled } => {
                dom.get_mut(*node).map(|d| d.disabled = *disabled)
            }
            DomPatch::Hidden { node, hidden } => {
                dom.get_mut(*node).map(|d| d.style.hidden = *hidden)
            }
            DomPatch::Text { node, text } => {
                dom.get_mut(*node).map(|d| d.text = Some(text.clone()))
            }
        }
        .is_some()
    }
}

// ---------------------------------------------------------------------------
// PatchQueue
// ---------------------------------------------------------------------------

/// Shared queue effects write into. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct PatchQueue {
    patches: Rc<RefCell<Vec<DomPatch>>>,
}

impl PatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a patch.
    pub fn push(&self, patch: DomPatch) {
        self.patches.borrow_mut().push(patch);
    }

    /// Number of queued patches.
    pub fn len(&self) -> usize {
        self.patches.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.borrow().is_empty()
    }

    /// Apply every queued patch in order and empty the queue.
    ///
    /// Returns how many patches reached a live node.
    pub fn commit(&self, dom: &mut Dom) -> usize {
        let patches = std::mem::take(&mut *self.patches.borrow_mut());
        let applied = patches.iter().filter(|p| p.apply(dom)).count();
        if !patches.is_empty() {
            tracing::trace!(queued = patches.len(), applied, "patches committed");
        }
        applied
    }
}
