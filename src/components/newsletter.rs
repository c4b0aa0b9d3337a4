//! The newsletter sign-up dialog.
//!
//! Content is mounted into the modal root when the dialog opens and removed
//! when it closes. The typed address survives closing, like form state kept
//! by the header that owns the dialog.

use super::modal::ModalController;
use crate::browser::Host;
use crate::css::scalar::Scalar;
use crate::dom::node::{NodeData, NodeId};
use crate::event::action::UiAction;
use crate::layout::style::BoxStyle;

const INVALID_EMAIL: &str = "Bitte gib eine gültige E-Mail-Adresse ein 🙂";
const SUBSCRIBED: &str = "Danke! 🎉 Du bist (demo) für den Newsletter eingetragen.";

/// Why an address was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("email address is empty")]
    Empty,
    #[error("email address has no `@`")]
    MissingAt,
}

/// Why a dialog submission did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("newsletter dialog is not open")]
    NotOpen,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Trim `raw` and check it looks like an address.
pub fn validate_email(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !trimmed.contains('@') {
        return Err(ValidationError::MissingAt);
    }
    Ok(trimmed)
}

/// Nodes of the mounted dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogNodes {
    pub backdrop: NodeId,
    pub panel: NodeId,
    pub input: NodeId,
    pub submit: NodeId,
    pub close_button: NodeId,
    pub dismiss_button: NodeId,
}

/// Newsletter modal.
#[derive(Debug)]
pub struct NewsletterDialog {
    modal: ModalController,
    root: NodeId,
    content: Option<DialogNodes>,
    draft: String,
}

impl NewsletterDialog {
    /// A closed dialog that mounts into `root`.
    pub fn new(root: NodeId) -> Self {
        Self {
            modal: ModalController::new(),
            root,
            content: None,
            draft: String::new(),
        }
    }

    /// Mount the content and open the modal. Returns `false` if already open.
    pub fn open(&mut self, host: &mut Host) -> bool {
        if self.modal.is_open() {
            return false;
        }
        let nodes = self.mount(host);
        self.content = Some(nodes);
        self.modal.open(host, nodes.input)
    }

    /// Close the modal and unmount the content. Returns `false` if already closed.
    pub fn close(&mut self, host: &mut Host) -> bool {
        if !self.modal.close(host) {
            return false;
        }
        if let Some(nodes) = self.content.take() {
            self.draft = host.value(nodes.input).to_owned();
            host.dom.remove(nodes.backdrop);
        }
        true
    }

    /// Submit the form.
    ///
    /// An invalid address shows a hint and puts focus back on the field; the
    /// dialog stays open with the input untouched. A valid one is
    /// acknowledged, the input cleared and the dialog closed. A closed
    /// dialog has no form and reports [`SubmitError::NotOpen`].
    pub fn submit(&mut self, host: &mut Host) -> Result<(), SubmitError> {
        let Some(nodes) = self.content else {
            return Err(SubmitError::NotOpen);
        };
        let raw = host.value(nodes.input).to_owned();
        if let Err(err) = validate_email(&raw) {
            tracing::warn!(%err, "newsletter address rejected");
            host.alert(INVALID_EMAIL);
            self.modal.refocus(host, nodes.input);
            return Err(err.into());
        }
        tracing::info!("newsletter sign-up acknowledged");
        host.alert(SUBSCRIBED);
        host.set_value(nodes.input, "");
        self.close(host);
        Ok(())
    }

    /// Deferred focus after opening.
    pub fn on_focus_timer(&mut self, host: &mut Host) -> bool {
        self.modal.on_focus_timer(host)
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    /// Nodes of the open dialog.
    pub fn nodes(&self) -> Option<DialogNodes> {
        self.content
    }

    /// The address typed so far, whether or not the dialog is open.
    pub fn draft<'a>(&'a self, host: &'a Host) -> &'a str {
        match self.content {
            Some(nodes) => host.value(nodes.input),
            None => &self.draft,
        }
    }

    /// The underlying modal.
    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    /// Close on unmount.
    pub fn teardown(&mut self, host: &mut Host) {
        self.close(host);
    }

    fn mount(&self, host: &mut Host) -> DialogNodes {
        let dom = &mut host.dom;
        let backdrop = dom.insert_child(
            self.root,
            NodeData::new("div")
                .with_class("modal-backdrop")
                .with_action(UiAction::CloseNewsletter)
                .with_style(BoxStyle::column().fixed().with_width(Scalar::percent(100.0))),
        );
        let panel = dom.insert_child(
            backdrop,
            NodeData::new("div")
                .with_attr("role", "dialog")
                .with_attr("aria-modal", "true")
                .with_action(UiAction::Inert)
                .with_style(BoxStyle::column().with_height(Scalar::px(420.0))),
        );
        dom.insert_child(panel, NodeData::new("h3").with_text("Newsletter abonnieren"));
        let close_button = dom.insert_child(
            panel,
            NodeData::new("button")
                .with_attr("aria-label", "Schließen")
                .with_action(UiAction::CloseNewsletter)
                .focusable(true),
        );
        let form = dom.insert_child(panel, NodeData::new("form"));
        dom.insert_child(form, NodeData::new("label").with_text("E-Mail Adresse"));
        let input = dom.insert_child(
            form,
            NodeData::new("input")
                .with_attr("type", "email")
                .with_attr("placeholder", "deinname@email.de")
                .with_value(self.draft.clone()),
        );
        let submit = dom.insert_child(
            form,
            NodeData::new("button")
                .with_text("Anmelden")
                .with_action(UiAction::SubmitNewsletter)
                .focusable(true),
        );
        let dismiss_button = dom.insert_child(
            panel,
            NodeData::new("button")
                .with_text("Jetzt nicht")
                .with_action(UiAction::CloseNewsletter)
                .focusable(true),
        );
        DialogNodes {
            backdrop,
            panel,
            input,
            submit,
            close_button,
            dismiss_button,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::router::Location;

    fn setup() -> (Host, NewsletterDialog) {
        let mut host = Host::new(Size::new(1280, 800), Location::home(None));
        let body = host.dom.insert(NodeData::new("body"));
        let root = host.dom.insert_child(body, NodeData::new("div").with_id("modal-root"));
        (host, NewsletterDialog::new(root))
    }

    #[test]
    fn validate_email_rules() {
        assert_eq!(validate_email("  user@example.com "), Ok("user@example.com"));
        assert_eq!(validate_email("   "), Err(ValidationError::Empty));
        assert_eq!(validate_email("not-an-email"), Err(ValidationError::MissingAt));
    }

    #[test]
    fn open_mounts_content_and_close_unmounts() {
        let (mut host, mut dialog) = setup();
        let before = host.dom.len();
        assert!(dialog.open(&mut host));
        assert!(!dialog.open(&mut host));
        let nodes = dialog.nodes().unwrap();
        assert!(host.dom.is_connected(nodes.input));
        assert!(dialog.close(&mut host));
        assert!(!dialog.close(&mut host));
        assert_eq!(host.dom.len(), before);
        assert!(!host.scroll_lock.is_locked());
    }

    #[test]
    fn invalid_submit_keeps_dialog_and_input() {
        let (mut host, mut dialog) = setup();
        dialog.open(&mut host);
        let input = dialog.nodes().unwrap().input;
        host.set_value(input, "not-an-email");
        assert_eq!(
            dialog.submit(&mut host),
            Err(SubmitError::Invalid(ValidationError::MissingAt))
        );
        assert!(dialog.is_open());
        assert_eq!(host.value(input), "not-an-email");
        assert_eq!(host.focused(), Some(input));
        assert_eq!(host.alerts(), &[INVALID_EMAIL.to_owned()]);
    }

    #[test]
    fn valid_submit_clears_and_closes() {
        let (mut host, mut dialog) = setup();
        dialog.open(&mut host);
        let input = dialog.nodes().unwrap().input;
        host.set_value(input, "user@example.com");
        assert_eq!(dialog.submit(&mut host), Ok(()));
        assert!(!dialog.is_open());
        assert_eq!(dialog.draft(&host), "");
        assert_eq!(host.alerts(), &[SUBSCRIBED.to_owned()]);
        assert_eq!(host.scroll_lock.acquisitions(), host.scroll_lock.releases());
    }

    #[test]
    fn submit_without_open_dialog_is_not_a_sign_up() {
        let (mut host, mut dialog) = setup();
        let before = host.dom.len();
        assert_eq!(dialog.submit(&mut host), Err(SubmitError::NotOpen));
        assert!(host.alerts().is_empty());
        assert!(!dialog.is_open());
        assert_eq!(host.dom.len(), before);

        dialog.open(&mut host);
        host.set_value(dialog.nodes().unwrap().input, "user@example.com");
        assert_eq!(dialog.submit(&mut host), Ok(()));
        assert_eq!(dialog.submit(&mut host), Err(SubmitError::NotOpen));
        assert_eq!(host.alerts(), &[SUBSCRIBED.to_owned()]);
    }

    #[test]
    fn draft_survives_reopening() {
        let (mut host, mut dialog) = setup();
        dialog.open(&mut host);
        host.set_value(dialog.nodes().unwrap().input, "halb@");
        dialog.close(&mut host);
        assert_eq!(dialog.draft(&host), "halb@");
        dialog.open(&mut host);
        assert_eq!(host.value(dialog.nodes().unwrap().input), "halb@");
    }
}
