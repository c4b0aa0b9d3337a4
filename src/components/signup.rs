//! Stub sign-up forms: the newsletter section and the shop teaser.
//!
//! Neither talks to a backend. The newsletter section simulates a slow
//! request with a timer and disables its button meanwhile; the teaser
//! confirms immediately. Both panels reveal once when scrolled into view.

use std::time::Duration;

use super::reveal::render_revealed;
use super::{DomPatch, PatchQueue, RevealController};
use crate::browser::observer::{IntersectionBatch, ObserverOptions};
use crate::browser::{Host, TimerId};
use crate::dom::node::NodeId;
use crate::reactive::{
    create_effect, create_signal, dispose_effect, EffectId, ReadSignal, WriteSignal,
};

/// Posted when the simulated sign-up request completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupResolved;

crate::impl_message!(SignupResolved);

/// Progress of the newsletter section form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignupState {
    #[default]
    Idle,
    Loading,
    Done,
}

/// Nodes of the newsletter section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupNodes {
    /// The observed section.
    pub section: NodeId,
    /// The panel that gets the revealed class.
    pub panel: NodeId,
    pub form: NodeId,
    pub input: NodeId,
    pub button: NodeId,
    pub thanks: NodeId,
    pub privacy: NodeId,
}

// ---------------------------------------------------------------------------
// NewsletterSection
// ---------------------------------------------------------------------------

/// The newsletter panel near the bottom of the landing page.
#[derive(Debug)]
pub struct NewsletterSection {
    nodes: SignupNodes,
    state: ReadSignal<SignupState>,
    set_state: WriteSignal<SignupState>,
    reveal: RevealController,
    pending: Option<TimerId>,
    delay: Duration,
    effects: Vec<EffectId>,
}

impl NewsletterSection {
    pub fn mount(
        host: &mut Host,
        nodes: SignupNodes,
        options: ObserverOptions,
        delay: Duration,
        patches: &PatchQueue,
    ) -> Self {
        let mut reveal = RevealController::new(&mut host.observers, options);
        reveal.register(&mut host.observers, nodes.section);
        let (state, set_state) = create_signal(SignupState::Idle);

        let form_effect = {
            let state = state.clone();
            let patches = patches.clone();
            create_effect(move || {
                let state = state.get();
                let loading = state == SignupState::Loading;
                let done = state == SignupState::Done;
                patches.push(DomPatch::Disabled { node: nodes.button, disabled: loading });
                patches.push(DomPatch::Text {
                    node: nodes.button,
                    text: if loading { "…" } else { "Anmelden" }.to_owned(),
                });
                patches.push(DomPatch::Hidden { node: nodes.form, hidden: done });
                patches.push(DomPatch::Hidden { node: nodes.privacy, hidden: done });
                patches.push(DomPatch::Hidden { node: nodes.thanks, hidden: !done });
            })
        };
        let reveal_effect = render_revealed(&reveal, vec![nodes.panel], patches);

        Self {
            nodes,
            state,
            set_state,
            reveal,
            pending: None,
            delay,
            effects: vec![form_effect, reveal_effect],
        }
    }

    /// Submit the form. Ignored when the field is empty or a request is
    /// already running. Returns whether a request started.
    pub fn submit(&mut self, host: &mut Host) -> bool {
        if self.state() != SignupState::Idle || host.value(self.nodes.input).is_empty() {
            return false;
        }
        self.set_state.set(SignupState::Loading);
        self.pending = Some(host.timers.set_timeout(self.delay, SignupResolved));
        tracing::debug!(delay = ?self.delay, "newsletter section sign-up started");
        true
    }

    /// Finish the simulated request.
    pub fn on_resolved(&mut self) -> bool {
        self.pending = None;
        let finished = self.set_state.update_if(|state| {
            let loading = *state == SignupState::Loading;
            if loading {
                *state = SignupState::Done;
            }
            loading
        });
        if finished {
            tracing::info!("newsletter section sign-up done");
        }
        finished
    }

    pub fn state(&self) -> SignupState {
        self.state.get_untracked()
    }

    pub fn nodes(&self) -> SignupNodes {
        self.nodes
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn handle_batch(&self, batch: &IntersectionBatch) -> usize {
        self.reveal.handle_batch(batch)
    }

    /// Cancel the pending request and release the observer.
    pub fn teardown(&mut self, host: &mut Host) {
        if let Some(timer) = self.pending.take() {
            host.timers.clear_timeout(timer);
        }
        for effect in self.effects.drain(..) {
            dispose_effect(effect);
        }
        self.reveal.teardown(&mut host.observers);
    }
}

// ---------------------------------------------------------------------------
// ShopTeaser
// ---------------------------------------------------------------------------

/// Nodes of the shop teaser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeaserNodes {
    /// The observed section.
    pub section: NodeId,
    /// The panel that gets the revealed class.
    pub panel: NodeId,
    pub form: NodeId,
    pub input: NodeId,
    pub button: NodeId,
    pub confirmation: NodeId,
}

/// "Shop coming soon" panel with a notify-me form.
#[derive(Debug)]
pub struct ShopTeaser {
    nodes: TeaserNodes,
    submitted: ReadSignal<bool>,
    set_submitted: WriteSignal<bool>,
    reveal: RevealController,
    effects: Vec<EffectId>,
}

impl ShopTeaser {
    pub fn mount(
        host: &mut Host,
        nodes: TeaserNodes,
        options: ObserverOptions,
        patches: &PatchQueue,
    ) -> Self {
        let mut reveal = RevealController::new(&mut host.observers, options);
        reveal.register(&mut host.observers, nodes.section);
        let (submitted, set_submitted) = create_signal(false);

        let form_effect = {
            let submitted = submitted.clone();
            let patches = patches.clone();
            create_effect(move || {
                let done = submitted.get();
                patches.push(DomPatch::Hidden { node: nodes.form, hidden: done });
                patches.push(DomPatch::Hidden { node: nodes.confirmation, hidden: !done });
            })
        };
        let reveal_effect = render_revealed(&reveal, vec![nodes.panel], patches);

        Self {
            nodes,
            submitted,
            set_submitted,
            reveal,
            effects: vec![form_effect, reveal_effect],
        }
    }

    /// Submit the notify form. Any non-empty value is accepted.
    pub fn submit(&self, host: &Host) -> bool {
        if host.value(self.nodes.input).is_empty() {
            return false;
        }
        let changed = self.set_submitted.update_if(|done| !std::mem::replace(done, true));
        if changed {
            tracing::info!("shop notification requested");
        }
        changed
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.get_untracked()
    }

    pub fn nodes(&self) -> TeaserNodes {
        self.nodes
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn handle_batch(&self, batch: &IntersectionBatch) -> usize {
        self.reveal.handle_batch(batch)
    }

    pub fn teardown(&mut self, host: &mut Host) {
        for effect in self.effects.drain(..) {
            dispose_effect(effect);
        }
        self.reveal.teardown(&mut host.observers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::REVEALED;
    use crate::dom::node::NodeData;
    use crate::geometry::Size;
    use crate::router::Location;

    fn host() -> (Host, NodeId) {
        let mut host = Host::new(Size::new(1280, 800), Location::home(None));
        let body = host.dom.insert(NodeData::new("body"));
        (host, body)
    }

    fn signup(host: &mut Host, body: NodeId, patches: &PatchQueue) -> NewsletterSection {
        let section = host.dom.insert_child(body, NodeData::new("section"));
        let panel = host.dom.insert_child(section, NodeData::new("div"));
        let form = host.dom.insert_child(panel, NodeData::new("form"));
        let nodes = SignupNodes {
            section,
            panel,
            form,
            input: host.dom.insert_child(form, NodeData::new("input").with_value("")),
            button: host.dom.insert_child(form, NodeData::new("button")),
            thanks: host.dom.insert_child(panel, NodeData::new("div")),
            privacy: host.dom.insert_child(panel, NodeData::new("p")),
        };
        NewsletterSection::mount(
            host,
            nodes,
            ObserverOptions::new(0.3),
            Duration::from_millis(1500),
            patches,
        )
    }

    #[test]
    fn empty_submit_is_ignored() {
        let (mut host, body) = host();
        let patches = PatchQueue::new();
        let mut section = signup(&mut host, body, &patches);
        assert!(!section.submit(&mut host));
        assert_eq!(section.state(), SignupState::Idle);
        assert_eq!(host.timers.pending_count(), 0);
    }

    #[test]
    fn loading_disables_button_until_resolved() {
        let (mut host, body) = host();
        let patches = PatchQueue::new();
        let mut section = signup(&mut host, body, &patches);
        let nodes = section.nodes();
        host.set_value(nodes.input, "a@b.de");

        assert!(section.submit(&mut host));
        assert!(!section.submit(&mut host));
        assert_eq!(host.timers.pending_count(), 1);
        patches.commit(&mut host.dom);
        assert!(host.dom.get(nodes.button).unwrap().disabled);

        assert!(section.on_resolved());
        assert!(!section.on_resolved());
        patches.commit(&mut host.dom);
        assert_eq!(section.state(), SignupState::Done);
        assert!(host.dom.get(nodes.form).unwrap().style.hidden);
        assert!(!host.dom.get(nodes.thanks).unwrap().style.hidden);
        section.teardown(&mut host);
    }

    #[test]
    fn teardown_cancels_pending_request() {
        let (mut host, body) = host();
        let patches = PatchQueue::new();
        let mut section = signup(&mut host, body, &patches);
        host.set_value(section.nodes().input, "a@b.de");
        section.submit(&mut host);
        section.teardown(&mut host);
        assert_eq!(host.timers.pending_count(), 0);
        assert!(host.observers.is_empty());
    }

    #[test]
    fn section_is_observed_and_panel_revealed() {
        let (mut host, body) = host();
        let patches = PatchQueue::new();
        let section = signup(&mut host, body, &patches);
        let nodes = section.nodes();
        assert_eq!(section.reveal().index_of(nodes.section), Some(0));
        assert_eq!(section.reveal().index_of(nodes.panel), None);

        section.reveal().reveal(0);
        patches.commit(&mut host.dom);
        assert!(host.dom.get(nodes.panel).unwrap().has_class(REVEALED));
        assert!(!host.dom.get(nodes.section).unwrap().has_class(REVEALED));
    }

    #[test]
    fn teaser_confirms_non_empty_value_once() {
        let (mut host, body) = host();
        let patches = PatchQueue::new();
        let section = host.dom.insert_child(body, NodeData::new("section"));
        let panel = host.dom.insert_child(section, NodeData::new("div"));
        let nodes = TeaserNodes {
            section,
            panel,
            form: host.dom.insert_child(panel, NodeData::new("form")),
            input: host.dom.insert_child(panel, NodeData::new("input").with_value("")),
            button: host.dom.insert_child(panel, NodeData::new("button")),
            confirmation: host.dom.insert_child(panel, NodeData::new("div")),
        };
        let teaser = ShopTeaser::mount(&mut host, nodes, ObserverOptions::new(0.3), &patches);
        assert!(!teaser.submit(&host));
        host.set_value(nodes.input, "x");
        assert!(teaser.submit(&host));
        assert!(!teaser.submit(&host));
        patches.commit(&mut host.dom);
        assert!(teaser.is_submitted());
        assert!(host.dom.get(nodes.form).unwrap().style.hidden);
        assert!(!host.dom.get(nodes.confirmation).unwrap().style.hidden);
    }
}
