//! A content grid whose cards reveal as they scroll into view.

use std::fmt;

use super::reveal::render_revealed;
use super::{PatchQueue, RevealController};
use crate::browser::observer::{IntersectionBatch, ObserverOptions};
use crate::browser::Host;
use crate::dom::node::NodeId;
use crate::reactive::{dispose_effect, EffectId};

/// The four card grids of the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKind {
    Features,
    Categories,
    Blog,
    Products,
}

impl GridKind {
    /// Element id of the grid's section, if it is a navigation target.
    pub fn anchor(self) -> Option<&'static str> {
        match self {
            GridKind::Features => None,
            GridKind::Categories => Some("categories"),
            GridKind::Blog => Some("blog"),
            GridKind::Products => Some("products"),
        }
    }

    /// Every grid, in page order.
    pub const ALL: [GridKind; 4] = [
        GridKind::Features,
        GridKind::Categories,
        GridKind::Blog,
        GridKind::Products,
    ];
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GridKind::Features => "features",
            GridKind::Categories => "categories",
            GridKind::Blog => "blog",
            GridKind::Products => "products",
        })
    }
}

/// One mounted grid: its cards, their reveal state and the effect that
/// reflects it onto the cards.
#[derive(Debug)]
pub struct SectionGrid {
    kind: GridKind,
    cards: Vec<NodeId>,
    reveal: RevealController,
    render: Option<EffectId>,
}

impl SectionGrid {
    /// Start observing `cards` and render their reveal state.
    pub fn mount(
        host: &mut Host,
        kind: GridKind,
        cards: Vec<NodeId>,
        options: ObserverOptions,
        patches: &PatchQueue,
    ) -> Self {
        let mut reveal = RevealController::new(&mut host.observers, options);
        for &card in &cards {
            reveal.register(&mut host.observers, card);
        }

        let render = render_revealed(&reveal, cards.clone(), patches);

        tracing::debug!(grid = %kind, cards = cards.len(), "grid mounted");
        Self {
            kind,
            cards,
            reveal,
            render: Some(render),
        }
    }

    pub fn kind(&self) -> GridKind {
        self.kind
    }

    /// Card nodes in display order.
    pub fn cards(&self) -> &[NodeId] {
        &self.cards
    }

    /// The grid's reveal state.
    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    /// Route an intersection delivery to this grid.
    pub fn handle_batch(&self, batch: &IntersectionBatch) -> usize {
        let added = self.reveal.handle_batch(batch);
        if added > 0 {
            tracing::debug!(
                grid = %self.kind,
                added,
                total = self.reveal.visible_count(),
                "cards revealed"
            );
        }
        added
    }

    /// Release the observer and stop rendering. Safe to call more than once.
    pub fn teardown(&mut self, host: &mut Host) {
        if let Some(render) = self.render.take() {
            dispose_effect(render);
        }
        self.reveal.teardown(&mut host.observers);
    }
}
