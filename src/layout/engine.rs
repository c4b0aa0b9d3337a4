//! TaffyTree wrapper for layout computation.
//!
//! [`LayoutEngine`] mirrors the DOM into a taffy tree, runs layout for the
//! current viewport width, and writes absolute page [`Region`]s back onto
//! the DOM nodes.

use taffy::prelude::{AvailableSpace, FromLength, TaffyTree};

use super::style::resolve_style;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::geometry::{Offset, Region, Size};

/// Errors from the layout pass.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout tree operation failed: {0}")]
    Taffy(#[from] taffy::TaffyError),
}

/// Wraps a [`TaffyTree`] whose node context is the DOM [`NodeId`].
pub struct LayoutEngine {
    tree: TaffyTree<NodeId>,
}

impl LayoutEngine {
    /// Create a new, empty layout engine.
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
        }
    }

    /// Lay out the whole document for a viewport and store each node's
    /// absolute region.
    ///
    /// The page is as tall as its content. Returns the document size.
    pub fn compute(&mut self, dom: &mut Dom, viewport: Size) -> Result<Size, LayoutError> {
        self.tree.clear();
        let Some(root) = dom.root() else {
            return Ok(Size::ZERO);
        };

        let taffy_root = self.build(dom, root)?;
        // The document element always spans the viewport.
        let mut root_style = self.tree.style(taffy_root)?.clone();
        root_style.size.width = taffy::prelude::Dimension::from_length(viewport.width as f32);
        self.tree.set_style(taffy_root, root_style)?;

        self.tree.compute_layout(
            taffy_root,
            taffy::geometry::Size {
                width: AvailableSpace::Definite(viewport.width as f32),
                height: AvailableSpace::MaxContent,
            },
        )?;

        self.write_back(dom, taffy_root, Offset::default())?;
        let page = dom.get(root).map(|d| d.region.size()).unwrap_or(Size::ZERO);
        Ok(page)
    }

    fn build(&mut self, dom: &Dom, node: NodeId) -> Result<taffy::NodeId, LayoutError> {
        let children = dom
            .children(node)
            .iter()
            .map(|&child| self.build(dom, child))
            .collect::<Result<Vec<_>, _>>()?;
        let style = dom.get(node).map(|d| resolve_style(&d.style)).unwrap_or_default();
        let id = self.tree.new_with_children(style, &children)?;
        self.tree.set_node_context(id, Some(node))?;
        Ok(id)
    }

    fn write_back(
        &self,
        dom: &mut Dom,
        taffy_node: taffy::NodeId,
        origin: Offset,
    ) -> Result<(), LayoutError> {
        let layout = self.tree.layout(taffy_node)?;
        let region = Region::new(
            origin.x + layout.location.x.round() as i32,
            origin.y + layout.location.y.round() as i32,
            layout.size.width.round() as i32,
            layout.size.height.round() as i32,
        );
        if let Some(&dom_id) = self.tree.get_node_context(taffy_node) {
            if let Some(data) = dom.get_mut(dom_id) {
                data.region = region;
            }
        }
        for child in self.tree.children(taffy_node)? {
            self.write_back(dom, child, region.offset())?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("nodes", &self.tree.total_node_count())
            .finish()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::scalar::Scalar;
    use crate::dom::node::NodeData;
    use crate::geometry::Spacing;
    use crate::layout::style::BoxStyle;

    fn region(dom: &Dom, id: NodeId) -> Region {
        dom.get(id).unwrap().region
    }

    #[test]
    fn empty_dom_has_zero_size() {
        let mut dom = Dom::new();
        let size = LayoutEngine::new().compute(&mut dom, Size::new(1280, 800)).unwrap();
        assert_eq!(size, Size::ZERO);
    }

    #[test]
    fn column_stacks_sections() {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let a = dom.insert_child(
            body,
            NodeData::new("section").with_style(BoxStyle::column().with_height(Scalar::px(800.0))),
        );
        let b = dom.insert_child(
            body,
            NodeData::new("section").with_style(BoxStyle::column().with_height(Scalar::px(600.0))),
        );

        let size = LayoutEngine::new().compute(&mut dom, Size::new(1280, 800)).unwrap();
        assert_eq!(size, Size::new(1280, 1400));
        assert_eq!(region(&dom, a), Region::new(0, 0, 1280, 800));
        assert_eq!(region(&dom, b), Region::new(0, 800, 1280, 600));
    }

    #[test]
    fn wrapping_row_breaks_cards_onto_lines() {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let section = dom.insert_child(
            body,
            NodeData::new("section").with_style(
                BoxStyle::column().with_padding(Spacing::new(100, 0, 0, 0)),
            ),
        );
        let grid =
            dom.insert_child(section, NodeData::new("div").with_style(BoxStyle::wrapping_row()));
        let card = BoxStyle::column()
            .with_width(Scalar::percent(50.0))
            .with_height(Scalar::px(300.0));
        let cards: Vec<_> = (0..3)
            .map(|_| dom.insert_child(grid, NodeData::new("div").with_style(card.clone())))
            .collect();

        LayoutEngine::new().compute(&mut dom, Size::new(1000, 800)).unwrap();
        assert_eq!(region(&dom, cards[0]), Region::new(0, 100, 500, 300));
        assert_eq!(region(&dom, cards[1]), Region::new(500, 100, 500, 300));
        assert_eq!(region(&dom, cards[2]), Region::new(0, 400, 500, 300));
    }

    #[test]
    fn fixed_elements_do_not_push_content() {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        dom.insert_child(
            body,
            NodeData::new("nav")
                .with_style(BoxStyle::column().fixed().with_height(Scalar::px(80.0))),
        );
        let hero = dom.insert_child(
            body,
            NodeData::new("section").with_style(BoxStyle::column().with_height(Scalar::px(800.0))),
        );
        LayoutEngine::new().compute(&mut dom, Size::new(1280, 800)).unwrap();
        assert_eq!(region(&dom, hero).y, 0);
    }
}
