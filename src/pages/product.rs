//! Product detail page and the not-found fallback.

use crate::browser::Host;
use crate::catalog::{Catalog, Product};
use crate::css::scalar::Scalar;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::event::action::UiAction;
use crate::geometry::Spacing;
use crate::layout::style::BoxStyle;

/// Title of the fallback view.
pub const NOT_FOUND_TITLE: &str = "Produkt nicht gefunden";

const AFFILIATE_NOTE: &str = "* Affiliate-Link: Bei Kauf über diesen Link erhalten wir eine \
                              kleine Provision. Keine Mehrkosten für dich.";

/// What a detail route shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Found(Product),
    NotFound,
}

/// A mounted detail page, or the fallback for an unknown product or path.
#[derive(Debug)]
pub struct ProductPage {
    root: NodeId,
    view: DetailView,
}

impl ProductPage {
    /// Look `id` up and render the product, or the fallback.
    pub fn mount(host: &mut Host, main: NodeId, catalog: &Catalog, id: &str) -> Self {
        match catalog.find_by_id(id) {
            Some(product) => {
                let root = build_found(&mut host.dom, main, product);
                tracing::debug!(id, "product page mounted");
                Self {
                    root,
                    view: DetailView::Found(product.clone()),
                }
            }
            None => {
                tracing::debug!(id, "unknown product");
                Self::not_found(host, main)
            }
        }
    }

    /// The fallback view on its own, for paths no route matches.
    pub fn not_found(host: &mut Host, main: NodeId) -> Self {
        Self {
            root: build_not_found(&mut host.dom, main),
            view: DetailView::NotFound,
        }
    }

    pub fn view(&self) -> &DetailView {
        &self.view
    }

    /// The shown product, if any.
    pub fn product(&self) -> Option<&Product> {
        match &self.view {
            DetailView::Found(product) => Some(product),
            DetailView::NotFound => None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn teardown(&mut self, host: &mut Host) {
        host.dom.remove(self.root);
    }
}

fn page_root(dom: &mut Dom, main: NodeId, class: &str) -> NodeId {
    dom.insert_child(
        main,
        NodeData::new("div").with_class(class).with_style(
            BoxStyle::column()
                .with_height(Scalar::px(900.0))
                .with_padding(Spacing::new(128, 32, 80, 32))
                .with_gap(24),
        ),
    )
}

fn home_link(dom: &mut Dom, parent: NodeId, text: &str) -> NodeId {
    dom.insert_child(
        parent,
        NodeData::new("a")
            .with_class("back")
            .with_text(text)
            .with_attr("href", "/")
            .with_action(UiAction::Link("/".into()))
            .focusable(true),
    )
}

fn build_found(dom: &mut Dom, main: NodeId, product: &Product) -> NodeId {
    let root = page_root(dom, main, "product-detail");
    home_link(dom, root, "← Zurück");
    dom.insert_child(
        root,
        NodeData::new("img").with_attr("src", &product.image).with_attr("alt", &product.name),
    );
    dom.insert_child(
        root,
        NodeData::new("span")
            .with_class("badge")
            .with_attr("data-color", &product.badge_color)
            .with_text(&product.badge),
    );
    dom.insert_child(root, NodeData::new("h1").with_text(&product.name));
    dom.insert_child(root, NodeData::new("p").with_text(&product.description));
    dom.insert_child(
        root,
        NodeData::new("span").with_class("price").with_text(&product.price),
    );
    dom.insert_child(
        root,
        NodeData::new("s").with_class("old-price").with_text(&product.old_price),
    );
    dom.insert_child(
        root,
        NodeData::new("a")
            .with_class("buy")
            .with_text("Jetzt kaufen")
            .with_attr("href", &product.affiliate_link)
            .with_action(UiAction::External(product.affiliate_link.clone()))
            .focusable(true),
    );
    dom.insert_child(
        root,
        NodeData::new("p")
            .with_class("note")
            .with_text(AFFILIATE_NOTE),
    );
    root
}

fn build_not_found(dom: &mut Dom, main: NodeId) -> NodeId {
    let root = page_root(dom, main, "not-found");
    dom.insert_child(root, NodeData::new("h1").with_text(NOT_FOUND_TITLE));
    dom.insert_child(
        root,
        NodeData::new("p").with_text("Tipp: Prüfe, ob die ID exakt stimmt."),
    );
    home_link(dom, root, "Zurück zur Startseite");
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::router::Location;

    fn host() -> (Host, NodeId) {
        let mut host = Host::new(Size::new(1280, 800), Location::parse("/produkt/x"));
        let main = host.dom.insert(NodeData::new("main"));
        (host, main)
    }

    #[test]
    fn known_id_shows_product() {
        let (mut host, main) = host();
        let catalog = Catalog::embedded().unwrap();
        let page = ProductPage::mount(&mut host, main, &catalog, "kratzbaum-wolke");
        assert_eq!(page.product().map(|p| p.id.as_str()), Some("kratzbaum-wolke"));
        let buy = host.dom.query_selector(".buy").unwrap();
        assert!(matches!(host.dom.get(buy).unwrap().action, Some(UiAction::External(_))));
    }

    #[test]
    fn unknown_id_falls_back() {
        let (mut host, main) = host();
        let catalog = Catalog::embedded().unwrap();
        let page = ProductPage::mount(&mut host, main, &catalog, "nonexistent-id");
        assert_eq!(page.view(), &DetailView::NotFound);
        let title = host.dom.query_selector("h1").unwrap();
        assert_eq!(host.dom.get(title).unwrap().text.as_deref(), Some(NOT_FOUND_TITLE));
        let back = host.dom.query_selector(".back").unwrap();
        assert_eq!(host.dom.get(back).unwrap().action, Some(UiAction::Link("/".into())));
    }

    #[test]
    fn lookup_is_exact() {
        let (mut host, main) = host();
        let catalog = Catalog::embedded().unwrap();
        let page = ProductPage::mount(&mut host, main, &catalog, "Kratzbaum-Wolke");
        assert!(page.product().is_none());
    }

    #[test]
    fn teardown_removes_nodes() {
        let (mut host, main) = host();
        let mut page = ProductPage::not_found(&mut host, main);
        page.teardown(&mut host);
        assert!(host.dom.children(main).is_empty());
    }
}
