//! The page frame shared by every route: header, main slot, footer and the
//! modal root.

use crate::components::NavigationNodes;
use crate::css::scalar::Scalar;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::event::action::UiAction;
use crate::geometry::Spacing;
use crate::layout::style::BoxStyle;

/// Header links: label and target section.
pub const NAV_LINKS: [(&str, &str); 4] = [
    ("Startseite", "hero"),
    ("Kategorien", "categories"),
    ("Ratgeber", "blog"),
    ("Produkte", "products"),
];

/// Footer social links. They have no destination yet.
pub const SOCIAL_LINKS: [&str; 3] = ["Instagram", "Facebook", "YouTube"];

/// Items in the cart. There is no cart logic yet.
pub const CART_COUNT: u32 = 0;

/// Contact address shown in the footer.
pub const CONTACT_MAIL: &str = "mailto:hello@haustieroase.de";

/// Handles to the frame's nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    pub body: NodeId,
    pub header: NodeId,
    pub logo: NodeId,
    /// Desktop header links, in [`NAV_LINKS`] order.
    pub nav_links: Vec<NodeId>,
    pub cart_button: NodeId,
    /// Item count on the cart button, hidden while the cart is empty.
    pub cart_badge: NodeId,
    pub newsletter_button: NodeId,
    pub menu_button: NodeId,
    pub mobile_menu: NodeId,
    /// Mobile menu links, in [`NAV_LINKS`] order.
    pub mobile_links: Vec<NodeId>,
    /// Route content is mounted here.
    pub main: NodeId,
    pub footer: NodeId,
    pub modal_root: NodeId,
}

impl Shell {
    /// Build the frame as the document root.
    pub fn build(dom: &mut Dom) -> Self {
        let body = dom.insert(NodeData::new("body"));
        let header = dom.insert_child(
            body,
            NodeData::new("nav")
                .with_class("site-header")
                .with_style(
                    BoxStyle::column()
                        .fixed()
                        .with_width(Scalar::percent(100.0))
                        .with_height(Scalar::px(80.0)),
                ),
        );
        let logo = dom.insert_child(
            header,
            NodeData::new("a")
                .with_text("HaustierOase")
                .with_attr("href", "/")
                .with_action(UiAction::Link("/".into()))
                .focusable(true),
        );
        let nav_links = NAV_LINKS
            .iter()
            .map(|(label, anchor)| section_link(dom, header, label, anchor))
            .collect();
        let cart_button = dom.insert_child(
            header,
            NodeData::new("button")
                .with_attr("aria-label", "Warenkorb")
                .with_action(UiAction::Cart)
                .focusable(true),
        );
        let cart_badge = dom.insert_child(
            cart_button,
            NodeData::new("span")
                .with_class("cart-badge")
                .with_text(CART_COUNT.to_string())
                .with_style(BoxStyle {
                    hidden: CART_COUNT == 0,
                    ..BoxStyle::column()
                }),
        );
        let newsletter_button = dom.insert_child(
            header,
            NodeData::new("button")
                .with_text("Newsletter")
                .with_action(UiAction::OpenNewsletter)
                .focusable(true),
        );
        let menu_button = dom.insert_child(
            header,
            NodeData::new("button")
                .with_attr("aria-label", "Menü")
                .with_action(UiAction::ToggleMenu)
                .focusable(true),
        );
        let mobile_menu = dom.insert_child(
            header,
            NodeData::new("div").with_class("mobile-menu").with_style(BoxStyle {
                hidden: true,
                ..BoxStyle::column()
            }),
        );
        let mobile_links = NAV_LINKS
            .iter()
            .map(|(label, anchor)| section_link(dom, mobile_menu, label, anchor))
            .collect();
        dom.insert_child(
            mobile_menu,
            NodeData::new("button")
                .with_text("Newsletter abonnieren")
                .with_action(UiAction::OpenNewsletter)
                .focusable(true),
        );

        let main = dom.insert_child(body, NodeData::new("main").with_style(BoxStyle::column()));
        let footer = dom.insert_child(
            body,
            NodeData::new("footer").with_style(
                BoxStyle::column()
                    .with_height(Scalar::px(320.0))
                    .with_padding(Spacing::new(48, 32, 48, 32)),
            ),
        );
        dom.insert_child(
            footer,
            NodeData::new("a")
                .with_text("hello@haustieroase.de")
                .with_attr("href", CONTACT_MAIL)
                .with_action(UiAction::External(CONTACT_MAIL.to_owned()))
                .focusable(true),
        );
        for label in SOCIAL_LINKS {
            dom.insert_child(
                footer,
                NodeData::new("a")
                    .with_attr("href", "#")
                    .with_attr("aria-label", label)
                    .focusable(true),
            );
        }
        dom.insert_child(footer, NodeData::new("p").with_text("© HaustierOase"));
        let modal_root = dom.insert_child(
            body,
            NodeData::new("div")
                .with_id("modal-root")
                .with_style(BoxStyle::column().fixed()),
        );

        Self {
            body,
            header,
            logo,
            nav_links,
            cart_button,
            cart_badge,
            newsletter_button,
            menu_button,
            mobile_menu,
            mobile_links,
            main,
            footer,
            modal_root,
        }
    }

    /// The nodes the navigation controller renders into.
    pub fn navigation_nodes(&self) -> NavigationNodes {
        NavigationNodes {
            header: self.header,
            menu_button: self.menu_button,
            mobile_menu: self.mobile_menu,
        }
    }
}

fn section_link(dom: &mut Dom, parent: NodeId, label: &str, anchor: &str) -> NodeId {
    dom.insert_child(
        parent,
        NodeData::new("a")
            .with_text(label)
            .with_attr("href", format!("#{anchor}"))
            .with_action(UiAction::Section(anchor.to_owned()))
            .focusable(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_the_document_root() {
        let mut dom = Dom::new();
        let shell = Shell::build(&mut dom);
        assert_eq!(dom.root(), Some(shell.body));
        assert_eq!(
            dom.children(shell.body),
            &[shell.header, shell.main, shell.footer, shell.modal_root]
        );
    }

    #[test]
    fn header_and_mobile_links_target_sections() {
        let mut dom = Dom::new();
        let shell = Shell::build(&mut dom);
        for links in [&shell.nav_links, &shell.mobile_links] {
            let actions: Vec<_> = links
                .iter()
                .map(|&n| dom.get(n).unwrap().action.clone().unwrap())
                .collect();
            assert_eq!(
                actions,
                vec![
                    UiAction::Section("hero".into()),
                    UiAction::Section("categories".into()),
                    UiAction::Section("blog".into()),
                    UiAction::Section("products".into()),
                ]
            );
        }
        assert!(dom.get(shell.mobile_menu).unwrap().style.hidden);
    }

    #[test]
    fn empty_cart_hides_badge() {
        let mut dom = Dom::new();
        let shell = Shell::build(&mut dom);
        let badge = dom.get(shell.cart_badge).unwrap();
        assert_eq!(badge.text.as_deref(), Some("0"));
        assert!(badge.style.hidden);
    }
}
