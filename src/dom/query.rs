//! DOM queries: by id, class, tag, and a minimal `querySelector`.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first connected node whose `id` matches.
    ///
    /// Detached nodes are skipped: an anchor only resolves while its
    /// element is part of the rendered page.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.connected_nodes()
            .into_iter()
            .find(|&node| self.get(node).and_then(|d| d.id.as_deref()) == Some(id))
    }

    /// Find all connected nodes that have the given CSS class, in tree order.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|data| data.has_class(class))
    }

    /// Find all connected nodes with the given tag, in tree order.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query_all(|data| data.tag == tag)
    }

    /// Find all connected nodes matching an arbitrary predicate, in tree order.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.connected_nodes()
            .into_iter()
            .filter(|&node| self.get(node).is_some_and(&predicate))
            .collect()
    }

    /// Resolve a simple selector: `#id`, `.class` or a bare tag name.
    ///
    /// Returns the first match in tree order. Anything else (empty input,
    /// compound selectors) matches nothing.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            if id.is_empty() {
                return None;
            }
            return self.query_by_id(id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            if class.is_empty() {
                return None;
            }
            return self.query_by_class(class).into_iter().next();
        }
        if selector.is_empty() || selector.contains(char::is_whitespace) {
            return None;
        }
        self.query_by_tag(selector).into_iter().next()
    }

    fn connected_nodes(&self) -> Vec<NodeId> {
        self.root()
            .map(|root| self.walk_depth_first(root))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::NodeData;
    use crate::dom::tree::Dom;

    /// ```text
    ///        body
    ///      /  |   \
    ///   nav  #hero  #products
    ///             /      \
    ///          .card    .card
    /// ```
    fn build_query_tree() -> Dom {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        dom.insert_child(body, NodeData::new("nav").with_class("header"));
        dom.insert_child(body, NodeData::new("section").with_id("hero"));
        let products = dom.insert_child(body, NodeData::new("section").with_id("products"));
        dom.insert_child(products, NodeData::new("div").with_class("card").with_id("p-1"));
        dom.insert_child(products, NodeData::new("div").with_class("card").with_id("p-2"));
        dom
    }

    #[test]
    fn query_by_id_found() {
        let dom = build_query_tree();
        let id = dom.query_by_id("products").unwrap();
        assert_eq!(dom.get(id).unwrap().tag, "section");
    }

    #[test]
    fn query_by_id_not_found() {
        let dom = build_query_tree();
        assert!(dom.query_by_id("blog").is_none());
    }

    #[test]
    fn query_by_class_in_tree_order() {
        let dom = build_query_tree();
        let cards = dom.query_by_class("card");
        let ids: Vec<_> = cards
            .iter()
            .map(|&c| dom.get(c).unwrap().id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["p-1", "p-2"]);
    }

    #[test]
    fn query_selector_hash() {
        let dom = build_query_tree();
        assert_eq!(dom.query_selector("#hero"), dom.query_by_id("hero"));
    }

    #[test]
    fn query_selector_class_and_tag() {
        let dom = build_query_tree();
        assert_eq!(dom.query_selector(".card"), dom.query_by_id("p-1"));
        assert_eq!(dom.query_selector("nav"), dom.query_by_class("header").first().copied());
    }

    #[test]
    fn query_selector_rejects_malformed() {
        let dom = build_query_tree();
        assert!(dom.query_selector("#").is_none());
        assert!(dom.query_selector("").is_none());
        assert!(dom.query_selector("section div").is_none());
    }

    #[test]
    fn removed_nodes_do_not_match() {
        let mut dom = build_query_tree();
        let products = dom.query_by_id("products").unwrap();
        dom.remove(products);
        assert!(dom.query_selector("#products").is_none());
        assert!(dom.query_by_class("card").is_empty());
    }
}
