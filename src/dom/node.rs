//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

use crate::event::action::UiAction;
use crate::geometry::Region;
use crate::layout::style::BoxStyle;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single DOM node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Element tag name (e.g. "section", "button").
    pub tag: String,
    /// Optional unique id, the target of `#anchor` navigation.
    pub id: Option<String>,
    /// CSS classes. Reveal and header state are reflected here.
    pub classes: Vec<String>,
    /// Visible text content, if any.
    pub text: Option<String>,
    /// Current value of form fields.
    pub value: Option<String>,
    /// Other attributes (`href`, `aria-label`, inline style values).
    pub attrs: Vec<(String, String)>,
    /// What a click on this node does.
    pub action: Option<UiAction>,
    /// Box model inputs for layout.
    pub style: BoxStyle,
    /// Absolute page region computed by the last layout pass.
    pub region: Region,
    /// Whether this node can receive focus.
    pub focusable: bool,
    /// Whether this node is disabled.
    pub disabled: bool,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag and sensible defaults.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            text: None,
            value: None,
            attrs: Vec::new(),
            action: None,
            style: BoxStyle::default(),
            region: Region::EMPTY,
            focusable: false,
            disabled: false,
        }
    }

    /// Set the element id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Make this node a form field with an initial value (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self.focusable = true;
        self
    }

    /// Set an attribute, replacing any previous value (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Attach a click action (builder).
    pub fn with_action(mut self, action: UiAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the box style (builder).
    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    /// Set whether this node can receive focus (builder).
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Check whether this node has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Add or remove a class depending on `on`.
    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = NodeData::new("section");
        assert_eq!(data.tag, "section");
        assert!(data.id.is_none());
        assert!(data.classes.is_empty());
        assert!(data.action.is_none());
        assert!(!data.focusable);
        assert_eq!(data.region, Region::EMPTY);
    }

    #[test]
    fn builder_with_class_dedup() {
        let data = NodeData::new("div").with_class("card").with_class("card");
        assert_eq!(data.classes, vec!["card"]);
    }

    #[test]
    fn with_value_makes_focusable() {
        let data = NodeData::new("input").with_value("");
        assert!(data.focusable);
        assert_eq!(data.value.as_deref(), Some(""));
    }

    #[test]
    fn set_class_toggles_by_flag() {
        let mut data = NodeData::new("nav");
        data.set_class("scrolled", true);
        data.set_class("scrolled", true);
        assert_eq!(data.classes, vec!["scrolled"]);
        data.set_class("scrolled", false);
        assert!(!data.has_class("scrolled"));
    }

    #[test]
    fn attrs_replace_in_place() {
        let mut data = NodeData::new("a").with_attr("href", "/");
        data.set_attr("href", "/produkt/p1");
        assert_eq!(data.attr("href"), Some("/produkt/p1"));
        assert_eq!(data.attrs.len(), 1);
        assert_eq!(data.attr("target"), None);
    }

    #[test]
    fn remove_class_noop() {
        let mut data = NodeData::new("div");
        data.remove_class("nonexistent");
        assert!(data.classes.is_empty());
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
