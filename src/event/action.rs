//! Click actions attached to DOM nodes.
//!
//! A click is resolved by walking the bubble path from the hit node to the
//! root and taking the first node that carries a [`UiAction`].

/// What a click on a node does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Client-side navigation to a path such as `/` or `/produkt/p1`.
    Link(String),
    /// In-page navigation to the element with this id.
    Section(String),
    /// Open a URL in a new browsing context.
    External(String),
    /// Toggle the mobile menu.
    ToggleMenu,
    /// Open the newsletter dialog.
    OpenNewsletter,
    /// Close the newsletter dialog (close button, backdrop, "Jetzt nicht").
    CloseNewsletter,
    /// Submit the newsletter dialog form.
    SubmitNewsletter,
    /// The cart button.
    Cart,
    /// Toggle the like state of the product with this id.
    ToggleLike(String),
    /// Toggle the saved state of the blog post with this id.
    ToggleSave(u32),
    /// Submit the newsletter section form.
    SubmitSignup,
    /// Submit the shop teaser notify form.
    SubmitNotify,
    /// Swallow the click so it does not reach ancestors.
    Inert,
}

impl UiAction {
    /// Whether this action navigates somewhere.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            UiAction::Link(_) | UiAction::Section(_) | UiAction::External(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_actions() {
        assert!(UiAction::Link("/".into()).is_navigation());
        assert!(UiAction::Section("blog".into()).is_navigation());
        assert!(UiAction::External("https://example.com".into()).is_navigation());
        assert!(!UiAction::ToggleMenu.is_navigation());
        assert!(!UiAction::Inert.is_navigation());
    }
}
