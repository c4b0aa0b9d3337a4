//! Client-side router: location parsing, route table and history.

pub mod location;

pub use location::{Location, Route};

/// Session history with a current entry, like `window.history`.
#[derive(Debug, Clone)]
pub struct Router {
    entries: Vec<Location>,
    position: usize,
}

impl Router {
    /// A history containing only `initial`.
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            position: 0,
        }
    }

    /// The current location.
    pub fn location(&self) -> &Location {
        // `position` always indexes a live entry.
        &self.entries[self.position]
    }

    /// The current route.
    pub fn route(&self) -> Route {
        self.location().route()
    }

    /// Push a new entry, discarding any forward entries.
    ///
    /// Returns `false` (and pushes nothing) when `to` equals the current
    /// location, as a router link to the current URL does.
    pub fn push(&mut self, to: Location) -> bool {
        if *self.location() == to {
            return false;
        }
        tracing::debug!(from = %self.location(), to = %to, "navigate");
        self.entries.truncate(self.position + 1);
        self.entries.push(to);
        self.position += 1;
        true
    }

    /// Go back one entry. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Go forward one entry. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.position + 1 >= self.entries.len() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Number of history entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: history holds at least the initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Location::home(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_back() {
        let mut router = Router::default();
        assert!(router.push(Location::parse("/produkt/abc")));
        assert_eq!(router.route(), Route::Product { id: "abc".into() });
        assert!(router.back());
        assert_eq!(router.route(), Route::Home);
        assert!(!router.back());
        assert!(router.forward());
        assert!(!router.forward());
    }

    #[test]
    fn push_same_location_is_noop() {
        let mut router = Router::default();
        assert!(!router.push(Location::home(None)));
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn push_drops_forward_entries() {
        let mut router = Router::default();
        router.push(Location::parse("/produkt/a"));
        router.push(Location::parse("/produkt/b"));
        router.back();
        router.push(Location::parse("/#blog"));
        assert_eq!(router.len(), 3);
        assert!(!router.forward());
        assert_eq!(router.location().hash.as_deref(), Some("blog"));
    }
}
