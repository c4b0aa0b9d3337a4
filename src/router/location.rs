//! URL locations and route matching.

use std::fmt;
use std::str::FromStr;

/// A path plus optional fragment, e.g. `/produkt/abc#products`.
///
/// The hash is stored without its leading `#`. An empty fragment (`/#`) is
/// the same as no fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: String,
    pub hash: Option<String>,
}

impl Location {
    /// Parse an href. Relative paths are rooted; a missing path means `/`.
    pub fn parse(href: &str) -> Self {
        let (path, hash) = match href.split_once('#') {
            Some((path, hash)) => (path, Some(hash)),
            None => (href, None),
        };
        // Query strings are not used by any route.
        let path = path.split('?').next().unwrap_or_default();
        let path = if path.is_empty() {
            "/".to_owned()
        } else if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{path}")
        };
        Self {
            path,
            hash: hash.filter(|h| !h.is_empty()).map(str::to_owned),
        }
    }

    /// The landing page, optionally with an anchor.
    pub fn home(hash: Option<&str>) -> Self {
        Self {
            path: "/".to_owned(),
            hash: hash.map(str::to_owned),
        }
    }

    /// The route this location resolves to.
    pub fn route(&self) -> Route {
        Route::match_path(&self.path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hash {
            Some(hash) => write!(f, "{}#{hash}", self.path),
            None => f.write_str(&self.path),
        }
    }
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// The site's routes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: the landing page.
    Home,
    /// `/produkt/:id`.
    Product { id: String },
    /// Anything else.
    NotFound,
}

impl Route {
    /// Match a path against the route table. A trailing slash is ignored.
    pub fn match_path(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Route::Home;
        }
        let segments: Vec<&str> = trimmed.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["produkt", id] if !id.is_empty() => Route::Product {
                id: (*id).to_owned(),
            },
            _ => Route::NotFound,
        }
    }

    /// Whether this is the landing page that carries the section anchors.
    pub fn is_home(&self) -> bool {
        matches!(self, Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_path_and_hash() {
        let loc = Location::parse("/produkt/abc#products");
        assert_eq!(loc.path, "/produkt/abc");
        assert_eq!(loc.hash.as_deref(), Some("products"));
        assert_eq!(loc.to_string(), "/produkt/abc#products");
    }

    #[test]
    fn parse_bare_hash_is_home() {
        assert_eq!(Location::parse("#blog"), Location::home(Some("blog")));
        assert_eq!(Location::parse("/#"), Location::home(None));
        assert_eq!(Location::parse(""), Location::home(None));
    }

    #[test]
    fn parse_drops_query() {
        assert_eq!(Location::parse("/?ref=mail#hero").path, "/");
    }

    #[test]
    fn routes() {
        assert_eq!(Route::match_path("/"), Route::Home);
        assert_eq!(
            Route::match_path("/produkt/p-42"),
            Route::Product { id: "p-42".into() }
        );
        assert_eq!(
            Route::match_path("/produkt/p-42/"),
            Route::Product { id: "p-42".into() }
        );
        assert_eq!(Route::match_path("/produkt"), Route::NotFound);
        assert_eq!(Route::match_path("/produkt/a/b"), Route::NotFound);
        assert_eq!(Route::match_path("/blog"), Route::NotFound);
    }

    #[test]
    fn product_ids_are_case_sensitive_strings() {
        assert_ne!(Route::match_path("/produkt/ABC"), Route::match_path("/produkt/abc"));
    }
}
