//! The product catalog and editorial content.
//!
//! Both are static JSON tables embedded at build time. Loading validates
//! them once; afterwards lookups cannot fail except by "not found".

pub mod content;
pub mod product;

use std::collections::HashSet;

pub use content::{BlogPost, Category, Content, Feature};
pub use product::{parse_price, Product};

const PRODUCTS_JSON: &str = include_str!("../../data/products.json");
const CONTENT_JSON: &str = include_str!("../../data/content.json");

/// Errors from loading catalog data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("product id `{0}` appears more than once")]
    DuplicateId(String),
    #[error("product `{id}` has an unreadable {field}: `{value}`")]
    BadPrice {
        id: String,
        field: &'static str,
        value: String,
    },
    #[error("product `{id}` has rating {rating}, expected 0 to 5")]
    BadRating { id: String, rating: f32 },
}

/// Ordered, validated list of products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Validate and wrap a product list.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            for (field, value) in [("price", &product.price), ("oldPrice", &product.old_price)] {
                if parse_price(value).is_none() {
                    return Err(CatalogError::BadPrice {
                        id: product.id.clone(),
                        field,
                        value: value.clone(),
                    });
                }
            }
            if !(0.0..=5.0).contains(&product.rating) {
                return Err(CatalogError::BadRating {
                    id: product.id.clone(),
                    rating: product.rating,
                });
            }
        }
        tracing::debug!(count = products.len(), "catalog loaded");
        Ok(Self { products })
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// The catalog shipped with the site.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(PRODUCTS_JSON)
    }

    /// Exact, case-sensitive lookup by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Content {
    /// Parse the editorial tables.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The content shipped with the site.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(CONTENT_JSON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 4);
        let ids: Vec<_> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["kuschelbett-deluxe", "intelligenz-spielzeug", "kratzbaum-wolke", "leder-halsband"]
        );
    }

    #[test]
    fn embedded_content_is_valid() {
        let content = Content::embedded().unwrap();
        assert_eq!(content.features.len(), 6);
        assert_eq!(content.categories.len(), 6);
        assert_eq!(content.blog_posts.len(), 4);
    }

    #[test]
    fn find_by_id_is_exact() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.find_by_id("kratzbaum-wolke").is_some());
        assert!(catalog.find_by_id("Kratzbaum-Wolke").is_none());
        assert!(catalog.find_by_id("kratzbaum").is_none());
        assert!(catalog.find_by_id("nonexistent-id").is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let json = r#"[
            {"id": "a", "name": "A", "description": "", "price": "1,00 €", "oldPrice": "2,00 €",
             "image": "", "badge": "", "badgeColor": "", "affiliateLink": "",
             "rating": 4, "reviews": 1},
            {"id": "a", "name": "B", "description": "", "price": "1,00 €", "oldPrice": "2,00 €",
             "image": "", "badge": "", "badgeColor": "", "affiliateLink": "",
             "rating": 4, "reviews": 1}
        ]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn bad_price_rejected() {
        let json = r#"[
            {"id": "a", "name": "A", "description": "", "price": "umsonst", "oldPrice": "2,00 €",
             "image": "", "badge": "", "badgeColor": "", "affiliateLink": "",
             "rating": 4, "reviews": 1}
        ]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "product `a` has an unreadable price: `umsonst`");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Json(_))));
    }
}
