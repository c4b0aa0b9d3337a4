//! Static editorial content: feature highlights, categories, blog posts.

use serde::Deserialize;

/// A feature highlight card.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

/// A pet category card.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: String,
    pub image: String,
    /// Display label such as `"250+ Produkte"`.
    pub count: String,
}

/// A blog post teaser.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
    pub category: String,
}

/// All editorial tables of the landing page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub blog_posts: Vec<BlogPost>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tables_default_to_empty() {
        let content: Content = serde_json::from_str(r#"{"features": []}"#).unwrap();
        assert!(content.categories.is_empty());
        assert!(content.blog_posts.is_empty());
    }

    #[test]
    fn blog_post_camel_case() {
        let post: BlogPost = serde_json::from_str(
            r#"{"id": 7, "title": "T", "excerpt": "E", "image": "/i.jpg",
                "author": "A", "date": "1. Jan 2026", "readTime": "3 Min.",
                "category": "Pflege"}"#,
        )
        .unwrap();
        assert_eq!(post.read_time, "3 Min.");
    }
}
