//! Product records and display price handling.

use serde::Deserialize;

/// One affiliate product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique key, used in `/produkt/:id`.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display-formatted price, e.g. `"19,99 €"`.
    pub price: String,
    /// Display-formatted former price.
    pub old_price: String,
    pub image: String,
    pub badge: String,
    /// Style token for the badge background.
    pub badge_color: String,
    pub affiliate_link: String,
    /// Average rating, 0 to 5.
    pub rating: f32,
    pub reviews: u32,
}

impl Product {
    /// The current price as a number.
    pub fn price_value(&self) -> Option<f64> {
        parse_price(&self.price)
    }

    /// The former price as a number.
    pub fn old_price_value(&self) -> Option<f64> {
        parse_price(&self.old_price)
    }

    /// Savings against the former price in whole percent, rounded half up.
    ///
    /// `None` if a price does not parse or the former price is zero.
    pub fn savings_percent(&self) -> Option<i64> {
        let price = self.price_value()?;
        let old = self.old_price_value()?;
        if old == 0.0 {
            return None;
        }
        Some(((old - price) / old * 100.0).round() as i64)
    }

    /// Number of fully filled rating stars.
    pub fn full_stars(&self) -> u32 {
        self.rating.clamp(0.0, 5.0).floor() as u32
    }

    /// Client route of the detail page.
    pub fn detail_path(&self) -> String {
        format!("/produkt/{}", self.id)
    }
}

/// Parse a German display price such as `"19,99 €"` or `"1.299,00 €"`.
pub fn parse_price(text: &str) -> Option<f64> {
    let number = text.trim().trim_end_matches('€').trim();
    if number.is_empty() {
        return None;
    }
    let normalized = number.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: &str, old_price: &str) -> Product {
        Product {
            id: "p1".into(),
            name: "Napf".into(),
            description: String::new(),
            price: price.into(),
            old_price: old_price.into(),
            image: String::new(),
            badge: String::new(),
            badge_color: String::new(),
            affiliate_link: String::new(),
            rating: 4.6,
            reviews: 10,
        }
    }

    #[test]
    fn parse_display_prices() {
        assert_eq!(parse_price("19,99 €"), Some(19.99));
        assert_eq!(parse_price("1.299,00 €"), Some(1299.0));
        assert_eq!(parse_price("5 €"), Some(5.0));
        assert_eq!(parse_price("€"), None);
        assert_eq!(parse_price("gratis"), None);
    }

    #[test]
    fn savings_rounds_to_whole_percent() {
        assert_eq!(product("49,99 €", "69,99 €").savings_percent(), Some(29));
        assert_eq!(product("19,99 €", "24,99 €").savings_percent(), Some(20));
        assert_eq!(product("10,00 €", "10,00 €").savings_percent(), Some(0));
    }

    #[test]
    fn savings_needs_valid_prices() {
        assert_eq!(product("x", "10,00 €").savings_percent(), None);
        assert_eq!(product("0,00 €", "0,00 €").savings_percent(), None);
    }

    #[test]
    fn stars_and_path() {
        let p = product("1,00 €", "2,00 €");
        assert_eq!(p.full_stars(), 4);
        assert_eq!(p.detail_path(), "/produkt/p1");
    }
}
