//! Site configuration: window size, thresholds and timings.

use std::time::Duration;

use serde::Deserialize;

use crate::browser::observer::ObserverOptions;
use crate::css::margin::parse_root_margin;
use crate::geometry::Size;

/// Errors from loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` threshold {value} is outside 0..=1")]
    Threshold { field: &'static str, value: f64 },
    #[error("window size {width}x{height} must be positive")]
    Viewport { width: i32, height: i32 },
}

/// Everything tunable about the site's runtime behavior.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Initial window size.
    pub viewport: Size,
    /// The header turns solid once the page is scrolled further than this.
    pub scroll_threshold_px: i32,
    /// Wait after entering `/#anchor` before scrolling, in milliseconds.
    pub anchor_scroll_delay_ms: u64,
    /// Category, blog and product cards.
    pub card_reveal: ObserverOptions,
    /// Feature highlight cards.
    pub feature_reveal: ObserverOptions,
    /// Single panels: shop teaser, newsletter section.
    pub section_reveal: ObserverOptions,
    /// Simulated duration of the newsletter section request, in milliseconds.
    pub newsletter_submit_delay_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let card_margin = parse_root_margin("0px 0px -50px 0px").unwrap_or_default();
        Self {
            viewport: Size::new(1280, 800),
            scroll_threshold_px: 50,
            anchor_scroll_delay_ms: 50,
            card_reveal: ObserverOptions::new(0.15).with_root_margin(card_margin),
            feature_reveal: ObserverOptions::new(0.2).with_root_margin(card_margin),
            section_reveal: ObserverOptions::new(0.3),
            newsletter_submit_delay_ms: 1500,
        }
    }
}

impl SiteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width <= 0 || self.viewport.height <= 0 {
            return Err(ConfigError::Viewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (field, options) in [
            ("cardReveal", &self.card_reveal),
            ("featureReveal", &self.feature_reveal),
            ("sectionReveal", &self.section_reveal),
        ] {
            if !(0.0..=1.0).contains(&options.threshold) {
                return Err(ConfigError::Threshold {
                    field,
                    value: options.threshold,
                });
            }
        }
        Ok(())
    }

    /// Set the window size (builder).
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the header scroll threshold (builder).
    pub fn with_scroll_threshold(mut self, px: i32) -> Self {
        self.scroll_threshold_px = px;
        self
    }

    /// Set the anchor scroll delay (builder).
    pub fn with_anchor_scroll_delay(mut self, delay: Duration) -> Self {
        self.anchor_scroll_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the card reveal options (builder).
    pub fn with_card_reveal(mut self, options: ObserverOptions) -> Self {
        self.card_reveal = options;
        self
    }

    /// Set the simulated newsletter request duration (builder).
    pub fn with_newsletter_submit_delay(mut self, delay: Duration) -> Self {
        self.newsletter_submit_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn anchor_scroll_delay(&self) -> Duration {
        Duration::from_millis(self.anchor_scroll_delay_ms)
    }

    pub fn newsletter_submit_delay(&self) -> Duration {
        Duration::from_millis(self.newsletter_submit_delay_ms)
    }
}
