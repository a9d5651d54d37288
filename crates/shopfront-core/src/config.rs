//! Controller configuration.
//!
//! Every default reproduces the landing page markup contract, so
//! [`UiConfig::default()`] works against the stock page. With the `serde`
//! feature each section deserializes with `#[serde(default)]`, letting callers
//! override single keys.

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Configuration for all controllers.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UiConfig {
    /// Header styling
    pub header: HeaderConfig,
    /// Mobile navigation menu
    pub menu: MenuConfig,
    /// Scroll reveal animations
    pub reveal: RevealConfig,
    /// Same-page anchor scrolling
    pub anchors: AnchorConfig,
    /// Map embed
    pub map: MapConfig,
}

impl UiConfig {
    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Configuration`] naming the first invalid field.
    pub fn validate(&self) -> CoreResult<()> {
        non_empty("header.element_id", &self.header.element_id)?;
        non_empty("header.scrolled_class", &self.header.scrolled_class)?;
        if !self.header.scroll_threshold.is_finite() || self.header.scroll_threshold < 0.0 {
            return Err(CoreError::configuration(format!(
                "header.scroll_threshold must be a non-negative number, got {}",
                self.header.scroll_threshold
            )));
        }

        non_empty("menu.panel_id", &self.menu.panel_id)?;
        non_empty("menu.open_button_id", &self.menu.open_button_id)?;
        non_empty("menu.close_button_id", &self.menu.close_button_id)?;
        non_empty("menu.overlay_id", &self.menu.overlay_id)?;
        non_empty("menu.link_selector", &self.menu.link_selector)?;
        non_empty("menu.open_class", &self.menu.open_class)?;

        non_empty("reveal.selector", &self.reveal.selector)?;
        non_empty("reveal.visible_class", &self.reveal.visible_class)?;
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(CoreError::configuration(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }

        non_empty("anchors.selector", &self.anchors.selector)?;

        non_empty("map.container_id", &self.map.container_id)?;
        non_empty("map.map_src_attribute", &self.map.map_src_attribute)?;
        non_empty("map.image_src_attribute", &self.map.image_src_attribute)?;
        if self.map.embed_height == 0 {
            return Err(CoreError::configuration("map.embed_height must be positive"));
        }

        Ok(())
    }
}

fn non_empty(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        Err(CoreError::configuration(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

/// Header styling configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeaderConfig {
    /// Id of the header landmark (also used for anchor offsets)
    pub element_id: String,
    /// Class applied once the page has scrolled
    pub scrolled_class: String,
    /// Scroll offset in CSS pixels past which the header counts as scrolled
    pub scroll_threshold: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            element_id: "header".to_string(),
            scrolled_class: "scrolled".to_string(),
            scroll_threshold: 60.0,
        }
    }
}

/// Mobile menu configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuConfig {
    /// Id of the sliding panel
    pub panel_id: String,
    /// Id of the hamburger button
    pub open_button_id: String,
    /// Id of the close button inside the panel
    pub close_button_id: String,
    /// Id of the backdrop behind the panel
    pub overlay_id: String,
    /// Selector for navigation links inside the panel
    pub link_selector: String,
    /// Class applied to the panel while open
    pub open_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            panel_id: "mobile-menu".to_string(),
            open_button_id: "menu-open-btn".to_string(),
            close_button_id: "menu-close-btn".to_string(),
            overlay_id: "menu-overlay".to_string(),
            link_selector: ".menu-link".to_string(),
            open_class: "open".to_string(),
        }
    }
}

/// Scroll reveal configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RevealConfig {
    /// Selector for elements that animate in
    pub selector: String,
    /// Class applied when an element reveals
    pub visible_class: String,
    /// Fraction of the element that must be visible
    pub threshold: f64,
    /// Margin applied to the viewport before intersecting
    pub root_margin: RootMargin,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".reveal".to_string(),
            visible_class: "visible".to_string(),
            threshold: 0.08,
            root_margin: RootMargin::new(0.0, 0.0, -40.0, 0.0),
        }
    }
}

/// Viewport margin in CSS pixels. Negative values shrink the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RootMargin {
    /// Top edge
    pub top: f64,
    /// Right edge
    pub right: f64,
    /// Bottom edge
    pub bottom: f64,
    /// Left edge
    pub left: f64,
}

impl RootMargin {
    /// Creates a margin in CSS order (top, right, bottom, left).
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Anchor scrolling configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnchorConfig {
    /// Selector for same-page links
    pub selector: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            selector: "a[href^=\"#\"]".to_string(),
        }
    }
}

/// Map embed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    /// Id of the placeholder element
    pub container_id: String,
    /// Attribute carrying the embed URL
    pub map_src_attribute: String,
    /// Attribute carrying the fallback image URL
    pub image_src_attribute: String,
    /// Iframe height in CSS pixels; should match the container's styled height
    pub embed_height: u32,
    /// Accessible title of the iframe
    pub embed_title: String,
    /// Alt text of the fallback image
    pub image_alt: String,
    /// Text shown when neither embed nor image can be shown
    pub unavailable_text: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: "map-container".to_string(),
            map_src_attribute: "data-src".to_string(),
            image_src_attribute: "data-img".to_string(),
            embed_height: 280,
            embed_title: "Ubicación".to_string(),
            image_alt: "Mapa".to_string(),
            unavailable_text: "Mapa no disponible".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_contract() {
        let config = UiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.header.scroll_threshold, 60.0);
        assert_eq!(config.reveal.threshold, 0.08);
        assert_eq!(config.reveal.root_margin.to_string(), "0px 0px -40px 0px");
        assert_eq!(config.anchors.selector, r##"a[href^="#"]"##);
        assert_eq!(config.map.embed_height, 280);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = UiConfig::default();
        config.reveal.threshold = 1.5;
        assert!(matches!(
            config.validate(),
            Err(CoreError::Configuration { .. })
        ));

        let mut config = UiConfig::default();
        config.menu.link_selector = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("menu.link_selector"));

        let mut config = UiConfig::default();
        config.header.scroll_threshold = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = UiConfig::default();
        config.map.embed_height = 0;
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_override() {
        let config: UiConfig = serde_json::from_str(
            r#"{ "header": { "scroll_threshold": 120 }, "map": { "embed_height": 400 } }"#,
        )
        .unwrap();

        assert_eq!(config.header.scroll_threshold, 120.0);
        assert_eq!(config.header.element_id, "header");
        assert_eq!(config.map.embed_height, 400);
        assert_eq!(config.map.container_id, "map-container");
        assert_eq!(config.reveal, RevealConfig::default());
    }
}
