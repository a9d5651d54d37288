//! Map embed with network-aware fallback.
//!
//! The container carries two URLs: the interactive embed and a static image.
//! The embed only loads on a good connection without data saving; otherwise
//! the image (or, failing that, a short message) takes its place. Decided
//! once; later connection changes are not tracked.

use std::fmt;

use crate::config::MapConfig;
use crate::dom::{Document, Element};
use crate::error::DomResult;
use crate::network::NetworkProfile;

/// What the map container renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapContent {
    /// Interactive iframe
    Embed {
        /// Embed URL
        src: String,
    },
    /// Static fallback image
    Image {
        /// Image URL
        src: String,
    },
    /// Plain "map unavailable" text
    Unavailable,
}

impl MapContent {
    /// Chooses the content for the container.
    ///
    /// Empty attribute values count as absent.
    #[must_use]
    pub fn decide(
        map_src: Option<&str>,
        image_src: Option<&str>,
        profile: &NetworkProfile,
    ) -> Self {
        let map_src = map_src.filter(|s| !s.is_empty());
        let image_src = image_src.filter(|s| !s.is_empty());

        match (map_src, image_src) {
            (Some(src), _) if !profile.should_withhold_embeds() => Self::Embed {
                src: src.to_string(),
            },
            (_, Some(src)) => Self::Image {
                src: src.to_string(),
            },
            (_, None) => Self::Unavailable,
        }
    }

    /// Short label, as exposed to JavaScript.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Embed { .. } => "embed",
            Self::Image { .. } => "image",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for MapContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embed { src } | Self::Image { src } => write!(f, "{} ({})", self.kind(), src),
            Self::Unavailable => write!(f, "{}", self.kind()),
        }
    }
}

/// Fills the map container.
pub struct MapLoader;

impl MapLoader {
    /// Decides and renders the container's content.
    ///
    /// Returns `None` when the page has no map container.
    pub fn attach<D: Document>(
        doc: &D,
        profile: &NetworkProfile,
        config: &MapConfig,
    ) -> Option<MapContent> {
        let container = doc.element_by_id(&config.container_id)?;

        let map_src = container.attribute(&config.map_src_attribute);
        let image_src = container.attribute(&config.image_src_attribute);
        let content = MapContent::decide(map_src.as_deref(), image_src.as_deref(), profile);

        container.clear();
        if let Err(e) = Self::render(doc, &container, &content, config) {
            log::warn!("Map container left empty: {}", e);
        } else {
            log::info!("Map rendered as {}", content);
        }

        Some(content)
    }

    fn render<D: Document>(
        doc: &D,
        container: &D::Element,
        content: &MapContent,
        config: &MapConfig,
    ) -> DomResult<()> {
        match content {
            MapContent::Embed { src } => {
                let iframe = doc.create_element("iframe")?;
                iframe.set_attribute("title", &config.embed_title)?;
                iframe.set_attribute("src", src)?;
                iframe.set_attribute("width", "100%")?;
                iframe.set_attribute("height", &config.embed_height.to_string())?;
                iframe.set_style("border", "0")?;
                iframe.set_style("display", "block")?;
                iframe.set_attribute("loading", "lazy")?;
                iframe.set_attribute("referrerpolicy", "no-referrer-when-downgrade")?;
                iframe.set_attribute("allowfullscreen", "")?;
                container.append(&iframe)
            }
            MapContent::Image { src } => {
                let img = doc.create_element("img")?;
                img.set_attribute("src", src)?;
                img.set_attribute("alt", &config.image_alt)?;
                img.set_style("width", "100%")?;
                img.set_style("height", "100%")?;
                img.set_style("object-fit", "cover")?;
                img.set_attribute("loading", "lazy")?;
                container.append(&img)
            }
            MapContent::Unavailable => {
                container.set_style("display", "flex")?;
                container.set_style("align-items", "center")?;
                container.set_style("justify-content", "center")?;
                container.set_text(&config.unavailable_text);
                Ok(())
            }
        }
    }
}
