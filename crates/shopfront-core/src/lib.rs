//! # Shopfront Core
//!
//! Network-aware interaction layer for the barber shop landing page.
//!
//! This crate holds every behavior of the page, written against a small
//! [`Document`] abstraction so it can run in the browser (through
//! `shopfront-wasm`) or against the in-memory [`testing::FakeDocument`]:
//!
//! - **Network classification**: [`NetworkProfile`] derived once from the
//!   reported connection metadata (data saver, cellular, slow tiers).
//! - **Header styling**: [`HeaderStyler`] toggles a `scrolled` class past
//!   60px of scroll.
//! - **Mobile menu**: [`MobileMenu`] opens and closes the navigation panel and
//!   locks page scroll while open.
//! - **Reveal animations**: [`RevealAnimator`] shows tagged elements as they
//!   enter the viewport, or all at once in lite mode.
//! - **Anchor scrolling**: [`SmoothAnchorScroller`] scrolls same-page links to
//!   just below the fixed header.
//! - **Map loading**: [`MapLoader`] embeds the interactive map only on a good
//!   connection and falls back to a static image otherwise.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable (de)serialization of [`UiConfig`] (always on for unit tests)
//! - `testing`: Export [`testing::FakeDocument`] to other crates
//!
//! ## Example
//!
//! ```rust
//! use shopfront_core::{ConnectionInfo, MapContent, NetworkProfile};
//!
//! let connection = ConnectionInfo {
//!     save_data: None,
//!     connection_type: Some("cellular".into()),
//!     effective_type: Some("4g".into()),
//! };
//! let profile = NetworkProfile::classify(Some(&connection));
//! assert!(profile.poor_network);
//!
//! let content = MapContent::decide(Some("https://maps.example.com"), Some("/map.jpg"), &profile);
//! assert_eq!(content.kind(), "image");
//! ```

#![forbid(unsafe_code)]

pub mod anchor;
pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod header;
pub mod map;
pub mod menu;
pub mod network;
pub mod reveal;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types at the crate root
pub use anchor::SmoothAnchorScroller;
pub use app::ShopfrontUi;
pub use config::{
    AnchorConfig, HeaderConfig, MapConfig, MenuConfig, RevealConfig, RootMargin, UiConfig,
};
pub use dom::{ClickOutcome, Document, Element, Observation, ScrollMode};
pub use error::{CoreError, CoreResult, DomError, DomResult};
pub use header::HeaderStyler;
pub use map::{MapContent, MapLoader};
pub use menu::{MenuState, MobileMenu};
pub use network::{ConnectionInfo, ConnectionType, EffectiveType, NetworkProfile};
pub use reveal::{RevealAnimator, RevealMode, RevealState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
///
/// ```rust
/// use shopfront_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::UiConfig;
    pub use crate::dom::{ClickOutcome, Document, Element, ScrollMode};
    pub use crate::error::{CoreError, CoreResult, DomError, DomResult};
    pub use crate::network::{ConnectionInfo, NetworkProfile};
    pub use crate::ShopfrontUi;
}
