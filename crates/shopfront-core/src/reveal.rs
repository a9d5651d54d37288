//! Scroll-triggered reveal animations.
//!
//! Each tagged element moves `Pending -> Visible` exactly once. On constrained
//! connections (lite mode) or runtimes without intersection observation,
//! everything is revealed up front. Otherwise elements are observed and
//! released from observation as soon as they reveal.
//!
//! The gate is the visible ratio, not mere intersection. An element taller
//! than `viewport / threshold` (about 9,500px for a 760px viewport at 8%)
//! can never reach the ratio and stays pending.

use std::fmt;

use crate::config::RevealConfig;
use crate::dom::{Document, Element, IntersectionEntry, IntersectionOptions, Observation};
use crate::network::NetworkProfile;

/// Reveal state of a tagged element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Waiting to enter the viewport
    Pending,
    /// Revealed; terminal
    Visible,
}

impl RevealState {
    /// Reads the state off an element.
    #[must_use]
    pub fn of<E: Element>(element: &E, visible_class: &str) -> Self {
        if element.has_class(visible_class) {
            Self::Visible
        } else {
            Self::Pending
        }
    }
}

/// How the reveal animator ended up wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    /// No tagged elements on the page
    Idle,
    /// All elements revealed at attach time
    Immediate {
        /// Number of elements revealed
        revealed: usize,
    },
    /// Elements are being observed
    Observing {
        /// Number of elements handed to the observer
        observed: usize,
    },
}

impl fmt::Display for RevealMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "none"),
            Self::Immediate { .. } => write!(f, "immediate"),
            Self::Observing { .. } => write!(f, "observing"),
        }
    }
}

/// Marks tagged elements visible.
pub struct RevealAnimator;

impl RevealAnimator {
    /// Collects tagged elements and reveals them, immediately or lazily.
    pub fn attach<D: Document>(
        doc: &D,
        profile: &NetworkProfile,
        config: &RevealConfig,
    ) -> RevealMode {
        let elements = match doc.query_selector_all(&config.selector) {
            Ok(elements) => elements,
            Err(e) => {
                log::warn!("Reveal elements not collected: {}", e);
                return RevealMode::Idle;
            }
        };
        if elements.is_empty() {
            return RevealMode::Idle;
        }

        if profile.lite_mode || !doc.supports_intersection_observer() {
            return Self::reveal_all(&elements, &config.visible_class);
        }

        let options = IntersectionOptions {
            threshold: config.threshold,
            root_margin: config.root_margin,
        };
        let class = config.visible_class.clone();
        let threshold = config.threshold;

        let observed = doc.observe_intersections(
            &elements,
            options,
            Box::new(move |entry: &IntersectionEntry<D::Element>| {
                if !entry.meets(threshold) {
                    return Observation::Keep;
                }
                reveal(&entry.target, &class);
                Observation::Release
            }),
        );

        match observed {
            Ok(()) => RevealMode::Observing {
                observed: elements.len(),
            },
            Err(e) => {
                log::warn!("Intersection observer unavailable, revealing all: {}", e);
                Self::reveal_all(&elements, &config.visible_class)
            }
        }
    }

    fn reveal_all<E: Element>(elements: &[E], class: &str) -> RevealMode {
        for element in elements {
            reveal(element, class);
        }
        RevealMode::Immediate {
            revealed: elements.len(),
        }
    }
}

fn reveal<E: Element>(element: &E, class: &str) {
    if let Err(e) = element.add_class(class) {
        log::warn!("Failed to reveal element: {}", e);
    }
}
