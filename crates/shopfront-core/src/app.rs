//! Composition root: classify the network, then attach every controller.

use crate::anchor::SmoothAnchorScroller;
use crate::config::UiConfig;
use crate::dom::{Document, Element};
use crate::error::CoreResult;
use crate::header::HeaderStyler;
use crate::map::{MapContent, MapLoader};
use crate::menu::{MenuState, MobileMenu};
use crate::network::{ConnectionInfo, NetworkProfile};
use crate::reveal::{RevealAnimator, RevealMode};

/// All controllers attached to one document.
///
/// Dropping this value does not detach anything; handlers live as long as
/// the page.
pub struct ShopfrontUi<E: Element> {
    profile: NetworkProfile,
    header: Option<E>,
    menu: Option<MobileMenu<E>>,
    reveal: RevealMode,
    anchors: usize,
    map: Option<MapContent>,
}

impl<E: Element> ShopfrontUi<E> {
    /// Validates `config`, classifies `connection` and attaches the header
    /// styler, mobile menu, reveal animator, anchor scroller and map loader,
    /// in that order.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid. Missing page
    /// elements are never an error.
    pub fn attach<D>(
        doc: &D,
        connection: Option<&ConnectionInfo>,
        config: &UiConfig,
    ) -> CoreResult<Self>
    where
        D: Document<Element = E>,
    {
        config.validate()?;

        let profile = NetworkProfile::classify(connection);
        log::info!("Network profile: {}", profile);

        let header = HeaderStyler::attach(doc, &config.header);
        let menu = MobileMenu::attach(doc, &config.menu);
        let reveal = RevealAnimator::attach(doc, &profile, &config.reveal);
        let anchors = SmoothAnchorScroller::attach(doc, &profile, &config.anchors, &config.header);
        let map = MapLoader::attach(doc, &profile, &config.map);

        log::debug!(
            "Attached: header={} menu={} reveal={} anchors={} map={}",
            header.is_some(),
            menu.is_some(),
            reveal,
            anchors,
            map.as_ref().map_or("none", MapContent::kind)
        );

        Ok(Self {
            profile,
            header,
            menu,
            reveal,
            anchors,
            map,
        })
    }

    /// The network classification every controller was attached with.
    #[must_use]
    pub fn profile(&self) -> NetworkProfile {
        self.profile
    }

    /// The styled header, if the page has one.
    #[must_use]
    pub fn header(&self) -> Option<&E> {
        self.header.as_ref()
    }

    /// The mobile menu, if the page has a panel.
    #[must_use]
    pub fn menu(&self) -> Option<&MobileMenu<E>> {
        self.menu.as_ref()
    }

    /// Menu state; `Closed` when there is no menu.
    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.menu.as_ref().map_or(MenuState::Closed, MobileMenu::state)
    }

    /// How reveal animations were wired.
    #[must_use]
    pub fn reveal_mode(&self) -> RevealMode {
        self.reveal
    }

    /// Number of anchor links intercepted.
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.anchors
    }

    /// The map decision, if the page has a map container.
    #[must_use]
    pub fn map_content(&self) -> Option<&MapContent> {
        self.map.as_ref()
    }
}
