//! Element registry - named page regions
//!
//! Controllers never search the document for structure themselves. They ask
//! an [`ElementRegistry`] for the handles of a [`Region`]. The default
//! [`StaticRegistry::resolve`] snapshots the configured selectors once at
//! startup; tests build a registry by hand with [`StaticRegistry::with`].

use std::collections::HashMap;
use std::fmt;

use pagekit_core::{Document, NodeId, Result, Selector};

use crate::config::MarkerSettings;

/// A named page region a controller is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Modal,
    Overlay,
    OpenModalTrigger,
    CloseModalTrigger,
    ScrollTrigger,
    ScrollTarget,
    Nav,
    NavLinks,
    NavLogo,
    Header,
    Section,
    LazyImage,
    Slide,
    SliderPrev,
    SliderNext,
    DotContainer,
    Tab,
    TabContainer,
    TabPanel,
}

impl Region {
    pub const ALL: [Region; 19] = [
        Region::Modal,
        Region::Overlay,
        Region::OpenModalTrigger,
        Region::CloseModalTrigger,
        Region::ScrollTrigger,
        Region::ScrollTarget,
        Region::Nav,
        Region::NavLinks,
        Region::NavLogo,
        Region::Header,
        Region::Section,
        Region::LazyImage,
        Region::Slide,
        Region::SliderPrev,
        Region::SliderNext,
        Region::DotContainer,
        Region::Tab,
        Region::TabContainer,
        Region::TabPanel,
    ];
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Parsed structural selectors
#[derive(Debug, Clone)]
pub struct Markers {
    regions: HashMap<Region, Selector>,
    /// Individual nav link inside the links container
    pub nav_link: Selector,
}

impl Markers {
    pub fn from_settings(settings: &MarkerSettings) -> Result<Self> {
        let pairs = [
            (Region::Modal, &settings.modal),
            (Region::Overlay, &settings.overlay),
            (Region::OpenModalTrigger, &settings.open_modal),
            (Region::CloseModalTrigger, &settings.close_modal),
            (Region::ScrollTrigger, &settings.scroll_button),
            (Region::ScrollTarget, &settings.scroll_target),
            (Region::Nav, &settings.nav),
            (Region::NavLinks, &settings.nav_links),
            (Region::NavLogo, &settings.nav_logo),
            (Region::Header, &settings.header),
            (Region::Section, &settings.section),
            (Region::LazyImage, &settings.lazy_image),
            (Region::Slide, &settings.slide),
            (Region::SliderPrev, &settings.slider_left),
            (Region::SliderNext, &settings.slider_right),
            (Region::DotContainer, &settings.dot_container),
            (Region::Tab, &settings.tab),
            (Region::TabContainer, &settings.tab_container),
            (Region::TabPanel, &settings.tab_panel),
        ];

        let mut regions = HashMap::with_capacity(pairs.len());
        for (region, source) in pairs {
            regions.insert(region, Selector::parse(source)?);
        }

        Ok(Self {
            regions,
            nav_link: Selector::parse(&settings.nav_link)?,
        })
    }

    pub fn selector(&self, region: Region) -> &Selector {
        // every region is inserted by `from_settings`
        &self.regions[&region]
    }
}

/// Capability exposing handles to named page regions
pub trait ElementRegistry: fmt::Debug + Send {
    /// All elements of a region, in document order
    fn lookup(&self, region: Region) -> &[NodeId];

    /// First element of a region
    fn first(&self, region: Region) -> Option<NodeId> {
        self.lookup(region).first().copied()
    }
}

/// Registry backed by a fixed region → handles table
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    regions: HashMap<Region, Vec<NodeId>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every region by querying the document once
    pub fn resolve(document: &Document, markers: &Markers) -> Self {
        let regions = Region::ALL
            .iter()
            .map(|&region| (region, document.query_all(markers.selector(region))))
            .collect();
        Self { regions }
    }

    /// Set the handles for a region
    pub fn with(mut self, region: Region, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.regions.insert(region, nodes.into_iter().collect());
        self
    }
}

impl ElementRegistry for StaticRegistry {
    fn lookup(&self, region: Region) -> &[NodeId] {
        self.regions.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }
}
