//! Page state (Model in TEA pattern)

use pagekit_core::{Document, NodeId, Page, Result, Viewport};
use serde::Serialize;

use crate::carousel_state::CarouselState;
use crate::config::Settings;
use crate::listeners::ListenerRegistry;
use crate::observer::{ObserverId, ObserverRegistry};
use crate::registry::{ElementRegistry, Markers, Region, StaticRegistry};

/// Modal dialog state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// How a scroll request moves the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animated over several frames
    Smooth,
    /// Jump in one step
    Instant,
}

/// In-flight smooth scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    frame: u32,
    frames: u32,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, frames: u32) -> Self {
        Self {
            from,
            to,
            frame: 0,
            frames: frames.max(1),
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Step one frame and return the new scroll offset
    pub fn advance(&mut self) -> f64 {
        self.frame = (self.frame + 1).min(self.frames);
        let t = f64::from(self.frame) / f64::from(self.frames);
        // ease-in-out quad
        let eased = if t < 0.5 {
            2.0 * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
        };
        self.from + (self.to - self.from) * eased
    }

    pub fn is_done(&self) -> bool {
        self.frame >= self.frames
    }
}

/// Observers created during initialization
#[derive(Debug, Clone, Copy, Default)]
pub struct PageObservers {
    pub sticky_nav: Option<ObserverId>,
    pub section_reveal: Option<ObserverId>,
    pub lazy_images: Option<ObserverId>,
}

/// Complete page state
#[derive(Debug)]
pub struct PageState {
    pub document: Document,
    pub viewport: Viewport,
    pub settings: Settings,
    pub markers: Markers,

    /// Region lookups; resolved once before the controllers are wired
    pub registry: Box<dyn ElementRegistry>,

    pub listeners: ListenerRegistry,
    pub observers: ObserverRegistry,
    pub page_observers: PageObservers,

    pub modal: ModalState,
    pub carousel: CarouselState,
    pub scroll_animation: Option<ScrollAnimation>,

    /// Cookie banner element while it is on the page
    pub cookie_banner: Option<NodeId>,

    initialized: bool,
    quitting: bool,
    viewport_dirty: bool,
}

impl PageState {
    /// Build state for a page, resolving regions from the configured markers
    pub fn new(page: Page, settings: Settings) -> Result<Self> {
        let markers = Markers::from_settings(&settings.markers)?;
        let registry = StaticRegistry::resolve(&page.document, &markers);
        Ok(Self::assemble(page, settings, markers, Box::new(registry)))
    }

    /// Build state with a caller-supplied registry
    pub fn with_registry(
        page: Page,
        settings: Settings,
        registry: Box<dyn ElementRegistry>,
    ) -> Result<Self> {
        let markers = Markers::from_settings(&settings.markers)?;
        Ok(Self::assemble(page, settings, markers, registry))
    }

    fn assemble(
        page: Page,
        settings: Settings,
        markers: Markers,
        registry: Box<dyn ElementRegistry>,
    ) -> Self {
        Self {
            document: page.document,
            viewport: page.viewport,
            settings,
            markers,
            registry,
            listeners: ListenerRegistry::new(),
            observers: ObserverRegistry::new(),
            page_observers: PageObservers::default(),
            modal: ModalState::Closed,
            carousel: CarouselState::default(),
            scroll_animation: None,
            cookie_banner: None,
            initialized: false,
            quitting: false,
            viewport_dirty: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll_animation.is_some()
    }

    /// Move the viewport; returns true when the offset changed
    pub fn set_scroll(&mut self, y: f64) -> bool {
        let y = self.viewport.clamp_scroll(y, self.document.height());
        if (y - self.viewport.scroll_y).abs() < f64::EPSILON {
            return false;
        }
        self.viewport.scroll_y = y;
        self.viewport_dirty = true;
        true
    }

    /// Flag that observers must be re-evaluated
    pub fn mark_viewport_dirty(&mut self) {
        self.viewport_dirty = true;
    }

    pub(crate) fn take_viewport_dirty(&mut self) -> bool {
        std::mem::take(&mut self.viewport_dirty)
    }

    /// Serializable summary of the visible page state
    pub fn snapshot(&self) -> PageSnapshot {
        let classes = &self.settings.classes;
        let doc = &self.document;

        let nav_stuck = self
            .registry
            .first(Region::Nav)
            .is_some_and(|nav| doc.has_class(nav, &classes.sticky));

        let (current_slide, active_dot) = if self.initialized && !self.carousel.is_empty() {
            let active_dot = self.registry.first(Region::DotContainer).and_then(|c| {
                doc.children(c)
                    .iter()
                    .find(|&&d| doc.has_class(d, &classes.dot_active))
                    .and_then(|&d| doc.attr(d, "data-slide"))
                    .and_then(|s| s.parse().ok())
            });
            (Some(self.carousel.current()), active_dot)
        } else {
            (None, None)
        };

        let active_tab = self
            .registry
            .lookup(Region::Tab)
            .iter()
            .copied()
            .find(|&t| doc.has_class(t, &classes.tab_active));

        let revealed_sections = if self.initialized {
            self.registry
                .lookup(Region::Section)
                .iter()
                .copied()
                .filter(|&s| !doc.has_class(s, &classes.section_hidden))
                .collect()
        } else {
            Vec::new()
        };

        let swapped_images: Vec<NodeId> = self
            .registry
            .lookup(Region::LazyImage)
            .iter()
            .copied()
            .filter(|&img| {
                let src = doc.attr(img, "src");
                src.is_some() && src == doc.data(img, "src")
            })
            .collect();

        let loaded_images = swapped_images
            .iter()
            .copied()
            .filter(|&img| !doc.has_class(img, &classes.lazy_placeholder))
            .collect();

        PageSnapshot {
            initialized: self.initialized,
            modal: self.modal,
            current_slide,
            active_dot,
            active_tab,
            active_tab_label: active_tab.and_then(|t| doc.data(t, "tab").map(str::to_string)),
            scroll_y: self.viewport.scroll_y,
            scrolling: self.is_scrolling(),
            nav_stuck,
            revealed_sections,
            swapped_images,
            loaded_images,
            cookie_banner: self
                .cookie_banner
                .is_some_and(|banner| doc.is_connected(banner)),
        }
    }
}

/// Point-in-time summary of controller-visible state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub initialized: bool,
    pub modal: ModalState,
    pub current_slide: Option<usize>,
    pub active_dot: Option<usize>,
    pub active_tab: Option<NodeId>,
    pub active_tab_label: Option<String>,
    pub scroll_y: f64,
    pub scrolling: bool,
    pub nav_stuck: bool,
    pub revealed_sections: Vec<NodeId>,
    pub swapped_images: Vec<NodeId>,
    pub loaded_images: Vec<NodeId>,
    pub cookie_banner: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_core::parse_page;

    #[test]
    fn test_scroll_animation_reaches_target() {
        let mut anim = ScrollAnimation::new(0.0, 800.0, 4);
        let mut last = 0.0;
        let mut positions = Vec::new();
        while !anim.is_done() {
            let y = anim.advance();
            assert!(y >= last);
            last = y;
            positions.push(y);
        }
        assert_eq!(positions.len(), 4);
        assert_eq!(last, 800.0);
    }

    #[test]
    fn test_scroll_animation_single_frame() {
        let mut anim = ScrollAnimation::new(100.0, 50.0, 0);
        assert_eq!(anim.advance(), 50.0);
        assert!(anim.is_done());
    }

    #[test]
    fn test_set_scroll_clamps_and_marks_dirty() {
        let page = parse_page(
            r#"
[viewport]
width = 1000
height = 800

[[element]]
tag = "section"
rect = { width = 1000, height = 2000 }
"#,
        )
        .unwrap();
        let mut state = PageState::new(page, Settings::default()).unwrap();

        assert!(state.set_scroll(5000.0));
        assert_eq!(state.viewport.scroll_y, 1200.0);
        assert!(state.take_viewport_dirty());
        assert!(!state.take_viewport_dirty());

        assert!(!state.set_scroll(1200.0));
        assert!(!state.take_viewport_dirty());
    }

    #[test]
    fn test_snapshot_before_init() {
        let page = parse_page("").unwrap();
        let state = PageState::new(page, Settings::default()).unwrap();
        let snap = state.snapshot();
        assert!(!snap.initialized);
        assert_eq!(snap.modal, ModalState::Closed);
        assert_eq!(snap.current_slide, None);
        assert!(snap.revealed_sections.is_empty());
        assert!(!snap.cookie_banner);
    }

    #[test]
    fn test_snapshot_serializes_for_dumps() {
        let page = parse_page("").unwrap();
        let state = PageState::new(page, Settings::default()).unwrap();
        let value = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(value["modal"], "closed");
        assert_eq!(value["current_slide"], serde_json::Value::Null);
        assert_eq!(value["revealed_sections"], serde_json::json!([]));
    }
}
