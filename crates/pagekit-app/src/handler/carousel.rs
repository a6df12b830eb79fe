//! Carousel handlers
//!
//! Index arithmetic lives in [`CarouselState`]; this module renders it onto
//! the slides and indicator dots and wires the triggers.

use pagekit_core::{Element, EventKind, NodeId};
use tracing::{debug, info, warn};

use crate::carousel_state::CarouselState;
use crate::listeners::{Listener, ListenerTarget};
use crate::registry::Region;
use crate::state::PageState;

/// Attribute carrying a dot's slide index
const SLIDE_ATTR: &str = "data-slide";

pub fn init(state: &mut PageState) {
    let slide_count = state.registry.lookup(Region::Slide).len();
    state.carousel = CarouselState::new(slide_count);
    if slide_count == 0 {
        debug!("Carousel disabled: no slides");
        return;
    }

    create_dots(state, slide_count);

    if let Some(next) = state.registry.first(Region::SliderNext) {
        state
            .listeners
            .add(ListenerTarget::Element(next), EventKind::Click, Listener::SlideNext);
    }
    if let Some(prev) = state.registry.first(Region::SliderPrev) {
        state
            .listeners
            .add(ListenerTarget::Element(prev), EventKind::Click, Listener::SlidePrevious);
    }
    state
        .listeners
        .add(ListenerTarget::Document, EventKind::KeyDown, Listener::SlideKeys);
    if let Some(dots) = state.registry.first(Region::DotContainer) {
        state
            .listeners
            .add(ListenerTarget::Element(dots), EventKind::Click, Listener::DotDelegate);
    }

    render(state);
}

/// One dot per slide, appended to the dot container
fn create_dots(state: &mut PageState, slide_count: usize) {
    let Some(container) = state.registry.first(Region::DotContainer) else {
        debug!("No dot container; slides render without indicators");
        return;
    };

    let class = state.settings.classes.dot.clone();
    for index in 0..slide_count {
        let dot = Element::new("button")
            .with_class(class.as_str())
            .with_attr(SLIDE_ATTR, index.to_string());
        let dot = state.document.create_element(dot);
        if let Err(e) = state.document.append_child(container, dot) {
            warn!("Failed to insert dot {}: {}", index, e);
        }
    }
}

pub fn next(state: &mut PageState) {
    if state.carousel.next() {
        changed(state);
    }
}

pub fn previous(state: &mut PageState) {
    if state.carousel.previous() {
        changed(state);
    }
}

/// Jump to a slide; out-of-range indices are ignored
pub fn go_to(state: &mut PageState, index: usize) {
    if state.carousel.go_to(index) {
        changed(state);
    } else {
        debug!("Ignoring slide {} of {}", index, state.carousel.slide_count());
    }
}

/// Delegated click on the dot container
pub fn handle_dot_click(state: &mut PageState, target: NodeId) {
    if !state.document.has_class(target, &state.settings.classes.dot) {
        return;
    }
    let Some(index) = state
        .document
        .attr(target, SLIDE_ATTR)
        .and_then(|s| s.parse::<usize>().ok())
    else {
        debug!("Dot {} has no slide index", target);
        return;
    };
    go_to(state, index);
}

fn changed(state: &mut PageState) {
    render(state);
    info!("Slide {} shown", state.carousel.current());
}

/// Position every slide relative to the current one and activate its dot
pub fn render(state: &mut PageState) {
    let slides = state.registry.lookup(Region::Slide).to_vec();
    for (index, slide) in slides.into_iter().enumerate() {
        let offset = state.carousel.offset_percent(index);
        state
            .document
            .set_style(slide, "transform", format!("translateX({offset}%)"));
    }

    let Some(container) = state.registry.first(Region::DotContainer) else {
        return;
    };
    let classes = &state.settings.classes;
    let current = state.carousel.current().to_string();
    let dots: Vec<(NodeId, bool)> = state
        .document
        .children(container)
        .iter()
        .copied()
        .filter(|&d| state.document.has_class(d, &classes.dot))
        .map(|d| (d, state.document.attr(d, SLIDE_ATTR) == Some(current.as_str())))
        .collect();

    let active = classes.dot_active.clone();
    for (dot, is_current) in dots {
        if is_current {
            state.document.add_class(dot, &active);
        } else {
            state.document.remove_class(dot, &active);
        }
    }
}
