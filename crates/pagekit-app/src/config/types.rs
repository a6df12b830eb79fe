//! Configuration types for pagekit
//!
//! Defines:
//! - `Settings` - Top-level settings (`.pagekit/config.toml`)
//! - `MarkerSettings` - Structural selectors locating page regions
//! - `ClassSettings` - Visual-state class names toggled by controllers
//! - Tunables for observers, hover, scrolling, images and the cookie banner

use serde::{Deserialize, Serialize};

/// Application settings (.pagekit/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub markers: MarkerSettings,

    #[serde(default)]
    pub classes: ClassSettings,

    #[serde(default)]
    pub observers: ObserverSettings,

    #[serde(default)]
    pub hover: HoverSettings,

    #[serde(default)]
    pub scroll: ScrollSettings,

    #[serde(default)]
    pub images: ImageSettings,

    #[serde(default)]
    pub cookie: CookieSettings,
}

/// Selectors for every page region the controllers are wired to
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerSettings {
    pub modal: String,
    pub overlay: String,
    pub open_modal: String,
    pub close_modal: String,
    pub scroll_button: String,
    pub scroll_target: String,
    pub nav: String,
    pub nav_links: String,
    pub nav_link: String,
    pub nav_logo: String,
    pub header: String,
    pub section: String,
    pub lazy_image: String,
    pub slide: String,
    pub slider_left: String,
    pub slider_right: String,
    pub dot_container: String,
    pub tab: String,
    pub tab_container: String,
    pub tab_panel: String,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            modal: ".modal".to_string(),
            overlay: ".overlay".to_string(),
            open_modal: ".btn--show-modal".to_string(),
            close_modal: ".btn--close-modal".to_string(),
            scroll_button: ".btn--scroll-to".to_string(),
            scroll_target: "#section--1".to_string(),
            nav: ".nav".to_string(),
            nav_links: ".nav__links".to_string(),
            nav_link: ".nav__link".to_string(),
            nav_logo: ".nav__logo".to_string(),
            header: ".header".to_string(),
            section: ".section".to_string(),
            lazy_image: "img[data-src]".to_string(),
            slide: ".slide".to_string(),
            slider_left: ".slider__btn--left".to_string(),
            slider_right: ".slider__btn--right".to_string(),
            dot_container: ".dots".to_string(),
            tab: ".operations__tab".to_string(),
            tab_container: ".operations__tab-container".to_string(),
            tab_panel: ".operations__content".to_string(),
        }
    }
}

/// Class names used as visual-state markers
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassSettings {
    /// Hides the modal and overlay while closed
    pub hidden: String,
    /// Applied to the nav once the header scrolls out of view
    pub sticky: String,
    /// Applied to every section until it is revealed
    pub section_hidden: String,
    /// Blur placeholder on images that have not finished loading
    pub lazy_placeholder: String,
    pub dot: String,
    pub dot_active: String,
    pub tab_active: String,
    pub panel_active: String,
    /// Panel for tab label `X` carries `<panel_prefix>X`
    pub panel_prefix: String,
}

impl Default for ClassSettings {
    fn default() -> Self {
        Self {
            hidden: "hidden".to_string(),
            sticky: "sticky".to_string(),
            section_hidden: "section--hidden".to_string(),
            lazy_placeholder: "lazy-img".to_string(),
            dot: "dots__dot".to_string(),
            dot_active: "dots__dot--active".to_string(),
            tab_active: "operations__tab--active".to_string(),
            panel_active: "operations__content--active".to_string(),
            panel_prefix: "operations__content--".to_string(),
        }
    }
}

/// Boundary observer tunables
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObserverSettings {
    /// Lazy images start loading this many pixels before entering the viewport
    #[serde(default = "default_lazy_root_margin")]
    pub lazy_root_margin_px: f64,

    /// Fraction of a section that must be visible to reveal it
    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,

    /// Added to the nav height when computing the sticky trigger offset
    #[serde(default)]
    pub sticky_extra_offset_px: f64,
}

impl Default for ObserverSettings {
    fn default() -> Self {
        Self {
            lazy_root_margin_px: default_lazy_root_margin(),
            reveal_threshold: default_reveal_threshold(),
            sticky_extra_offset_px: 0.0,
        }
    }
}

fn default_lazy_root_margin() -> f64 {
    200.0
}

fn default_reveal_threshold() -> f64 {
    0.15
}

/// Nav hover emphasis
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HoverSettings {
    /// Opacity applied to sibling links and the logo while a link is hovered
    #[serde(default = "default_dim_opacity")]
    pub dim_opacity: f64,
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self {
            dim_opacity: default_dim_opacity(),
        }
    }
}

fn default_dim_opacity() -> f64 {
    0.5
}

/// Smooth scrolling
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrollSettings {
    /// Animation frames a smooth scroll takes (0 jumps instantly)
    #[serde(default = "default_smooth_frames")]
    pub smooth_frames: u32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            smooth_frames: default_smooth_frames(),
        }
    }
}

fn default_smooth_frames() -> u32 {
    12
}

/// Image fetching
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageSettings {
    /// Report a `load` event as soon as an image source is swapped.
    /// Disable to drive load completion manually from the host.
    #[serde(default = "default_true")]
    pub simulate_load: bool,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            simulate_load: true,
        }
    }
}

/// Dismissible cookie banner appended to the header
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CookieSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_cookie_message")]
    pub message: String,

    #[serde(default = "default_cookie_button")]
    pub button_text: String,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            message: default_cookie_message(),
            button_text: default_cookie_button(),
        }
    }
}

fn default_cookie_message() -> String {
    "We use cookies for improved functionality and analytics.".to_string()
}

fn default_cookie_button() -> String {
    "Got it!".to_string()
}

fn default_true() -> bool {
    true
}
