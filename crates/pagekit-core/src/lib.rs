//! # pagekit-core - Core Domain Types
//!
//! Foundation crate for pagekit. Provides the in-memory page document,
//! structural selectors, layout geometry, host input events, page fixtures,
//! error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, toml, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Document (`dom`)
//! - [`Document`] - Arena of elements addressed by [`NodeId`]
//! - [`Element`] - Tag, classes, attributes, inline style and layout box
//!
//! ### Selectors (`selector`)
//! - [`Selector`] - Compound selector (`img[data-src]`, `.nav__link`, `#section--1`)
//!
//! ### Geometry (`geometry`)
//! - [`Rect`] - Layout box in document coordinates
//! - [`Viewport`] - Visible window and scroll offset
//!
//! ### Events (`events`)
//! - [`DomEvent`] - Click, key, hover and load events dispatched by the host
//! - [`Key`] - Browser key names
//!
//! ### Fixtures (`fixture`)
//! - [`parse_page()`], [`load_page()`] - Build a [`Page`] from TOML
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use pagekit_core::prelude::*;
//! ```

pub mod dom;
pub mod error;
pub mod events;
pub mod fixture;
pub mod geometry;
pub mod logging;
pub mod prelude;
pub mod selector;

// Re-export commonly used types at crate root for convenience
pub use dom::{Document, Element, NodeId};
pub use error::{Error, Result};
pub use events::{DomEvent, EventKind, Key};
pub use fixture::{load_page, parse_page, Page};
pub use geometry::{Rect, Viewport};
pub use selector::{AttrMatch, Selector};
