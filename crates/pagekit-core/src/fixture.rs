//! Page fixtures: TOML descriptions of a document and its viewport
//!
//! ```toml
//! [viewport]
//! width = 1200
//! height = 800
//!
//! [[element]]
//! tag = "header"
//! class = ["header"]
//! rect = { y = 0, width = 1200, height = 800 }
//!
//!   [[element.children]]
//!   tag = "nav"
//!   class = ["nav"]
//!   rect = { width = 1200, height = 90 }
//! ```
//!
//! Rectangles are in document coordinates; children do not inherit their
//! parent's offset.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::dom::{Document, Element, NodeId};
use crate::error::{Error, Result};
use crate::geometry::{Rect, Viewport};

#[derive(Debug, Clone, Deserialize)]
struct PageFixture {
    #[serde(default)]
    viewport: Viewport,

    #[serde(default, rename = "element")]
    elements: Vec<ElementFixture>,
}

#[derive(Debug, Clone, Deserialize)]
struct ElementFixture {
    tag: String,

    #[serde(default)]
    id: Option<String>,

    #[serde(default)]
    class: Vec<String>,

    #[serde(default)]
    attrs: BTreeMap<String, String>,

    #[serde(default)]
    text: Option<String>,

    #[serde(default)]
    rect: Rect,

    #[serde(default)]
    children: Vec<ElementFixture>,
}

/// A loaded page: the document plus the initial viewport
#[derive(Debug, Clone)]
pub struct Page {
    pub document: Document,
    pub viewport: Viewport,
}

/// Parse a page fixture from TOML source
pub fn parse_page(source: &str) -> Result<Page> {
    let fixture: PageFixture = toml::from_str(source)?;

    if fixture.viewport.width <= 0.0 || fixture.viewport.height <= 0.0 {
        return Err(Error::fixture("viewport width and height must be positive"));
    }

    let mut document = Document::new();
    let root = document.root();
    for element in &fixture.elements {
        build(&mut document, root, element)?;
    }

    debug!(
        "Parsed page fixture: {} elements, viewport {}x{}",
        document.len() - 1,
        fixture.viewport.width,
        fixture.viewport.height
    );

    Ok(Page {
        document,
        viewport: fixture.viewport,
    })
}

/// Load a page fixture from a file
pub fn load_page(path: &Path) -> Result<Page> {
    if !path.exists() {
        return Err(Error::fixture_not_found(path));
    }
    let source = std::fs::read_to_string(path)?;
    parse_page(&source)
}

fn build(document: &mut Document, parent: NodeId, fixture: &ElementFixture) -> Result<()> {
    if fixture.tag.trim().is_empty() {
        return Err(Error::fixture("element with empty tag"));
    }

    let mut element = Element::new(fixture.tag.trim());
    element.id = fixture.id.clone();
    element.classes = fixture.class.clone();
    element.attrs = fixture.attrs.clone();
    element.text = fixture.text.clone();
    element.rect = fixture.rect;

    let node = document.create_element(element);
    document.append_child(parent, node)?;

    for child in &fixture.children {
        build(document, node, child)?;
    }
    Ok(())
}
