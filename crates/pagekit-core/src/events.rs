//! Host-dispatched input events
//!
//! These are the browser-level events a host feeds into the engine. Key
//! events target the document as a whole; pointer and load events target
//! a specific element and bubble through its ancestors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::NodeId;
use crate::error::Error;

/// Keyboard key, named the way browsers report `KeyboardEvent.key`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Tab,
    /// Printable character
    Char(char),
    /// Any other named key
    Other(String),
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "" => return Err(Error::command("empty key name")),
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Escape => write!(f, "Escape"),
            Key::ArrowLeft => write!(f, "ArrowLeft"),
            Key::ArrowRight => write!(f, "ArrowRight"),
            Key::ArrowUp => write!(f, "ArrowUp"),
            Key::ArrowDown => write!(f, "ArrowDown"),
            Key::Enter => write!(f, "Enter"),
            Key::Tab => write!(f, "Tab"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Event type a listener subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    KeyDown,
    MouseOver,
    MouseOut,
    Load,
}

/// A single host-dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    Click { target: NodeId },
    KeyDown { key: Key },
    MouseOver { target: NodeId },
    MouseOut { target: NodeId },
    /// A resource (image) finished loading
    Load { target: NodeId },
}

impl DomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::Click { .. } => EventKind::Click,
            DomEvent::KeyDown { .. } => EventKind::KeyDown,
            DomEvent::MouseOver { .. } => EventKind::MouseOver,
            DomEvent::MouseOut { .. } => EventKind::MouseOut,
            DomEvent::Load { .. } => EventKind::Load,
        }
    }

    /// Originating element; `None` for document-level key events
    pub fn target(&self) -> Option<NodeId> {
        match self {
            DomEvent::Click { target }
            | DomEvent::MouseOver { target }
            | DomEvent::MouseOut { target }
            | DomEvent::Load { target } => Some(*target),
            DomEvent::KeyDown { .. } => None,
        }
    }

    pub fn key(&self) -> Option<&Key> {
        match self {
            DomEvent::KeyDown { key } => Some(key),
            _ => None,
        }
    }

    /// Whether the event propagates from its target up to the root.
    /// `load` does not bubble in browsers.
    pub fn bubbles(&self) -> bool {
        !matches!(self, DomEvent::Load { .. })
    }
}
