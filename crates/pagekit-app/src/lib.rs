//! pagekit-app - Page controllers and orchestration for pagekit
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the page
//! controllers (modal, navigation, sticky nav, section reveal, lazy images,
//! carousel, tabs, cookie banner), the Engine that drives them, the element
//! registry and boundary observers, and configuration loading.

pub mod actions;
pub mod carousel_state;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod listeners;
pub mod message;
pub mod observer;
pub mod process;
pub mod registry;
pub mod state;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use registry::{ElementRegistry, Region, StaticRegistry};
pub use state::{ModalState, PageSnapshot, PageState};
