//! Widgets, the panels bound to them, and the page they are laid out on.
//!
//! A widget is an [`observable::Observable`]; each panel is an
//! [`observable::Observer`] of exactly one widget and rebuilds its view
//! synchronously whenever that widget's value changes.

pub mod layout;
pub mod observable;
pub mod panels;

pub use layout::{Block, Dashboard, PanelKind, LAYOUT};
