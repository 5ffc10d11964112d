//! # scope-tui
//!
//! Interactive terminal host for the topology viewer's keyboard layer.
//!
//! Built with `ratatui` and `crossterm`, providing:
//! - A crossterm-backed event source with Press and Up channels.
//! - The UI state store that reduces dispatched actions.
//! - Minimal router and data-fetch collaborators for startup.
//! - Views for the topology panel, metric selector, search box, and help.

pub mod app;
pub mod event;
pub mod router;
pub mod runner;
pub mod ui;
