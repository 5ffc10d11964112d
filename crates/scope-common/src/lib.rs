//! # scope-common
//!
//! Shared key-event types, error definitions, configuration models, and
//! constants used across the scope-keys workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the primitives the classifier, the terminal
//! host, and the CLI all agree on.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
