//! # scope-keys
//!
//! Translates raw key events into application actions for the topology
//! viewer.
//!
//! The layers, leaf first:
//! - [`classifier`]: pure mapping from `(RawKeyEvent, Context)` to actions.
//! - [`context`]: read interface over the flags that gate classification.
//! - [`bridge`]: classifies with the current context and feeds a sink.
//! - [`lifecycle`]: scoped channel registration plus one-time startup calls.

pub mod bridge;
pub mod classifier;
pub mod context;
pub mod lifecycle;

pub use bridge::{ActionSink, EventDispatchBridge, EventOutcome};
pub use classifier::{Classification, classify};
pub use context::{ContextCell, ContextGate, ContextReader};
pub use lifecycle::{DataFetcher, EventSource, LifecycleCoordinator, Router, SubscriptionId};
