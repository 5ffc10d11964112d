//! Activation and deactivation of the root keyboard component.
//!
//! [`LifecycleCoordinator::activate`] subscribes the Press and Up channels
//! before it starts the router or triggers any fetch, so no key event is
//! lost during startup. [`LifecycleCoordinator::deactivate`] releases both
//! subscriptions synchronously; after it returns, [`LifecycleCoordinator::handle`]
//! delivers nothing.

use scope_common::config::RouterConfig;
use scope_common::error::Result;
use scope_common::types::{Channel, RawKeyEvent, StartupState, TopologyOptions};

use crate::bridge::{ActionSink, EventDispatchBridge, EventOutcome};
use crate::context::ContextGate;

/// Opaque handle returned by an [`EventSource`] subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wraps a source-specific identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the source-specific identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Host facility that delivers key events on the two channels.
///
/// Subscribing and unsubscribing must be symmetric. Unsubscribing an
/// unknown or already released id is a no-op.
pub trait EventSource {
    /// Starts delivering events for `channel`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot deliver that channel.
    fn subscribe(&mut self, channel: Channel) -> Result<SubscriptionId>;

    /// Stops delivering events for a previous subscription.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Client-side router. Failures are surfaced by the router itself.
pub trait Router {
    /// Starts routing with `config`.
    fn start(&mut self, config: &RouterConfig);
}

/// Fire-and-forget data requests.
pub trait DataFetcher {
    /// Requests the topology list for `options`.
    fn fetch_topologies(&mut self, options: &TopologyOptions);

    /// Requests API details (version, capabilities).
    fn fetch_api_details(&mut self);
}

#[derive(Debug, Clone, Copy)]
struct Subscriptions {
    press: SubscriptionId,
    up: SubscriptionId,
}

/// Owns the dispatch bridge and its channel registrations.
#[derive(Debug)]
pub struct LifecycleCoordinator<G> {
    bridge: EventDispatchBridge<G>,
    router_config: RouterConfig,
    subscriptions: Option<Subscriptions>,
}

impl<G: ContextGate> LifecycleCoordinator<G> {
    /// Creates an inactive coordinator.
    pub const fn new(bridge: EventDispatchBridge<G>, router_config: RouterConfig) -> Self {
        Self {
            bridge,
            router_config,
            subscriptions: None,
        }
    }

    /// Whether the channels are currently subscribed.
    pub const fn is_active(&self) -> bool {
        self.subscriptions.is_some()
    }

    /// Returns the bridge events are delivered to.
    pub const fn bridge(&self) -> &EventDispatchBridge<G> {
        &self.bridge
    }

    /// Subscribes both channels, then starts the router, requests the
    /// initial topologies unless a route already set them, and requests API
    /// details.
    ///
    /// Calling this while already active does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a channel cannot be subscribed. Any subscription
    /// made before the failure is released and no collaborator is called.
    pub fn activate(
        &mut self,
        source: &mut dyn EventSource,
        router: &mut dyn Router,
        fetcher: &mut dyn DataFetcher,
        startup: &StartupState,
    ) -> Result<()> {
        if self.subscriptions.is_some() {
            tracing::warn!("activate called while already active");
            return Ok(());
        }

        let press = source.subscribe(Channel::Press)?;
        let up = match source.subscribe(Channel::Up) {
            Ok(id) => id,
            Err(e) => {
                source.unsubscribe(press);
                return Err(e);
            }
        };
        self.subscriptions = Some(Subscriptions { press, up });
        tracing::debug!(press = press.get(), up = up.get(), "key channels subscribed");

        router.start(&self.router_config);
        if startup.route_set {
            tracing::debug!("route already set; skipping initial topology fetch");
        } else {
            fetcher.fetch_topologies(&startup.topology_options);
        }
        fetcher.fetch_api_details();
        tracing::info!(
            addressing_mode = ?self.router_config.addressing_mode,
            route_set = startup.route_set,
            "keyboard component activated"
        );
        Ok(())
    }

    /// Releases both subscriptions. Safe to call when never activated.
    pub fn deactivate(&mut self, source: &mut dyn EventSource) {
        let Some(subs) = self.subscriptions.take() else {
            return;
        };
        source.unsubscribe(subs.press);
        source.unsubscribe(subs.up);
        tracing::info!("keyboard component deactivated");
    }

    /// Delivers `raw` to the bridge while the channels are subscribed.
    /// Both channels are registered and released together.
    pub fn handle<S: ActionSink + ?Sized>(&self, raw: &RawKeyEvent, sink: &mut S) -> EventOutcome {
        if self.subscriptions.is_none() {
            tracing::trace!(channel = %raw.channel, "dropping event while inactive");
            return EventOutcome::default();
        }
        self.bridge.on_event(raw, sink)
    }
}
