//! UI state store.
//!
//! Reduces dispatched actions into view state and publishes the flags the
//! classifier depends on through a [`ContextCell`]. The store is the only
//! writer of that cell.

use scope_common::config::ScopeConfig;
use scope_common::constants::DEFAULT_TOPOLOGY;
use scope_common::types::{Action, Context, MetricId, StartupState, TopologyOptions};
use scope_keys::{ActionSink, ContextCell, ContextReader};

use crate::router::parse_route;

/// Text input that owns Press characters while focused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    /// Keyboard focus is in the box.
    pub focused: bool,
    /// Current query.
    pub query: String,
}

/// Root application state for the terminal host.
#[derive(Debug)]
pub struct App {
    /// Whether the app should continue running.
    pub running: bool,
    /// Grid layout instead of the graph.
    pub grid_mode: bool,
    /// Help overlay is visible.
    pub showing_help: bool,
    /// Search box state.
    pub search: SearchBox,
    /// Metrics available for pinning, in cycling order.
    pub metrics: Vec<MetricId>,
    /// Index into `metrics` of the pinned metric.
    pub pinned: Option<usize>,
    /// Selected metric.
    pub selected_metric: Option<MetricId>,
    /// Open terminal pipes, newest last.
    pub control_pipes: Vec<String>,
    /// The initial route set the topology.
    pub route_set: bool,
    /// Active topology.
    pub topology: TopologyOptions,
    /// Number of forced redraws requested.
    pub refreshes: u64,
    /// Last action reduced, for the status line.
    pub last_action: Option<Action>,
    context: ContextCell,
}

impl App {
    /// Creates the store from configuration, applying the initial route.
    #[must_use]
    pub fn new(config: &ScopeConfig) -> Self {
        let route = config.initial_route.as_deref().and_then(parse_route);
        if let (Some(fragment), None) = (&config.initial_route, &route) {
            tracing::warn!(%fragment, "ignoring unrecognized initial route");
        }
        Self {
            running: true,
            grid_mode: false,
            showing_help: false,
            search: SearchBox::default(),
            metrics: config.metrics.iter().map(MetricId::new).collect(),
            pinned: None,
            selected_metric: None,
            control_pipes: Vec::new(),
            route_set: route.is_some(),
            topology: route.unwrap_or_else(|| TopologyOptions::for_topology(DEFAULT_TOPOLOGY)),
            refreshes: 0,
            last_action: None,
            context: ContextCell::default(),
        }
    }

    /// Read handle for the classifier's context.
    pub fn context_reader(&self) -> ContextReader {
        self.context.reader()
    }

    /// Current context as published.
    pub fn context(&self) -> Context {
        self.context.get()
    }

    /// Values the lifecycle coordinator reads on activation.
    pub fn startup_state(&self) -> StartupState {
        StartupState {
            route_set: self.route_set,
            topology_options: self.topology.clone(),
        }
    }

    /// The pinned metric, if any.
    pub fn pinned_metric(&self) -> Option<&MetricId> {
        self.pinned.and_then(|i| self.metrics.get(i))
    }

    /// Signals the app to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Types a character into the focused search box.
    pub fn search_input(&mut self, c: char) {
        if self.search.focused && !c.is_control() {
            self.search.query.push(c);
        }
    }

    /// Opens a terminal pipe over the topology.
    pub fn open_terminal(&mut self, name: impl Into<String>) {
        self.control_pipes.push(name.into());
        self.publish();
    }

    /// Closes the newest terminal pipe.
    pub fn close_terminal(&mut self) {
        let _ = self.control_pipes.pop();
        self.publish();
    }

    /// Applies one action.
    pub fn reduce(&mut self, action: Action) {
        match &action {
            Action::FocusSearch => self.search.focused = true,
            Action::PinNextMetric(dir) => self.pin_next(dir.delta()),
            Action::UnpinMetric => self.pinned = None,
            Action::SelectMetric(id) => self.selected_metric.clone_from(id),
            Action::ToggleGridMode => self.grid_mode = !self.grid_mode,
            Action::ToggleHelp => self.showing_help = !self.showing_help,
            Action::HitEsc => self.escape(),
            Action::HitEnter => self.search.focused = false,
            Action::HitBackspace => {
                if self.search.focused {
                    let _ = self.search.query.pop();
                }
            }
            Action::ForceRefresh => self.refreshes += 1,
        }
        tracing::debug!(%action, "reduced");
        self.last_action = Some(action);
        self.publish();
    }

    fn pin_next(&mut self, delta: i8) {
        let len = self.metrics.len();
        if len == 0 {
            return;
        }
        self.pinned = Some(match (self.pinned, delta >= 0) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }

    // closes the topmost layer only
    fn escape(&mut self) {
        if self.showing_help {
            self.showing_help = false;
        } else if self.search.focused {
            self.search.focused = false;
            self.search.query.clear();
        } else if !self.control_pipes.is_empty() {
            let _ = self.control_pipes.pop();
        } else {
            self.selected_metric = None;
        }
    }

    fn publish(&self) {
        self.context.publish(Context {
            search_focused: self.search.focused,
            terminal_showing: !self.control_pipes.is_empty(),
        });
    }
}

impl ActionSink for App {
    fn dispatch(&mut self, action: Action) {
        self.reduce(action);
    }
}
