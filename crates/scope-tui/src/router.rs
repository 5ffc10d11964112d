//! Startup collaborators: the router and the data-fetch request log.
//!
//! The terminal host has no URL bar and no backend connection. The router
//! records how it was started and the request log records what the viewer
//! asked for, which the status line shows.

use scope_common::config::{AddressingMode, RouterConfig};
use scope_common::constants::HASHBANG_PREFIX;
use scope_common::types::TopologyOptions;
use scope_keys::{DataFetcher, Router};

/// Reads the topology out of a `#!/topology/<id>?k=v&...` fragment.
///
/// Returns `None` for anything else.
pub fn parse_route(fragment: &str) -> Option<TopologyOptions> {
    let rest = fragment.strip_prefix(HASHBANG_PREFIX)?;
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    let topology = path.strip_prefix("topology/")?.trim_end_matches('/');
    if topology.is_empty() || topology.contains('/') {
        return None;
    }
    let options = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Some(TopologyOptions {
        topology: topology.to_string(),
        options,
    })
}

/// Router for the terminal host.
#[derive(Debug, Default)]
pub struct HashRouter {
    mode: Option<AddressingMode>,
}

impl HashRouter {
    /// Creates a router that has not started.
    #[must_use]
    pub const fn new() -> Self {
        Self { mode: None }
    }

    /// Addressing mode the router was started with.
    pub const fn mode(&self) -> Option<AddressingMode> {
        self.mode
    }
}

impl Router for HashRouter {
    fn start(&mut self, config: &RouterConfig) {
        if self.mode.is_some() {
            tracing::warn!("router already started");
            return;
        }
        self.mode = Some(config.addressing_mode);
        tracing::info!(mode = ?config.addressing_mode, "router started");
    }
}

/// A data request issued at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Topology list for the given options.
    Topologies(TopologyOptions),
    /// API details.
    ApiDetails,
}

/// Records fire-and-forget data requests.
#[derive(Debug, Default)]
pub struct RequestLog {
    requests: Vec<Request>,
}

impl RequestLog {
    /// Requests in issue order.
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// One-line summary for the status bar.
    pub fn summary(&self) -> String {
        if self.requests.is_empty() {
            return "no requests".to_string();
        }
        self.requests
            .iter()
            .map(|r| match r {
                Request::Topologies(opts) => format!("topologies({})", opts.topology),
                Request::ApiDetails => "api".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl DataFetcher for RequestLog {
    fn fetch_topologies(&mut self, options: &TopologyOptions) {
        tracing::info!(topology = %options.topology, "topologies requested");
        self.requests.push(Request::Topologies(options.clone()));
    }

    fn fetch_api_details(&mut self) {
        tracing::info!("api details requested");
        self.requests.push(Request::ApiDetails);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_topology_fragment() {
        let opts = parse_route("#!/topology/hosts").expect("route");
        assert_eq!(opts, TopologyOptions::for_topology("hosts"));
    }

    #[test]
    fn parses_topology_options() {
        let opts = parse_route("#!/topology/containers?system=all&stopped=running").expect("route");
        assert_eq!(opts.topology, "containers");
        assert_eq!(
            opts.options,
            vec![
                ("system".to_string(), "all".to_string()),
                ("stopped".to_string(), "running".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_other_fragments() {
        assert!(parse_route("").is_none());
        assert!(parse_route("#/topology/hosts").is_none());
        assert!(parse_route("#!/state/abc").is_none());
        assert!(parse_route("#!/topology/").is_none());
    }

    #[test]
    fn router_starts_once() {
        let mut router = HashRouter::new();
        router.start(&RouterConfig::default());
        router.start(&RouterConfig {
            addressing_mode: AddressingMode::Path,
        });
        assert_eq!(router.mode(), Some(AddressingMode::Hashbang));
    }

    #[test]
    fn request_log_summarizes_in_order() {
        let mut log = RequestLog::default();
        assert_eq!(log.summary(), "no requests");
        log.fetch_topologies(&TopologyOptions::for_topology("pods"));
        log.fetch_api_details();
        assert_eq!(log.summary(), "topologies(pods), api");
        assert_eq!(log.requests().len(), 2);
    }
}
