// Handlers for the CLI subcommands.
//
// main.rs parses arguments and dispatches here; each module owns one
// subcommand. Shared helpers for loading the network and phrasing errors live
// in this file.

pub mod distances;
pub mod mst;
pub mod route;
pub mod simulate;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use droneroute_lib::{load_network, resolve_network_path, Error as LibError, Network, RouteAlgorithm};

/// Algorithm names accepted by `--algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    /// Fewest hops within the battery ceiling.
    #[default]
    Bfs,
    /// Lowest cost within the battery ceiling.
    Dijkstra,
    /// Lowest cost ignoring the battery ceiling.
    FloydWarshall,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Bfs => RouteAlgorithm::Bfs,
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::FloydWarshall => RouteAlgorithm::FloydWarshall,
        }
    }
}

/// Resolve and load the network named by `--network`, the environment, or the default location.
pub fn load_network_from(target: Option<&Path>) -> Result<Network> {
    let path = resolve_network_path(target).context("failed to locate the network file")?;
    load_network(&path).with_context(|| format!("failed to load network from {}", path.display()))
}

/// Turn library errors into user-facing messages, adding suggestions for unknown nodes.
pub fn describe_error(err: LibError) -> anyhow::Error {
    match err {
        LibError::UnknownNode { name, suggestions } => {
            anyhow::anyhow!(format_unknown_node_message(&name, &suggestions))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_node_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown node '{}'.", name);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_node_message_lists_suggestions() {
        assert_eq!(format_unknown_node_message("Q", &[]), "Unknown node 'Q'.");
        assert_eq!(
            format_unknown_node_message("AAB", &["AAC".to_string()]),
            "Unknown node 'AAB'. Did you mean 'AAC'?"
        );
        assert_eq!(
            format_unknown_node_message("AAB", &["AAC".to_string(), "AAD".to_string()]),
            "Unknown node 'AAB'. Did you mean one of: 'AAC', 'AAD'?"
        );
    }

    #[test]
    fn algorithm_names_match_library_display() {
        for arg in AlgorithmArg::value_variants() {
            let name = arg.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, RouteAlgorithm::from(*arg).to_string());
        }
    }
}
