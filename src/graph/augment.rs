use crate::graph::augmenting_path::AugmentingPath;
use crate::graph::network::ResidualNetwork;
use crate::types::Capacity;

/// Pushes the bottleneck amount along `path` and returns it.
///
/// Each arc on the path gains the bottleneck, each inverse loses it.
/// An empty path carries nothing.
pub fn augment(network: &mut ResidualNetwork, path: &AugmentingPath) -> Capacity {
    let bottleneck = bottleneck(network, path);
    if bottleneck > 0 {
        for index in path.arcs() {
            network.push_flow(*index, bottleneck);
        }
    }
    bottleneck
}

pub fn bottleneck(network: &ResidualNetwork, path: &AugmentingPath) -> Capacity {
    path.arcs()
        .iter()
        .map(|index| network.arc(*index).residual())
        .min()
        .unwrap_or(0)
}
