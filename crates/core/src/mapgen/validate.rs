//! Structural checks for a flattened map graph.

use thiserror::Error;

use super::model::MapNode;
use crate::types::NodeType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("node at position {position} carries index {index}")]
    IndexGap { position: usize, index: usize },
    #[error("node {from} connects backwards to node {to}")]
    BackwardConnection { from: usize, to: usize },
    #[error("node {from} connects to missing node {to}")]
    DanglingConnection { from: usize, to: usize },
    #[error("node {index} has no incoming connection")]
    Unreachable { index: usize },
}

/// Checks sequential indices, forward-only edges, and that every node past the
/// entry has an incoming edge. An empty map is valid.
pub fn validate_map(nodes: &[MapNode]) -> Result<(), MapError> {
    let mut has_incoming = vec![false; nodes.len()];

    for (position, node) in nodes.iter().enumerate() {
        if node.index != position {
            return Err(MapError::IndexGap { position, index: node.index });
        }
        for &target in &node.connections {
            if target <= node.index {
                return Err(MapError::BackwardConnection { from: node.index, to: target });
            }
            if target >= nodes.len() {
                return Err(MapError::DanglingConnection { from: node.index, to: target });
            }
            has_incoming[target] = true;
        }
    }

    if let Some(index) = has_incoming.iter().skip(1).position(|&reached| !reached) {
        return Err(MapError::Unreachable { index: index + 1 });
    }
    Ok(())
}

pub fn boss_count(nodes: &[MapNode]) -> usize {
    nodes.iter().filter(|node| node.node_type() == NodeType::Boss).count()
}
