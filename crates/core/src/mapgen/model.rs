//! Public data models for generated adventure maps and their node payloads.

use std::hash::Hasher;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use crate::types::NodeType;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub enemy_id: String,
    pub level: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleNodeData {
    pub enemies: Vec<EnemySpawn>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventNodeData {
    pub event_id: String,
}

/// Node type together with the payload that type carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NodeKind {
    Battle(BattleNodeData),
    Elite(BattleNodeData),
    Boss(BattleNodeData),
    Shop,
    Event(EventNodeData),
    Rest,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Battle(_) => NodeType::Battle,
            NodeKind::Elite(_) => NodeType::Elite,
            NodeKind::Boss(_) => NodeType::Boss,
            NodeKind::Shop => NodeType::Shop,
            NodeKind::Event(_) => NodeType::Event,
            NodeKind::Rest => NodeType::Rest,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapNode {
    pub index: usize,
    pub kind: NodeKind,
    pub completed: bool,
    /// Indices of successor nodes, ascending and always greater than `index`.
    pub connections: Vec<usize>,
}

impl MapNode {
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn battle(&self) -> Option<&BattleNodeData> {
        match &self.kind {
            NodeKind::Battle(data) | NodeKind::Elite(data) | NodeKind::Boss(data) => Some(data),
            NodeKind::Shop | NodeKind::Event(_) | NodeKind::Rest => None,
        }
    }

    pub fn event_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Event(data) => Some(&data.event_id),
            _ => None,
        }
    }
}

/// Stable digest of node types, payloads, and connections.
/// Completion flags are excluded so progress through a map does not change it.
pub fn map_fingerprint(nodes: &[MapNode]) -> u64 {
    let mut hasher = Xxh3::new();
    hasher.write_u64(nodes.len() as u64);
    for node in nodes {
        hasher.write_u64(node.index as u64);
        hasher.write(node.node_type().as_str().as_bytes());
        if let Some(battle) = node.battle() {
            hasher.write_u32(battle.enemies.len() as u32);
            for enemy in &battle.enemies {
                hasher.write(enemy.enemy_id.as_bytes());
                hasher.write_u32(enemy.level);
            }
        }
        if let Some(event_id) = node.event_id() {
            hasher.write(event_id.as_bytes());
        }
        hasher.write_u32(node.connections.len() as u32);
        for &target in &node.connections {
            hasher.write_u64(target as u64);
        }
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_node(index: usize, connections: Vec<usize>) -> MapNode {
        MapNode {
            index,
            kind: NodeKind::Event(EventNodeData { event_id: "fairy_ring".to_string() }),
            completed: false,
            connections,
        }
    }

    #[test]
    fn node_payload_serializes_as_type_tagged_union() {
        let node = MapNode {
            index: 3,
            kind: NodeKind::Elite(BattleNodeData {
                enemies: vec![EnemySpawn { enemy_id: "orc_brute".to_string(), level: 4 }],
            }),
            completed: false,
            connections: vec![5, 6],
        };
        let json = serde_json::to_value(&node).expect("serialize node");
        assert_eq!(json["kind"]["type"], "elite");
        assert_eq!(json["kind"]["data"]["enemies"][0]["enemy_id"], "orc_brute");

        let shop = serde_json::to_value(NodeKind::Shop).expect("serialize shop");
        assert_eq!(shop["type"], "shop");
        let decoded: NodeKind = serde_json::from_value(shop).expect("deserialize shop");
        assert_eq!(decoded, NodeKind::Shop);
    }

    #[test]
    fn accessors_resolve_payload_by_type() {
        let node = event_node(0, vec![1]);
        assert_eq!(node.node_type(), NodeType::Event);
        assert_eq!(node.event_id(), Some("fairy_ring"));
        assert!(node.battle().is_none());
    }

    #[test]
    fn fingerprint_ignores_completion_but_tracks_connections() {
        let base = vec![event_node(0, vec![1]), event_node(1, Vec::new())];
        let mut completed = base.clone();
        completed[0].completed = true;
        assert_eq!(map_fingerprint(&base), map_fingerprint(&completed));

        let mut rewired = base.clone();
        rewired[0].connections.clear();
        assert_ne!(map_fingerprint(&base), map_fingerprint(&rewired));
    }
}
