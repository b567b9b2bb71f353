//! Layered map generation: builds every act's layers, wires them, then flattens
//! the whole run into one index-sequential node list.

use tracing::debug;

use crate::content::{ActConfig, ContentPack, FALLBACK_EVENT_ID};
use crate::rng::SeededRng;
use crate::types::NodeType;

use super::model::{BattleNodeData, EnemySpawn, EventNodeData, MapNode, NodeKind};

const VARIANT_NODE_TYPES: [NodeType; 3] = [NodeType::Battle, NodeType::Event, NodeType::Shop];
const LAYER_LEVEL_STEP: f64 = 0.5;

/// A node whose successors are still positions inside the next layer.
struct PendingNode {
    kind: NodeKind,
    targets: Vec<usize>,
}

type Layer = Vec<PendingNode>;

pub struct MapGenerator<'a> {
    content: &'a ContentPack,
}

impl<'a> MapGenerator<'a> {
    pub fn new(content: &'a ContentPack) -> Self {
        Self { content }
    }

    pub fn generate(&self, rng: &mut SeededRng, floor: u32) -> Vec<MapNode> {
        let act_count = self.content.acts.len();
        let mut layers: Vec<Layer> = Vec::new();

        for (act_index, act) in self.content.acts.iter().enumerate() {
            let mut act_layers = self.build_act_layers(act, rng, floor);
            connect_layers(&mut act_layers, rng);
            if act_index + 1 < act_count
                && let Some(boss_layer) = act_layers.last_mut()
            {
                for boss in boss_layer.iter_mut() {
                    boss.targets = vec![0];
                }
            }
            layers.extend(act_layers);
        }

        let nodes = flatten_layers(layers);
        debug!(
            target: "autobattler::mapgen",
            floor,
            acts = act_count,
            nodes = nodes.len(),
            "map.generated"
        );
        nodes
    }

    fn build_act_layers(&self, act: &ActConfig, rng: &mut SeededRng, floor: u32) -> Vec<Layer> {
        let boss_layer_index = act.layer_template.len() + 1;
        let mut layers = Vec::with_capacity(boss_layer_index + 1);

        layers.push(vec![self.pending(act, NodeType::Battle, 0, rng, floor)]);

        for (offset, &leading_type) in act.layer_template.iter().enumerate() {
            let layer_index = offset + 1;
            let width = rng.next_int(2, 3) as usize;
            let mut layer = Vec::with_capacity(width);
            layer.push(self.pending(act, leading_type, layer_index, rng, floor));
            for _ in 1..width {
                let node_type = rng.pick(&VARIANT_NODE_TYPES).copied().unwrap_or(NodeType::Battle);
                layer.push(self.pending(act, node_type, layer_index, rng, floor));
            }
            layers.push(layer);
        }

        layers.push(vec![self.pending(act, NodeType::Boss, boss_layer_index, rng, floor)]);
        layers
    }

    fn pending(
        &self,
        act: &ActConfig,
        node_type: NodeType,
        layer_index: usize,
        rng: &mut SeededRng,
        floor: u32,
    ) -> PendingNode {
        let kind = self.node_kind(act, node_type, layer_index, rng, floor);
        PendingNode { kind, targets: Vec::new() }
    }

    fn node_kind(
        &self,
        act: &ActConfig,
        node_type: NodeType,
        layer_index: usize,
        rng: &mut SeededRng,
        floor: u32,
    ) -> NodeKind {
        let level = enemy_level(floor, layer_index, act.difficulty_multiplier);
        match node_type {
            NodeType::Battle => {
                let count = rng.next_int(2, 4) as usize;
                NodeKind::Battle(self.roll_roster(&act.enemy_pool, count, level, rng))
            }
            NodeType::Elite => {
                let count = rng.next_int(2, 3) as usize;
                NodeKind::Elite(self.roll_roster(&act.elite_pool, count, level, rng))
            }
            NodeType::Boss => {
                let mut roster = self.roll_roster(&act.boss_pool, 1, level, rng);
                let filler_count = rng.next_int(1, 2) as usize;
                let fillers = self.roll_roster(&act.enemy_pool, filler_count, level, rng);
                roster.enemies.extend(fillers.enemies);
                NodeKind::Boss(roster)
            }
            NodeType::Event => {
                let event_id = rng.pick(&act.event_pool).copied().unwrap_or(FALLBACK_EVENT_ID);
                NodeKind::Event(EventNodeData { event_id: event_id.to_string() })
            }
            NodeType::Shop => NodeKind::Shop,
            NodeType::Rest => NodeKind::Rest,
        }
    }

    fn roll_roster(
        &self,
        pool: &[&'static str],
        count: usize,
        level: u32,
        rng: &mut SeededRng,
    ) -> BattleNodeData {
        let fallback;
        let pool = if pool.is_empty() {
            fallback = self.content.all_enemy_ids();
            fallback.as_slice()
        } else {
            pool
        };

        let enemies = (0..count)
            .filter_map(|_| rng.pick(pool))
            .map(|id| EnemySpawn { enemy_id: (*id).to_string(), level })
            .collect();
        BattleNodeData { enemies }
    }
}

fn enemy_level(floor: u32, layer_index: usize, difficulty_multiplier: f64) -> u32 {
    let raw = (f64::from(floor) + layer_index as f64 * LAYER_LEVEL_STEP) * difficulty_multiplier;
    raw.round().max(1.0) as u32
}

fn connect_layers(layers: &mut [Layer], rng: &mut SeededRng) {
    for layer_index in 0..layers.len().saturating_sub(1) {
        let next_width = layers[layer_index + 1].len();
        if next_width == 0 {
            continue;
        }

        if next_width == 1 {
            for node in layers[layer_index].iter_mut() {
                node.targets = vec![0];
            }
            continue;
        }

        let next_positions: Vec<usize> = (0..next_width).collect();
        for node in layers[layer_index].iter_mut() {
            let count = rng.next_int(1, 2) as usize;
            let mut targets = rng.pick_n(&next_positions, count);
            targets.sort_unstable();
            targets.dedup();
            node.targets = targets;
        }

        // Repair pass: every node in the next layer must be reachable.
        let current_positions: Vec<usize> = (0..layers[layer_index].len()).collect();
        for position in 0..next_width {
            let reached =
                layers[layer_index].iter().any(|node| node.targets.contains(&position));
            if reached {
                continue;
            }
            if let Some(&source) = rng.pick(&current_positions) {
                let targets = &mut layers[layer_index][source].targets;
                targets.push(position);
                targets.sort_unstable();
            }
        }
    }
}

/// Indices are assigned here and nowhere else, once every layer width is final.
fn flatten_layers(layers: Vec<Layer>) -> Vec<MapNode> {
    let mut layer_starts = Vec::with_capacity(layers.len() + 1);
    let mut next_index = 0;
    for layer in &layers {
        layer_starts.push(next_index);
        next_index += layer.len();
    }
    layer_starts.push(next_index);

    let mut nodes = Vec::with_capacity(next_index);
    for (layer_index, layer) in layers.into_iter().enumerate() {
        let start = layer_starts[layer_index];
        let next_start = layer_starts[layer_index + 1];
        for (position, pending) in layer.into_iter().enumerate() {
            nodes.push(MapNode {
                index: start + position,
                kind: pending.kind,
                completed: false,
                connections: pending.targets.iter().map(|target| next_start + target).collect(),
            });
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::mapgen::model::map_fingerprint;
    use crate::mapgen::validate::{boss_count, validate_map};

    fn generate(seed: u32, floor: u32) -> Vec<MapNode> {
        let content = ContentPack::default();
        let mut rng = SeededRng::new(seed);
        MapGenerator::new(&content).generate(&mut rng, floor)
    }

    fn boss_indices(nodes: &[MapNode]) -> Vec<usize> {
        nodes
            .iter()
            .filter(|node| node.node_type() == NodeType::Boss)
            .map(|node| node.index)
            .collect()
    }

    #[test]
    fn same_seed_produces_identical_maps() {
        let left = generate(12_345, 1);
        let right = generate(12_345, 1);
        assert_eq!(left, right);
        assert_eq!(map_fingerprint(&left), map_fingerprint(&right));
    }

    #[test]
    fn different_seeds_diverge() {
        let fingerprints: BTreeSet<u64> =
            (0..8).map(|seed| map_fingerprint(&generate(seed, 1))).collect();
        assert!(fingerprints.len() > 1, "eight seeds should not all produce the same map");
    }

    #[test]
    fn generated_map_satisfies_graph_invariants() {
        let nodes = generate(12_345, 1);
        assert_eq!(validate_map(&nodes), Ok(()));
        assert_eq!(boss_count(&nodes), 3);
        assert!(nodes.iter().all(|node| !node.completed));
    }

    #[test]
    fn entry_node_has_no_incoming_edges() {
        let nodes = generate(12_345, 1);
        assert!(nodes.iter().all(|node| !node.connections.contains(&0)));
        assert_eq!(nodes[0].node_type(), NodeType::Battle);
    }

    #[test]
    fn bosses_close_each_act_and_link_to_the_next() {
        let nodes = generate(9_001, 1);
        let bosses = boss_indices(&nodes);
        let last = nodes.len() - 1;
        assert_eq!(bosses.last(), Some(&last), "final node must be the last boss");
        assert!(nodes[last].connections.is_empty());

        for &boss in &bosses[..bosses.len() - 1] {
            assert_eq!(nodes[boss].connections, vec![boss + 1]);
            assert_eq!(nodes[boss + 1].node_type(), NodeType::Battle);
            // Entry of the next act is only reachable through the boss.
            let feeders: Vec<usize> = nodes
                .iter()
                .filter(|node| node.connections.contains(&(boss + 1)))
                .map(|node| node.index)
                .collect();
            assert_eq!(feeders, vec![boss]);
        }
    }

    #[test]
    fn every_node_before_a_boss_converges_into_it() {
        let nodes = generate(4_242, 1);
        for boss in boss_indices(&nodes) {
            let feeders = nodes.iter().filter(|node| node.connections.contains(&boss)).count();
            assert!(feeders >= 2, "boss {boss} should be fed by the whole previous layer");
        }
    }

    #[test]
    fn boss_rosters_hold_one_boss_and_filler() {
        let content = ContentPack::default();
        let nodes = generate(77, 1);
        for (act, boss) in content.acts.iter().zip(boss_indices(&nodes)) {
            let roster = nodes[boss].battle().expect("boss carries a roster");
            let boss_members = roster
                .enemies
                .iter()
                .filter(|e| act.boss_pool.contains(&e.enemy_id.as_str()))
                .count();
            assert_eq!(boss_members, 1);
            assert!((2..=3).contains(&roster.enemies.len()));
        }
    }

    #[test]
    fn roster_sizes_follow_node_type() {
        for seed in [1_u32, 2, 3, 500, 65_535] {
            for node in generate(seed, 1) {
                let Some(roster) = node.battle() else { continue };
                let size = roster.enemies.len();
                match node.node_type() {
                    NodeType::Battle => assert!((2..=4).contains(&size)),
                    NodeType::Elite => assert!((2..=3).contains(&size)),
                    NodeType::Boss => assert!((2..=3).contains(&size)),
                    other => panic!("unexpected roster on {other:?}"),
                }
            }
        }
    }

    #[test]
    fn enemy_levels_scale_with_act_multiplier() {
        let nodes = generate(12_345, 1);
        let boss_levels: Vec<u32> = boss_indices(&nodes)
            .into_iter()
            .map(|index| nodes[index].battle().expect("boss roster").enemies[0].level)
            .collect();
        assert_eq!(boss_levels, vec![5, 8, 10]);

        let deeper = generate(12_345, 3);
        let deeper_boss = boss_indices(&deeper)[0];
        assert_eq!(deeper[deeper_boss].battle().expect("boss roster").enemies[0].level, 7);
    }

    #[test]
    fn empty_event_pool_falls_back_to_fixed_event() {
        let mut content = ContentPack::default();
        for act in &mut content.acts {
            act.event_pool.clear();
        }
        let mut rng = SeededRng::new(31);
        let nodes = MapGenerator::new(&content).generate(&mut rng, 1);
        let event_ids: BTreeSet<&str> = nodes.iter().filter_map(MapNode::event_id).collect();
        assert_eq!(event_ids, BTreeSet::from([FALLBACK_EVENT_ID]));
    }

    #[test]
    fn empty_enemy_pools_fall_back_to_full_enemy_table() {
        let mut content = ContentPack::default();
        for act in &mut content.acts {
            act.enemy_pool.clear();
            act.elite_pool.clear();
            act.boss_pool.clear();
        }
        let mut rng = SeededRng::new(8);
        let nodes = MapGenerator::new(&content).generate(&mut rng, 1);
        assert_eq!(validate_map(&nodes), Ok(()));
        for node in &nodes {
            if let Some(roster) = node.battle() {
                assert!(!roster.enemies.is_empty());
                assert!(
                    roster.enemies.iter().all(|e| content.enemies.contains_key(e.enemy_id.as_str()))
                );
            }
        }
    }

    #[test]
    fn interior_layers_hold_two_or_three_nodes() {
        let content = ContentPack::default();
        let template_layers: usize = content.acts.iter().map(|act| act.layer_template.len()).sum();
        let fixed_layers = content.acts.len() * 2;
        for seed in 0..20 {
            let nodes = generate(seed, 1);
            assert!(nodes.len() >= fixed_layers + template_layers * 2);
            assert!(nodes.len() <= fixed_layers + template_layers * 3);
        }
    }

    /// Recovers layers from the flat list: one layer's targets are exactly the next layer.
    fn split_layers(nodes: &[MapNode]) -> Vec<Vec<usize>> {
        let mut layers = vec![vec![0]];
        while let Some(current) = layers.last() {
            let targets: BTreeSet<usize> =
                current.iter().flat_map(|&i| nodes[i].connections.iter().copied()).collect();
            let (Some(&first), Some(&last)) = (targets.first(), targets.last()) else {
                break;
            };
            assert_eq!(targets.len(), last - first + 1, "next layer must be contiguous");
            layers.push((first..=last).collect());
        }
        layers
    }

    #[test]
    fn node_types_follow_act_templates() {
        let content = ContentPack::default();
        for seed in [0, 7, 12_345, 99_999, u32::MAX] {
            let nodes = generate(seed, 1);
            let layers = split_layers(&nodes);
            let flattened: Vec<usize> = layers.iter().flatten().copied().collect();
            assert_eq!(flattened, (0..nodes.len()).collect::<Vec<_>>());

            let mut remaining = layers.iter();
            for act in &content.acts {
                let entry = remaining.next().expect("entry layer");
                assert_eq!(entry.len(), 1);
                assert_eq!(nodes[entry[0]].node_type(), NodeType::Battle);

                for &leading in &act.layer_template {
                    let layer = remaining.next().expect("template layer");
                    assert!((2..=3).contains(&layer.len()), "seed {seed}: width {}", layer.len());
                    assert_eq!(nodes[layer[0]].node_type(), leading);
                    for &index in &layer[1..] {
                        assert!(VARIANT_NODE_TYPES.contains(&nodes[index].node_type()));
                    }
                }

                let boss = remaining.next().expect("boss layer");
                assert_eq!(boss.len(), 1);
                assert_eq!(nodes[boss[0]].node_type(), NodeType::Boss);
            }
            assert!(remaining.next().is_none());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn arbitrary_seeds_keep_every_node_reachable(seed in any::<u32>(), floor in 1_u32..=10) {
            let nodes = generate(seed, floor);
            prop_assert_eq!(validate_map(&nodes), Ok(()));
            prop_assert_eq!(boss_count(&nodes), 3);
            for node in &nodes {
                prop_assert!(node.connections.windows(2).all(|pair| pair[0] < pair[1]));
            }
        }
    }
}
