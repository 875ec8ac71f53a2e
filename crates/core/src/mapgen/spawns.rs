//! Placement of treasure, monsters, arrows, thieves and pits under per-kind exclusivity rules.
//! Every draw is without replacement from the eligible pool of its kind.

use tracing::debug;

use crate::config::DungeonConfig;
use crate::random::{RandomSource, roll_inclusive, take_random};
use crate::types::{NodeId, Treasure};

use super::model::{Monster, Node};

const MIN_UNITS_PER_NODE: usize = 1;
const MAX_UNITS_PER_NODE: usize = 5;

/// How many nodes of each kind received something.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementSummary {
    pub treasure_nodes: usize,
    pub monsters: usize,
    pub arrow_nodes: usize,
    pub thieves: usize,
    pub pits: usize,
}

pub(super) struct SpawnContext<'a> {
    pub(super) config: &'a DungeonConfig,
    pub(super) start: NodeId,
    pub(super) end: NodeId,
}

pub(super) fn place_entities(
    context: &SpawnContext<'_>,
    nodes: &mut [Node],
    random: &mut dyn RandomSource,
) -> PlacementSummary {
    let summary = PlacementSummary {
        treasure_nodes: place_treasure(context, nodes, random),
        monsters: place_monsters(context, nodes, random),
        arrow_nodes: place_arrows(context, nodes, random),
        thieves: place_thieves(context, nodes, random),
        pits: place_pits(context, nodes, random),
    };
    debug!(?summary, "entities placed");
    summary
}

/// `ceil(caves * percentage / 100)`.
pub(super) fn percentage_quota(cave_count: usize, percentage: u32) -> usize {
    (cave_count * percentage as usize).div_ceil(100)
}

fn pool(nodes: &[Node], eligible: impl Fn(&Node) -> bool) -> Vec<NodeId> {
    nodes.iter().filter(|node| eligible(*node)).map(|node| node.id).collect()
}

fn cave_count(nodes: &[Node]) -> usize {
    nodes.iter().filter(|node| node.is_cave()).count()
}

fn place_treasure(
    context: &SpawnContext<'_>,
    nodes: &mut [Node],
    random: &mut dyn RandomSource,
) -> usize {
    let quota = percentage_quota(cave_count(nodes), context.config.treasure_percentage);
    let mut eligible = pool(nodes, Node::is_cave);
    let mut placed = 0;
    for _ in 0..quota {
        let Some(id) = take_random(random, &mut eligible) else {
            break;
        };
        let units = roll_inclusive(random, MIN_UNITS_PER_NODE, MAX_UNITS_PER_NODE);
        for _ in 0..units {
            let treasure = Treasure::from_index(random.next_below(Treasure::COUNT));
            nodes[id].treasure.push(treasure);
        }
        placed += 1;
    }
    placed
}

fn place_monsters(
    context: &SpawnContext<'_>,
    nodes: &mut [Node],
    random: &mut dyn RandomSource,
) -> usize {
    nodes[context.end].monster = Some(Monster::default());

    let mut eligible =
        pool(nodes, |node| node.is_cave() && node.id != context.start && node.id != context.end);
    let extra = (context.config.monsters as usize).saturating_sub(1).min(eligible.len());
    for _ in 0..extra {
        if let Some(id) = take_random(random, &mut eligible) {
            nodes[id].monster = Some(Monster::default());
        }
    }
    1 + extra
}

fn place_arrows(
    context: &SpawnContext<'_>,
    nodes: &mut [Node],
    random: &mut dyn RandomSource,
) -> usize {
    // Arrows share the treasure percentage but may land on any node.
    let quota = percentage_quota(cave_count(nodes), context.config.treasure_percentage);
    let mut eligible = pool(nodes, |_| true);
    let mut placed = 0;
    for _ in 0..quota {
        let Some(id) = take_random(random, &mut eligible) else {
            break;
        };
        nodes[id].arrows += roll_inclusive(random, MIN_UNITS_PER_NODE, MAX_UNITS_PER_NODE);
        placed += 1;
    }
    placed
}

fn place_thieves(
    context: &SpawnContext<'_>,
    nodes: &mut [Node],
    random: &mut dyn RandomSource,
) -> usize {
    let mut eligible = pool(nodes, Node::is_tunnel);
    let quota = (context.config.thieves as usize).min(eligible.len());
    for _ in 0..quota {
        if let Some(id) = take_random(random, &mut eligible) {
            nodes[id].thief = true;
        }
    }
    quota
}

fn place_pits(
    context: &SpawnContext<'_>,
    nodes: &mut [Node],
    random: &mut dyn RandomSource,
) -> usize {
    let mut eligible = pool(nodes, |node| node.is_cave() && node.id != context.start);
    let quota = (context.config.pits as usize).min(eligible.len());
    for _ in 0..quota {
        if let Some(id) = take_random(random, &mut eligible) {
            nodes[id].pit = true;
        }
    }
    quota
}
