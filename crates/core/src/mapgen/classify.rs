//! Turns realized edges into per-node exit flags and cave/tunnel labels.

use crate::types::{Direction, Exits};

use super::grid::Edge;
use super::model::Node;

/// Which exit the edge opens on (`source`, `dest`), resolved from the id difference.
pub(super) fn edge_directions(edge: Edge, rows: usize, columns: usize) -> (Direction, Direction) {
    let low = edge.source.min(edge.dest);
    let high = edge.source.max(edge.dest);
    let diff = high - low;
    let same_row = low / columns == high / columns;

    let (low_exit, high_exit) = if diff == 1 && same_row {
        (Direction::East, Direction::West)
    } else if diff == columns - 1 && same_row {
        (Direction::West, Direction::East)
    } else if diff == columns * (rows - 1) {
        (Direction::North, Direction::South)
    } else {
        debug_assert_eq!(diff, columns, "edge {edge:?} does not join grid neighbours");
        (Direction::South, Direction::North)
    };

    if edge.source == low { (low_exit, high_exit) } else { (high_exit, low_exit) }
}

pub(super) fn classify_nodes(edges: &[Edge], rows: usize, columns: usize) -> Vec<Node> {
    let mut exits = vec![Exits::default(); rows * columns];
    for &edge in edges {
        let (source_exit, dest_exit) = edge_directions(edge, rows, columns);
        exits[edge.source].open(source_exit);
        exits[edge.dest].open(dest_exit);
    }
    exits.into_iter().enumerate().map(|(id, node_exits)| Node::new(id, node_exits)).collect()
}
