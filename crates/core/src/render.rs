//! Diagnostic text depiction of a dungeon grid.
//!
//! Each node is drawn as its kind glyph (`C` or `T`) followed by its zero-padded id. A `-`
//! between two cells marks an east/west edge and a `|` on the line below a cell marks a
//! north/south edge. With wrapping, border edges are drawn on the outer margins: `-` left of the
//! first column or right of the last, `|` above the first row or below the last.

use crate::mapgen::Dungeon;
use crate::types::{Direction, NodeId};

const PLAYER_GLYPH: char = '@';

pub fn render_dungeon(dungeon: &Dungeon) -> String {
    render(dungeon, None)
}

/// Same as [`render_dungeon`] with the player's node drawn as `@`.
pub fn render_with_player(dungeon: &Dungeon, player: NodeId) -> String {
    render(dungeon, Some(player))
}

fn render(dungeon: &Dungeon, player: Option<NodeId>) -> String {
    let rows = dungeon.rows();
    let columns = dungeon.columns();
    let width = (rows * columns - 1).to_string().len();
    let mut lines = Vec::with_capacity(rows * 2 + 1);

    let top_wrap = vertical_connectors(dungeon, 0, Direction::North, width);
    if dungeon.is_wrapping() && top_wrap.contains('|') {
        lines.push(top_wrap);
    }

    for row in 0..rows {
        let mut line = String::new();
        let first = row * columns;
        line.push(if dungeon.node(first).exits.has(Direction::West) { '-' } else { ' ' });
        for col in 0..columns {
            let id = first + col;
            let node = dungeon.node(id);
            let glyph = if player == Some(id) { PLAYER_GLYPH } else { node.kind.glyph() };
            line.push(glyph);
            line.push_str(&format!("{id:0width$}"));
            line.push(if node.exits.has(Direction::East) { '-' } else { ' ' });
        }
        lines.push(line);

        if row + 1 < rows || dungeon.is_wrapping() {
            let below = vertical_connectors(dungeon, row, Direction::South, width);
            if row + 1 < rows || below.contains('|') {
                lines.push(below);
            }
        }
    }

    let mut out = String::new();
    for line in lines {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn vertical_connectors(
    dungeon: &Dungeon,
    row: usize,
    direction: Direction,
    width: usize,
) -> String {
    let columns = dungeon.columns();
    let mut line = String::from(" ");
    for col in 0..columns {
        let open = dungeon.node(row * columns + col).exits.has(direction);
        line.push(if open { '|' } else { ' ' });
        line.push_str(&" ".repeat(width + 1));
    }
    line
}
