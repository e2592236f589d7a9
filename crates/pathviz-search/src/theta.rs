//! Theta*: A* whose parent links may skip over cells.
//!
//! When the parent of the expanded cell can see a neighbour directly, the
//! neighbour is relaxed through that parent instead of through the expanded
//! cell, straightening the path. Cells are closed once popped.
//!
//! Run it under [`Movement::AnyAngle`](crate::Movement::AnyAngle). Edge costs
//! follow the movement's metric, and under Manhattan or octile costs a
//! shortcut is never cheaper than the staircase it replaces, so the path
//! keeps the length of a grid path.

use pathviz_core::Grid;

use crate::session::Session;
use crate::strategy::Expansion;

pub(crate) fn start(s: &mut Session, grid: &Grid) {
    let f = s.estimate(grid, s.start);
    let node = &mut s.nodes[s.start];
    node.g = 0.0;
    node.f = f;
    node.opened = true;
    s.open.push(s.start, f);
}

pub(crate) fn expand(s: &mut Session, grid: &Grid) -> Expansion {
    let Some(ci) = s.pop_lowest_f() else {
        return Expansion::Exhausted;
    };
    {
        let node = &mut s.nodes[ci];
        node.opened = false;
        node.closed = true;
    }
    if ci == s.goal {
        return Expansion::Found;
    }

    let nbuf = s.load_neighbors(grid, ci);

    for &np in nbuf.iter() {
        let Some(ni) = grid.index(np) else {
            continue;
        };
        if s.nodes[ni].closed {
            continue;
        }
        update_vertex(s, grid, ci, ni);
    }

    s.nbuf = nbuf;
    log::trace!("Theta* expanded {}", grid.point(ci));
    Expansion::Continue
}

fn update_vertex(s: &mut Session, grid: &Grid, ci: usize, ni: usize) {
    let (via, tentative_g) = match s.nodes[ci].parent {
        Some(pi) if grid.line_of_sight(grid.point(pi), grid.point(ni)) => {
            (pi, s.nodes[pi].g + s.cost(grid, pi, ni))
        }
        _ => (ci, s.nodes[ci].g + s.cost(grid, ci, ni)),
    };
    if tentative_g >= s.nodes[ni].g {
        return;
    }
    let f = tentative_g + s.estimate(grid, ni);
    let n = &mut s.nodes[ni];
    n.g = tentative_g;
    n.f = f;
    n.parent = Some(via);
    n.opened = true;
    s.open.push(ni, f);
}
