use pathviz_core::Grid;

use crate::session::Session;
use crate::strategy::Expansion;

pub(crate) fn start(s: &mut Session, _grid: &Grid) {
    let node = &mut s.nodes[s.start];
    node.g = 0.0;
    node.f = 0.0;
    node.opened = true;
    s.queue.push_back(s.start);
}

/// Take the oldest queued cell, close it, and queue every neighbour that
/// has been neither opened nor closed yet.
pub(crate) fn expand(s: &mut Session, grid: &Grid) -> Expansion {
    let Some(ci) = s.queue.pop_front() else {
        return Expansion::Exhausted;
    };
    s.nodes[ci].closed = true;
    if ci == s.goal {
        return Expansion::Found;
    }

    let current_g = s.nodes[ci].g;
    let nbuf = s.load_neighbors(grid, ci);

    for &np in nbuf.iter() {
        let Some(ni) = grid.index(np) else {
            continue;
        };
        if s.nodes[ni].opened || s.nodes[ni].closed {
            continue;
        }
        // Costs are only recorded for display; they never reorder the queue.
        let g = current_g + s.cost(grid, ci, ni);
        let n = &mut s.nodes[ni];
        n.opened = true;
        n.parent = Some(ci);
        n.g = g;
        n.f = g;
        s.queue.push_back(ni);
    }

    s.nbuf = nbuf;
    log::trace!("BFS expanded {}", grid.point(ci));
    Expansion::Continue
}
