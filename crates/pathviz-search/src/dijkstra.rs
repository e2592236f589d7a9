use pathviz_core::Grid;

use crate::session::Session;
use crate::strategy::Expansion;

/// Seed every cell of the grid into the open set; only the start has a
/// finite cost.
pub(crate) fn start(s: &mut Session, grid: &Grid) {
    {
        let node = &mut s.nodes[s.start];
        node.g = 0.0;
        node.f = 0.0;
    }
    for i in 0..grid.len() {
        let node = &mut s.nodes[i];
        node.opened = true;
        s.open.push(i, node.g);
    }
}

/// Pop the open cell with the lowest `g` and relax the neighbours that are
/// still in the open set.
pub(crate) fn expand(s: &mut Session, grid: &Grid) -> Expansion {
    let nodes = &s.nodes;
    let Some(ci) = s
        .open
        .pop_live(|i, score| nodes[i].opened && nodes[i].g == score)
    else {
        return Expansion::Exhausted;
    };
    {
        let node = &mut s.nodes[ci];
        node.opened = false;
        node.closed = true;
    }
    let current_g = s.nodes[ci].g;
    // Everything left is unreachable once the cheapest open cell is.
    if current_g.is_infinite() {
        return Expansion::Exhausted;
    }
    if ci == s.goal {
        return Expansion::Found;
    }

    let nbuf = s.load_neighbors(grid, ci);

    for &np in nbuf.iter() {
        let Some(ni) = grid.index(np) else {
            continue;
        };
        if !s.nodes[ni].opened {
            continue;
        }
        let tentative = current_g + s.cost(grid, ci, ni);
        if tentative >= s.nodes[ni].g {
            continue;
        }
        let n = &mut s.nodes[ni];
        n.g = tentative;
        n.f = tentative;
        n.parent = Some(ci);
        s.open.push(ni, tentative);
    }

    s.nbuf = nbuf;
    log::trace!("Dijkstra expanded {} at cost {}", grid.point(ci), current_g);
    Expansion::Continue
}
