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

/// Pop the open cell with the lowest `f` and relax its neighbours.
///
/// There is no closed set: a cell already expanded is re-opened whenever a
/// cheaper route to it turns up.
pub(crate) fn expand(s: &mut Session, grid: &Grid) -> Expansion {
    let Some(ci) = s.pop_lowest_f() else {
        return Expansion::Exhausted;
    };
    s.nodes[ci].opened = false;
    if ci == s.goal {
        return Expansion::Found;
    }

    let current_g = s.nodes[ci].g;
    let nbuf = s.load_neighbors(grid, ci);

    for &np in nbuf.iter() {
        let Some(ni) = grid.index(np) else {
            continue;
        };
        let tentative_g = current_g + s.cost(grid, ci, ni);
        if tentative_g >= s.nodes[ni].g {
            continue;
        }
        let f = tentative_g + s.estimate(grid, ni);
        let n = &mut s.nodes[ni];
        n.g = tentative_g;
        n.f = f;
        n.parent = Some(ci);
        n.opened = true;
        s.open.push(ni, f);
    }

    s.nbuf = nbuf;
    log::trace!("A* expanded {}", grid.point(ci));
    Expansion::Continue
}
