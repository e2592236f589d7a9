//! Notification hooks fired by [`SearchEngine::step`](crate::SearchEngine::step).

use pathviz_core::Point;

use crate::strategy::{Status, StrategyKind};

/// What a finished session reports.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSummary {
    pub strategy: StrategyKind,
    /// [`Status::Found`] or [`Status::Failed`].
    pub status: Status,
    pub iterations: u32,
    /// Cells in the path, endpoints included; 0 when nothing was found.
    pub path_len: usize,
    /// Sum of edge costs along the path under the session's metric.
    pub cost: f64,
}

/// Receives events from a stepping session. Every method defaults to a
/// no-op.
pub trait SearchObserver {
    /// A cell on the found path just became
    /// [`CellKind::Pathway`](pathviz_core::CellKind::Pathway).
    fn pathway_cell(&mut self, _pos: Point) {}

    /// The session reached a terminal state. Fired exactly once.
    fn finished(&mut self, _summary: &SearchSummary) {}
}

impl SearchObserver for () {}

/// An observer callback, recorded.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent {
    Pathway(Point),
    Finished(SearchSummary),
}

impl SearchObserver for Vec<SearchEvent> {
    fn pathway_cell(&mut self, pos: Point) {
        self.push(SearchEvent::Pathway(pos));
    }

    fn finished(&mut self, summary: &SearchSummary) {
        self.push(SearchEvent::Finished(summary.clone()));
    }
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn pathway_cell(&mut self, pos: Point) {
        (**self).pathway_cell(pos);
    }

    fn finished(&mut self, summary: &SearchSummary) {
        (**self).finished(summary);
    }
}
