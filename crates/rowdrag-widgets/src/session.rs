#![forbid(unsafe_code)]

//! Per-drag state.
//!
//! A [`DragSession`] exists exactly while a drag is active. It is created by
//! the controller when a press begins on a movable row and dropped when the
//! drag ends, is cancelled or fails. All per-drag state lives here, so "no
//! drag" is simply "no session".

use rowdrag_core::row::RowIndex;

use crate::ghost::{GhostTransition, GhostView};

/// State of one active drag.
#[derive(Debug, Clone)]
pub struct DragSession<C> {
    pub(crate) initial: RowIndex,
    pub(crate) held: RowIndex,
    pub(crate) ghost: GhostView<C>,
    /// Lift transition, while it is still playing.
    pub(crate) lift: Option<GhostTransition>,
    pub(crate) scroll_rate: f64,
    pub(crate) last_vertical_position: Option<f64>,
    pub(crate) moves: usize,
}

impl<C> DragSession<C> {
    pub(crate) fn new(row: RowIndex, ghost: GhostView<C>) -> Self {
        Self {
            initial: row,
            held: row,
            ghost,
            lift: None,
            scroll_rate: 0.0,
            last_vertical_position: None,
            moves: 0,
        }
    }

    /// Where the drag started. Never changes during the session.
    #[inline]
    pub fn initial_position(&self) -> RowIndex {
        self.initial
    }

    /// Where the dragged item currently lives.
    #[inline]
    pub fn held_position(&self) -> RowIndex {
        self.held
    }

    #[inline]
    pub fn ghost(&self) -> &GhostView<C> {
        &self.ghost
    }

    /// Signed auto-scroll rate in `[-1, 1]`.
    #[inline]
    pub fn scroll_rate(&self) -> f64 {
        self.scroll_rate
    }

    /// Pointer `y` reported to the delegate most recently.
    #[inline]
    pub fn last_vertical_position(&self) -> Option<f64> {
        self.last_vertical_position
    }

    /// Committed moves so far.
    #[inline]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// True while the lift transition is still playing.
    #[inline]
    pub fn is_lifting(&self) -> bool {
        self.lift.is_some()
    }

    /// Rows whose content may be stale once the drag is over: every row
    /// between the start and the final position.
    #[must_use]
    pub fn affected_rows(&self) -> Vec<RowIndex> {
        affected_rows(self.initial, self.held)
    }
}

pub(crate) fn affected_rows(a: RowIndex, b: RowIndex) -> Vec<RowIndex> {
    if !a.same_section(b) {
        let mut rows = vec![a.min(b), a.max(b)];
        rows.dedup();
        return rows;
    }
    let (lo, hi) = (a.row.min(b.row), a.row.max(b.row));
    (lo..=hi).map(|row| RowIndex::new(a.section, row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowdrag_core::geometry::Rect;

    #[test]
    fn new_session_holds_initial_row() {
        let row = RowIndex::row(3);
        let session = DragSession::new(row, GhostView::new((), row, Rect::default()));
        assert_eq!(session.initial_position(), row);
        assert_eq!(session.held_position(), row);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.scroll_rate(), 0.0);
        assert!(session.last_vertical_position().is_none());
        assert!(!session.is_lifting());
        assert_eq!(session.affected_rows(), vec![row]);
    }

    #[test]
    fn affected_rows_spans_range() {
        assert_eq!(
            affected_rows(RowIndex::row(4), RowIndex::row(1)),
            (1..=4).map(RowIndex::row).collect::<Vec<_>>()
        );
    }

    #[test]
    fn affected_rows_across_sections_lists_endpoints() {
        assert_eq!(
            affected_rows(RowIndex::new(1, 0), RowIndex::new(0, 5)),
            vec![RowIndex::new(0, 5), RowIndex::new(1, 0)]
        );
    }
}
