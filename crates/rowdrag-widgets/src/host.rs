#![forbid(unsafe_code)]

//! Collaborator interfaces.
//!
//! The reorder controller never owns the list it manipulates. It reaches the
//! host through four traits:
//!
//! | Trait | Implemented by | Required |
//! |-------|----------------|----------|
//! | [`ListHost`] | the list view (geometry, cells, overlay) | yes |
//! | [`ReorderDataSource`] | whoever owns the ordered collection | yes |
//! | [`ReorderDelegate`] | optional customization hooks | no ([`NoopDelegate`]) |
//! | [`SelectionFeedback`] | haptics | no ([`NoFeedback`]) |
//!
//! Every optional hook has a default that keeps the classic behavior, so the
//! controller always calls through the trait and never probes for support.

use rowdrag_core::geometry::{Insets, Point, Rect, Size};
use rowdrag_core::gesture::PressGesture;
use rowdrag_core::row::RowIndex;
use rowdrag_core::scroll::ScrollMetrics;

use crate::ghost::GhostView;

/// Animation hint for row insert/delete/reload requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowAnimation {
    /// Apply immediately.
    #[default]
    None,
    Fade,
    /// Let the host choose.
    Automatic,
}

/// The list view the reorder gesture operates on.
///
/// Coordinates are list-local: `(0, 0)` is the top-left of the content, and
/// the visible region starts at [`content_offset`](ListHost::content_offset).
pub trait ListHost {
    /// Visual appearance of a row, snapshotted into the ghost.
    type Cell: Clone;

    fn number_of_sections(&self) -> usize;

    fn rows_in_section(&self, section: usize) -> usize;

    /// Total rows across all sections.
    fn total_rows(&self) -> usize {
        (0..self.number_of_sections())
            .map(|section| self.rows_in_section(section))
            .sum()
    }

    /// True if `row` currently exists.
    fn contains_row(&self, row: RowIndex) -> bool {
        row.section < self.number_of_sections() && row.row < self.rows_in_section(row.section)
    }

    /// Hit-test a point to a row.
    fn row_at(&self, point: Point) -> Option<RowIndex>;

    /// Current frame of a row.
    fn rect_for_row(&self, row: RowIndex) -> Option<Rect>;

    /// Appearance of a row, if its cell is currently visible.
    fn cell_for_row(&self, row: RowIndex) -> Option<Self::Cell>;

    /// Rows currently intersecting the viewport, in order.
    fn visible_rows(&self) -> Vec<RowIndex>;

    /// Hide or show a row's cell without removing the row.
    fn set_row_hidden(&mut self, row: RowIndex, hidden: bool);

    /// Visually move a row; `to` is the row's index after the move.
    fn move_row(&mut self, from: RowIndex, to: RowIndex);

    fn reload_rows(&mut self, rows: &[RowIndex], animation: RowAnimation);

    fn insert_rows(&mut self, rows: &[RowIndex], animation: RowAnimation);

    fn delete_rows(&mut self, rows: &[RowIndex], animation: RowAnimation);

    fn content_offset(&self) -> Point;

    fn set_content_offset(&mut self, offset: Point);

    fn content_size(&self) -> Size;

    fn content_inset(&self) -> Insets;

    /// Size of the visible region.
    fn viewport_size(&self) -> Size;

    /// Snapshot of the scroll geometry.
    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.content_offset(),
            viewport: self.viewport_size(),
            content: self.content_size(),
            inset: self.content_inset(),
        }
    }

    /// Add the ghost as an overlay above the rows.
    fn attach_ghost(&mut self, ghost: &GhostView<Self::Cell>);

    /// The ghost's frame, scale or style changed.
    fn update_ghost(&mut self, ghost: &GhostView<Self::Cell>);

    /// Remove the ghost overlay. Must tolerate being called with no ghost
    /// attached.
    fn detach_ghost(&mut self);
}

/// Owner of the ordered collection behind the list.
pub trait ReorderDataSource {
    /// Total rows across all sections.
    fn row_count(&self) -> usize;

    /// Whether `row` may be dragged, or dragged onto.
    fn can_move(&self, _row: RowIndex) -> bool {
        true
    }

    /// A move was committed: the item at `from` now lives at `to`.
    ///
    /// Called exactly once per accepted move, in the order moves happen.
    fn move_row(&mut self, from: RowIndex, to: RowIndex);
}

/// Optional customization hooks.
pub trait ReorderDelegate<C> {
    /// Veto a drag before it starts.
    fn should_move_row(&mut self, _row: RowIndex, _gesture: &PressGesture) -> bool {
        true
    }

    /// Substitute the appearance used for the ghost.
    fn dragging_cell(&mut self, _row: RowIndex, cell: C) -> C {
        cell
    }

    /// The ghost was just attached over `row`.
    fn on_show_ghost(&mut self, _ghost: &GhostView<C>, _row: RowIndex) {}

    /// The ghost is about to settle into `row`.
    fn on_hide_ghost(&mut self, _ghost: &GhostView<C>, _row: RowIndex) {}

    /// The drag's vertical position changed.
    fn on_drag_vertical_position_changed(&mut self, _gesture: &PressGesture) {}

    /// Remap the naive drop target (section boundaries, pinned rows).
    fn target_for_move(&mut self, _from: RowIndex, proposed: RowIndex) -> RowIndex {
        proposed
    }
}

/// Delegate that keeps every default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelegate;

impl<C> ReorderDelegate<C> for NoopDelegate {}

/// Selection-style tactile feedback.
pub trait SelectionFeedback {
    /// Warm up the generator ahead of a drag.
    fn prepare(&mut self) {}

    /// A drag started or the held row changed.
    fn selection_changed(&mut self) {}

    /// The drag is over; release the generator.
    fn finalize(&mut self) {}
}

/// Feedback sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl SelectionFeedback for NoFeedback {}
