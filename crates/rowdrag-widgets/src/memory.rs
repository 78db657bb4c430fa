#![forbid(unsafe_code)]

//! In-memory reference collaborators.
//!
//! [`MemoryList`] is a complete [`ListHost`] backed by plain vectors: rows of
//! arbitrary height stacked top to bottom across sections, a scrollable
//! viewport, and a record of every reload and move the controller asked for.
//! [`VecDataSource`] is the matching [`ReorderDataSource`].
//!
//! Both are used by this crate's tests and are handy for hosts that want to
//! drive the controller headlessly (replays, previews, property tests).

use std::collections::VecDeque;

use rowdrag_core::geometry::{Insets, Point, Rect, Size};
use rowdrag_core::row::RowIndex;

use crate::ghost::GhostView;
use crate::host::{ListHost, ReorderDataSource, RowAnimation};

/// One row of a [`MemoryList`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRow<C> {
    pub cell: C,
    pub height: f64,
    pub hidden: bool,
}

impl<C> MemoryRow<C> {
    #[must_use]
    pub fn new(cell: C, height: f64) -> Self {
        Self {
            cell,
            height,
            hidden: false,
        }
    }
}

/// A headless sectioned list.
///
/// Rows span the full width, so hit-testing only looks at `y`. Only rows
/// intersecting the viewport have a cell, like a recycling list view.
#[derive(Debug, Clone)]
pub struct MemoryList<C> {
    sections: Vec<Vec<MemoryRow<C>>>,
    viewport: Size,
    offset: Point,
    inset: Insets,
    ghost: Option<GhostView<C>>,
    staged: VecDeque<MemoryRow<C>>,
    reloads: Vec<Vec<RowIndex>>,
    moves: Vec<(RowIndex, RowIndex)>,
    ghost_updates: usize,
    detaches: usize,
}

impl<C: Clone> MemoryList<C> {
    /// An empty list with no sections.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            sections: Vec::new(),
            viewport,
            offset: Point::default(),
            inset: Insets::default(),
            ghost: None,
            staged: VecDeque::new(),
            reloads: Vec::new(),
            moves: Vec::new(),
            ghost_updates: 0,
            detaches: 0,
        }
    }

    /// A single section of equally tall rows.
    #[must_use]
    pub fn uniform(cells: impl IntoIterator<Item = C>, row_height: f64, viewport: Size) -> Self {
        Self::new(viewport).with_section(
            cells
                .into_iter()
                .map(|cell| MemoryRow::new(cell, row_height)),
        )
    }

    /// Append a section.
    #[must_use]
    pub fn with_section(mut self, rows: impl IntoIterator<Item = MemoryRow<C>>) -> Self {
        self.sections.push(rows.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_inset(mut self, inset: Insets) -> Self {
        self.inset = inset;
        self
    }

    /// Queue a row for the next [`insert_rows`](ListHost::insert_rows).
    pub fn stage_insert(&mut self, cell: C, height: f64) {
        self.staged.push_back(MemoryRow::new(cell, height));
    }

    /// Remove every row, keeping the sections.
    pub fn clear(&mut self) {
        for rows in &mut self.sections {
            rows.clear();
        }
    }

    /// Cells of a section in display order.
    #[must_use]
    pub fn cells(&self, section: usize) -> Vec<C> {
        self.sections
            .get(section)
            .map(|rows| rows.iter().map(|row| row.cell.clone()).collect())
            .unwrap_or_default()
    }

    pub fn row(&self, index: RowIndex) -> Option<&MemoryRow<C>> {
        self.sections.get(index.section)?.get(index.row)
    }

    #[must_use]
    pub fn is_hidden(&self, index: RowIndex) -> bool {
        self.row(index).is_some_and(|row| row.hidden)
    }

    /// The attached ghost, as last reported.
    pub fn ghost(&self) -> Option<&GhostView<C>> {
        self.ghost.as_ref()
    }

    /// Every `reload_rows` request, in order.
    pub fn reloads(&self) -> &[Vec<RowIndex>] {
        &self.reloads
    }

    /// Every `move_row` request, in order.
    pub fn moves(&self) -> &[(RowIndex, RowIndex)] {
        &self.moves
    }

    pub fn ghost_updates(&self) -> usize {
        self.ghost_updates
    }

    /// Number of times an attached ghost was removed.
    pub fn detach_count(&self) -> usize {
        self.detaches
    }

    fn frames(&self) -> impl Iterator<Item = (RowIndex, Rect)> + '_ {
        let width = self.viewport.width;
        let mut y = 0.0;
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(section, rows)| {
                rows.iter()
                    .enumerate()
                    .map(move |(row, data)| (RowIndex::new(section, row), data.height))
            })
            .map(move |(index, height)| {
                let rect = Rect::new(0.0, y, width, height);
                y += height;
                (index, rect)
            })
    }

    fn is_on_screen(&self, rect: &Rect) -> bool {
        let top = self.offset.y;
        rect.y < top + self.viewport.height && rect.bottom() > top
    }
}

impl<C: Clone> ListHost for MemoryList<C> {
    type Cell = C;

    fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    fn rows_in_section(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, Vec::len)
    }

    fn row_at(&self, point: Point) -> Option<RowIndex> {
        if point.y.is_nan() {
            return None;
        }
        self.frames()
            .find(|(_, rect)| point.y >= rect.y && point.y < rect.bottom())
            .map(|(index, _)| index)
    }

    fn rect_for_row(&self, row: RowIndex) -> Option<Rect> {
        self.frames()
            .find(|(index, _)| *index == row)
            .map(|(_, rect)| rect)
    }

    fn cell_for_row(&self, row: RowIndex) -> Option<C> {
        let rect = self.rect_for_row(row)?;
        if !self.is_on_screen(&rect) {
            return None;
        }
        self.row(row).map(|data| data.cell.clone())
    }

    fn visible_rows(&self) -> Vec<RowIndex> {
        self.frames()
            .filter(|(_, rect)| self.is_on_screen(rect))
            .map(|(index, _)| index)
            .collect()
    }

    fn set_row_hidden(&mut self, row: RowIndex, hidden: bool) {
        if let Some(data) = self
            .sections
            .get_mut(row.section)
            .and_then(|rows| rows.get_mut(row.row))
        {
            data.hidden = hidden;
        }
    }

    fn move_row(&mut self, from: RowIndex, to: RowIndex) {
        if !self.contains_row(from) || to.section >= self.sections.len() {
            tracing::warn!(%from, %to, "memory list: move of a missing row ignored");
            return;
        }
        let data = self.sections[from.section].remove(from.row);
        let dest = &mut self.sections[to.section];
        let at = to.row.min(dest.len());
        dest.insert(at, data);
        self.moves.push((from, to));
    }

    fn reload_rows(&mut self, rows: &[RowIndex], _animation: RowAnimation) {
        self.reloads.push(rows.to_vec());
    }

    fn insert_rows(&mut self, rows: &[RowIndex], _animation: RowAnimation) {
        let mut sorted = rows.to_vec();
        sorted.sort();
        for index in sorted {
            let Some(rows) = self.sections.get_mut(index.section) else {
                tracing::warn!(row = %index, "memory list: insert into a missing section");
                continue;
            };
            let Some(data) = self.staged.pop_front() else {
                tracing::warn!(row = %index, "memory list: insert with nothing staged");
                continue;
            };
            let at = index.row.min(rows.len());
            rows.insert(at, data);
        }
    }

    fn delete_rows(&mut self, rows: &[RowIndex], _animation: RowAnimation) {
        let mut sorted = rows.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));
        sorted.dedup();
        for index in sorted {
            if self.contains_row(index) {
                self.sections[index.section].remove(index.row);
            }
        }
    }

    fn content_offset(&self) -> Point {
        self.offset
    }

    fn set_content_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    fn content_size(&self) -> Size {
        let height: f64 = self.sections.iter().flatten().map(|row| row.height).sum();
        Size::new(self.viewport.width, height)
    }

    fn content_inset(&self) -> Insets {
        self.inset
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn attach_ghost(&mut self, ghost: &GhostView<C>) {
        self.ghost = Some(ghost.clone());
    }

    fn update_ghost(&mut self, ghost: &GhostView<C>) {
        self.ghost = Some(ghost.clone());
        self.ghost_updates += 1;
    }

    fn detach_ghost(&mut self) {
        if self.ghost.take().is_some() {
            self.detaches += 1;
        }
    }
}

/// A sectioned vector that accepts reorder commits.
#[derive(Debug, Clone)]
pub struct VecDataSource<T> {
    sections: Vec<Vec<T>>,
    pinned: Option<fn(&T) -> bool>,
    moves: Vec<(RowIndex, RowIndex)>,
}

impl<T> VecDataSource<T> {
    /// A single section.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self::with_sections(vec![items])
    }

    #[must_use]
    pub fn with_sections(sections: Vec<Vec<T>>) -> Self {
        Self {
            sections,
            pinned: None,
            moves: Vec::new(),
        }
    }

    /// Items matching `pinned` can neither be dragged nor displaced.
    #[must_use]
    pub fn with_pinned(mut self, pinned: fn(&T) -> bool) -> Self {
        self.pinned = Some(pinned);
        self
    }

    pub fn items(&self, section: usize) -> &[T] {
        self.sections.get(section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, index: RowIndex) -> Option<&T> {
        self.sections.get(index.section)?.get(index.row)
    }

    /// Every committed move, in order.
    pub fn moves(&self) -> &[(RowIndex, RowIndex)] {
        &self.moves
    }

    /// Remove every item, keeping the sections.
    pub fn clear(&mut self) {
        for items in &mut self.sections {
            items.clear();
        }
    }

    pub fn into_sections(self) -> Vec<Vec<T>> {
        self.sections
    }
}

impl<T> ReorderDataSource for VecDataSource<T> {
    fn row_count(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    fn can_move(&self, row: RowIndex) -> bool {
        match (self.get(row), self.pinned) {
            (None, _) => false,
            (Some(item), Some(pinned)) => !pinned(item),
            (Some(_), None) => true,
        }
    }

    fn move_row(&mut self, from: RowIndex, to: RowIndex) {
        if self.get(from).is_none() || to.section >= self.sections.len() {
            tracing::warn!(%from, %to, "data source: move of a missing item ignored");
            return;
        }
        let item = self.sections[from.section].remove(from.row);
        let dest = &mut self.sections[to.section];
        let at = to.row.min(dest.len());
        dest.insert(at, item);
        self.moves.push((from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sections() -> MemoryList<&'static str> {
        MemoryList::new(Size::new(320.0, 100.0))
            .with_section([MemoryRow::new("a", 40.0), MemoryRow::new("b", 60.0)])
            .with_section([MemoryRow::new("c", 30.0)])
    }

    #[test]
    fn rows_stack_across_sections() {
        let list = two_sections();
        assert_eq!(list.total_rows(), 3);
        assert_eq!(
            list.rect_for_row(RowIndex::new(1, 0)),
            Some(Rect::new(0.0, 100.0, 320.0, 30.0))
        );
        assert_eq!(list.content_size(), Size::new(320.0, 130.0));
    }

    #[test]
    fn hit_test_uses_half_open_rows() {
        let list = two_sections();
        assert_eq!(list.row_at(Point::new(0.0, 39.9)), Some(RowIndex::new(0, 0)));
        assert_eq!(list.row_at(Point::new(0.0, 40.0)), Some(RowIndex::new(0, 1)));
        assert_eq!(list.row_at(Point::new(0.0, 130.0)), None);
        assert_eq!(list.row_at(Point::new(0.0, -1.0)), None);
        assert_eq!(list.row_at(Point::NAN), None);
    }

    #[test]
    fn only_on_screen_rows_have_cells() {
        let mut list = two_sections();
        assert_eq!(list.visible_rows(), vec![RowIndex::new(0, 0), RowIndex::new(0, 1)]);
        assert!(list.cell_for_row(RowIndex::new(1, 0)).is_none());
        list.set_content_offset(Point::new(0.0, 30.0));
        assert_eq!(list.cell_for_row(RowIndex::new(1, 0)), Some("c"));
        assert!(list.cell_for_row(RowIndex::new(0, 0)).is_some());
    }

    #[test]
    fn move_within_and_across_sections() {
        let mut list = two_sections();
        list.move_row(RowIndex::new(0, 0), RowIndex::new(0, 1));
        assert_eq!(list.cells(0), vec!["b", "a"]);
        list.move_row(RowIndex::new(0, 1), RowIndex::new(1, 1));
        assert_eq!(list.cells(0), vec!["b"]);
        assert_eq!(list.cells(1), vec!["c", "a"]);
        assert_eq!(list.moves().len(), 2);
    }

    #[test]
    fn hidden_flag_travels_with_row() {
        let mut list = two_sections();
        list.set_row_hidden(RowIndex::new(0, 0), true);
        list.move_row(RowIndex::new(0, 0), RowIndex::new(0, 1));
        assert!(list.is_hidden(RowIndex::new(0, 1)));
        assert!(!list.is_hidden(RowIndex::new(0, 0)));
    }

    #[test]
    fn insert_consumes_staged_rows() {
        let mut list = two_sections();
        list.stage_insert("x", 20.0);
        list.insert_rows(&[RowIndex::new(1, 0), RowIndex::new(1, 5)], RowAnimation::Fade);
        assert_eq!(list.cells(1), vec!["x", "c"]);
    }

    #[test]
    fn delete_removes_from_the_back() {
        let mut list = two_sections();
        list.delete_rows(
            &[RowIndex::new(0, 0), RowIndex::new(0, 1)],
            RowAnimation::Automatic,
        );
        assert!(list.cells(0).is_empty());
        assert_eq!(list.total_rows(), 1);
    }

    #[test]
    fn detach_counts_only_attached_ghosts() {
        let mut list = two_sections();
        list.detach_ghost();
        assert_eq!(list.detach_count(), 0);
        let ghost = GhostView::new("a", RowIndex::new(0, 0), Rect::new(0.0, 0.0, 320.0, 40.0));
        list.attach_ghost(&ghost);
        list.detach_ghost();
        list.detach_ghost();
        assert_eq!(list.detach_count(), 1);
    }

    #[test]
    fn data_source_moves_and_pins() {
        let mut data = VecDataSource::new(vec![1, 2, 3]).with_pinned(|item| *item == 3);
        assert_eq!(data.row_count(), 3);
        assert!(data.can_move(RowIndex::row(0)));
        assert!(!data.can_move(RowIndex::row(2)));
        assert!(!data.can_move(RowIndex::row(9)));
        data.move_row(RowIndex::row(0), RowIndex::row(1));
        assert_eq!(data.items(0), &[2, 1, 3]);
        assert_eq!(data.moves(), &[(RowIndex::row(0), RowIndex::row(1))]);
    }
}
