#![forbid(unsafe_code)]

//! Row addressing.

use std::fmt;

/// A `(section, row)` position in a sectioned list.
///
/// Ordering is lexicographic: every row of section 0 sorts before any row of
/// section 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowIndex {
    pub section: usize,
    pub row: usize,
}

impl RowIndex {
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Row `row` of section 0.
    #[inline]
    pub const fn row(row: usize) -> Self {
        Self::new(0, row)
    }

    /// True if both positions are in the same section.
    #[inline]
    #[must_use]
    pub const fn same_section(self, other: Self) -> bool {
        self.section == other.section
    }

    /// The adjacent row one step toward `target` within this section.
    ///
    /// Returns `target` itself when the sections differ or the rows are
    /// already adjacent (or equal).
    #[must_use]
    pub fn step_toward(self, target: Self) -> Self {
        if !self.same_section(target) {
            return target;
        }
        match self.row.cmp(&target.row) {
            std::cmp::Ordering::Less => Self::new(self.section, self.row + 1),
            std::cmp::Ordering::Greater => Self::new(self.section, self.row - 1),
            std::cmp::Ordering::Equal => target,
        }
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.row)
    }
}

impl From<(usize, usize)> for RowIndex {
    fn from((section, row): (usize, usize)) -> Self {
        Self { section, row }
    }
}
