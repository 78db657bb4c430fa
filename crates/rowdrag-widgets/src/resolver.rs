#![forbid(unsafe_code)]

//! Drop-target resolution.
//!
//! Given where the pointer is, decide whether the held row should move.
//!
//! # Promotion rule
//!
//! A proposed row `P` replaces the held row `H` when all of the following
//! hold:
//!
//! | Check | Rule |
//! |-------|------|
//! | distinct | `P != H` |
//! | threshold | pointer offset inside `P` > `height(P) - height(H)` |
//! | permission | `can_move(P)` |
//!
//! The threshold compensates for unequal row heights: when the held row is
//! shorter than the target, the pointer must travel further into the target
//! before the swap, so that after the swap the pointer lands inside the held
//! row again. With equal heights it reduces to "anywhere inside the target".
//! This is what keeps a stationary pointer from flipping rows back and forth.
//!
//! # Stepping
//!
//! A fast drag can propose a row several positions away. Within a section the
//! move is replayed as adjacent swaps ([`step_path`]) so observers see the
//! same sequence a slow drag would produce.

use rowdrag_core::row::RowIndex;

/// Everything the resolver needs to know about one pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropProbe {
    /// Where the dragged item currently lives.
    pub held: RowIndex,
    /// The row under the pointer, after delegate remapping.
    pub proposed: RowIndex,
    pub held_height: f64,
    pub target_height: f64,
    /// Pointer `y` relative to the top of the proposed row.
    pub offset_in_target: f64,
}

/// Stateless drop-target policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropTargetResolver;

impl DropTargetResolver {
    /// The row to promote to, if any.
    ///
    /// `can_move` is consulted last and only when the geometry allows the
    /// swap.
    pub fn resolve(probe: &DropProbe, can_move: impl Fn(RowIndex) -> bool) -> Option<RowIndex> {
        if probe.proposed == probe.held {
            return None;
        }
        // NaN compares false, so a degenerate sample never promotes.
        let past_threshold = probe.offset_in_target > probe.target_height - probe.held_height;
        if !past_threshold {
            return None;
        }
        if !can_move(probe.proposed) {
            return None;
        }
        Some(probe.proposed)
    }
}

/// Successive destinations that carry `held` to `target`.
///
/// Within one section this is every row between them, ending with `target`.
/// Across sections it is just `[target]`. Empty when `held == target`.
#[must_use]
pub fn step_path(held: RowIndex, target: RowIndex) -> Vec<RowIndex> {
    let mut path = Vec::new();
    let mut at = held;
    while at != target {
        at = at.step_toward(target);
        path.push(at);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(held: usize, proposed: usize, held_h: f64, target_h: f64, offset: f64) -> DropProbe {
        DropProbe {
            held: RowIndex::row(held),
            proposed: RowIndex::row(proposed),
            held_height: held_h,
            target_height: target_h,
            offset_in_target: offset,
        }
    }

    #[test]
    fn same_row_never_promotes() {
        assert_eq!(
            DropTargetResolver::resolve(&probe(2, 2, 44.0, 44.0, 30.0), |_| true),
            None
        );
    }

    #[test]
    fn equal_heights_promote_anywhere_inside() {
        assert_eq!(
            DropTargetResolver::resolve(&probe(2, 3, 44.0, 44.0, 0.5), |_| true),
            Some(RowIndex::row(3))
        );
        // Exactly at the top edge is not past the threshold.
        assert_eq!(
            DropTargetResolver::resolve(&probe(2, 3, 44.0, 44.0, 0.0), |_| true),
            None
        );
    }

    #[test]
    fn taller_target_needs_deeper_pointer() {
        // Held 44, target 100: threshold is 56.
        assert_eq!(
            DropTargetResolver::resolve(&probe(0, 1, 44.0, 100.0, 50.0), |_| true),
            None
        );
        assert_eq!(
            DropTargetResolver::resolve(&probe(0, 1, 44.0, 100.0, 60.0), |_| true),
            Some(RowIndex::row(1))
        );
    }

    #[test]
    fn refused_target_never_promotes() {
        assert_eq!(
            DropTargetResolver::resolve(&probe(0, 1, 44.0, 44.0, 20.0), |row| row.row != 1),
            None
        );
    }

    #[test]
    fn nan_offset_never_promotes() {
        assert_eq!(
            DropTargetResolver::resolve(&probe(0, 1, 44.0, 44.0, f64::NAN), |_| true),
            None
        );
    }

    #[test]
    fn step_path_within_section() {
        assert_eq!(
            step_path(RowIndex::row(2), RowIndex::row(4)),
            vec![RowIndex::row(3), RowIndex::row(4)]
        );
        assert_eq!(
            step_path(RowIndex::row(3), RowIndex::row(0)),
            vec![RowIndex::row(2), RowIndex::row(1), RowIndex::row(0)]
        );
        assert!(step_path(RowIndex::row(1), RowIndex::row(1)).is_empty());
    }

    #[test]
    fn step_path_across_sections_is_direct() {
        let target = RowIndex::new(1, 3);
        assert_eq!(step_path(RowIndex::new(0, 0), target), vec![target]);
    }
}
