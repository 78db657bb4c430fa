#![forbid(unsafe_code)]

//! The reorder gesture state machine.
//!
//! [`ReorderController`] consumes [`PressGesture`] updates in list-local
//! coordinates and drives the host list, the data source, the delegate and
//! the feedback generator through a [`ReorderEnv`].
//!
//! # State Machine
//!
//! ```text
//!            begin (guards pass)                end / cancel
//!   Idle ────────────────────────▶ Dragging ────────────────▶ Settling
//!    ▲                               │  ▲ update / tick           │
//!    │                               └──┘                         │
//!    └──────────── drop transition complete / finish_settling ────┘
//! ```
//!
//! `Settling` holds the released ghost while it animates back into its row.
//! With animations disabled `end` goes straight to `Idle`.
//!
//! # Invariants
//!
//! 1. At most one [`DragSession`] exists.
//! 2. While dragging, the held position names an existing row.
//! 3. The auto-scroll ticker is armed iff a session exists.
//! 4. Every committed move reaches the host and the data source exactly
//!    once, in order. Multi-row jumps within a section are replayed as
//!    adjacent moves.
//! 5. Teardown is idempotent: ending twice is the same as ending once.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Press on empty list / no row / refused row | [`Disposition::CancelGesture`], reason kept in [`last_rejection`](ReorderController::last_rejection) |
//! | Any phase while the list is empty | Session torn down, [`Disposition::CancelGesture`] |
//! | `Ended` with no session | [`Disposition::CancelGesture`] |
//! | NaN pointer location | Update or tick skipped |
//! | Pointer below or above all rows | Hit-test retried clamped to the content; the edge row counts as covered |
//! | Delegate substitutes the target row | The substituted row counts as covered |
//! | Held row vanished at drop | Ghost removed without a drop transition |

use std::fmt;

use rowdrag_core::config::ReorderConfig;
use rowdrag_core::geometry::{Point, Rect};
use rowdrag_core::gesture::{GesturePhase, PressGesture};
use rowdrag_core::row::RowIndex;
use rowdrag_core::scroll::ghost_center_y;
use rowdrag_core::ticker::AutoScrollTicker;
use web_time::Instant;

use crate::ghost::{GhostPose, GhostTransition, GhostView, TransitionKind};
use crate::host::{ListHost, ReorderDataSource, ReorderDelegate, RowAnimation, SelectionFeedback};
use crate::resolver::{DropProbe, DropTargetResolver, step_path};
use crate::session::{DragSession, affected_rows};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Mutable borrows of every collaborator, for the duration of one call.
pub struct ReorderEnv<'a, H: ListHost> {
    pub list: &'a mut H,
    pub data: &'a mut dyn ReorderDataSource,
    pub delegate: &'a mut dyn ReorderDelegate<H::Cell>,
    pub feedback: &'a mut dyn SelectionFeedback,
}

impl<'a, H: ListHost> ReorderEnv<'a, H> {
    pub fn new(
        list: &'a mut H,
        data: &'a mut dyn ReorderDataSource,
        delegate: &'a mut dyn ReorderDelegate<H::Cell>,
        feedback: &'a mut dyn SelectionFeedback,
    ) -> Self {
        Self {
            list,
            data,
            delegate,
            feedback,
        }
    }
}

/// What the gesture source should do after an update was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Keep delivering updates.
    Continue,
    /// Abort the gesture (disable and re-enable the recognizer).
    CancelGesture,
}

/// Why a press did not start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Reordering is switched off.
    Disabled,
    /// A drag is already in progress.
    AlreadyDragging,
    /// The list has no rows.
    EmptyList,
    /// The press is not over a row.
    NoRowAtPoint,
    /// The data source refused to move the row.
    DataSourceRefused,
    /// The delegate vetoed the drag.
    DelegateRefused,
    /// The host has no visible cell for the row.
    NoCell,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Disabled => "reordering is disabled",
            Self::AlreadyDragging => "a drag is already active",
            Self::EmptyList => "the list is empty",
            Self::NoRowAtPoint => "no row under the pointer",
            Self::DataSourceRefused => "the data source refused the move",
            Self::DelegateRefused => "the delegate vetoed the drag",
            Self::NoCell => "the row has no visible cell",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for RejectReason {}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// A released ghost animating back into its row.
#[derive(Debug)]
struct Settle<C> {
    ghost: GhostView<C>,
    initial: RowIndex,
    held: RowIndex,
    drop: GhostTransition,
}

#[derive(Debug)]
enum DragState<C> {
    Idle,
    Dragging(DragSession<C>),
    Settling(Settle<C>),
}

// ---------------------------------------------------------------------------
// ReorderController
// ---------------------------------------------------------------------------

/// Long-press reorder state machine.
#[derive(Debug)]
pub struct ReorderController<C> {
    config: ReorderConfig,
    state: DragState<C>,
    ticker: AutoScrollTicker,
    last_rejection: Option<RejectReason>,
}

impl<C: Clone> Default for ReorderController<C> {
    fn default() -> Self {
        Self::new(ReorderConfig::default())
    }
}

impl<C: Clone> ReorderController<C> {
    /// Create an idle controller.
    #[must_use]
    pub fn new(config: ReorderConfig) -> Self {
        Self {
            ticker: AutoScrollTicker::new(config.frame_interval),
            config,
            state: DragState::Idle,
            last_rejection: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Replace the configuration. An active drag keeps going with the new
    /// values.
    pub fn set_config(&mut self, config: ReorderConfig) {
        self.ticker.set_interval(config.frame_interval);
        self.config = config;
    }

    /// Route one gesture update (list-local coordinates).
    pub fn handle<H>(
        &mut self,
        gesture: &PressGesture,
        env: &mut ReorderEnv<'_, H>,
        now: Instant,
    ) -> Disposition
    where
        H: ListHost<Cell = C>,
    {
        if env.data.row_count() == 0 {
            tracing::debug!(phase = ?gesture.phase, "reorder gesture cancelled: list is empty");
            self.end(env, now);
            self.last_rejection = Some(RejectReason::EmptyList);
            return Disposition::CancelGesture;
        }
        match gesture.phase {
            GesturePhase::Began => match self.begin(gesture, env, now) {
                Ok(()) | Err(RejectReason::AlreadyDragging) => Disposition::Continue,
                Err(_) => Disposition::CancelGesture,
            },
            GesturePhase::Changed => {
                self.update(gesture, env, now);
                Disposition::Continue
            }
            GesturePhase::Ended => {
                if !self.is_dragging() {
                    tracing::debug!("reorder gesture ended without a drag");
                    return Disposition::CancelGesture;
                }
                self.end(env, now);
                Disposition::Continue
            }
            GesturePhase::Cancelled => {
                self.end(env, now);
                Disposition::Continue
            }
        }
    }

    /// Start a drag at the gesture location.
    ///
    /// A ghost that is still settling from the previous drag is cleaned up
    /// first.
    pub fn begin<H>(
        &mut self,
        gesture: &PressGesture,
        env: &mut ReorderEnv<'_, H>,
        now: Instant,
    ) -> Result<(), RejectReason>
    where
        H: ListHost<Cell = C>,
    {
        let result = self.try_begin(gesture, env, now);
        if let Err(reason) = result {
            tracing::debug!(
                %reason,
                x = gesture.location.x,
                y = gesture.location.y,
                "reorder begin rejected"
            );
            self.last_rejection = Some(reason);
        }
        result
    }

    /// Follow the pointer: move the ghost, report vertical changes, refresh
    /// the scroll rate and commit any row moves.
    pub fn update<H>(&mut self, gesture: &PressGesture, env: &mut ReorderEnv<'_, H>, now: Instant)
    where
        H: ListHost<Cell = C>,
    {
        let DragState::Dragging(session) = &mut self.state else {
            return;
        };
        let location = gesture.location;
        if location.is_nan() {
            tracing::trace!("reorder update skipped: pointer location is NaN");
            return;
        }

        let metrics = env.list.scroll_metrics();
        let lifted_height = session.ghost.pose().frame.height * self.config.lift_scale;
        let center_y = ghost_center_y(location.y, lifted_height, metrics.content.height);
        match session.lift.as_mut() {
            Some(lift) => {
                lift.retarget_center_y(center_y);
                lift.apply(now, &mut session.ghost);
                if lift.is_complete() {
                    session.lift = None;
                }
            }
            None => session.ghost.set_center_y(center_y),
        }
        env.list.update_ghost(&session.ghost);

        if session.last_vertical_position != Some(location.y) {
            env.delegate.on_drag_vertical_position_changed(gesture);
            session.last_vertical_position = Some(location.y);
        }
        session.scroll_rate = metrics.scroll_rate(location.y);

        resolve_moves(session, location, env);

        // Hosts may recycle cells; keep the held one hidden.
        env.list.set_row_hidden(session.held, true);
    }

    /// Release the drag. The ghost settles into the held row, then cleanup
    /// runs. No-op unless dragging.
    pub fn end<H>(&mut self, env: &mut ReorderEnv<'_, H>, now: Instant)
    where
        H: ListHost<Cell = C>,
    {
        let Some(session) = self.take_session() else {
            return;
        };
        self.ticker.disarm();
        let moves = session.moves;
        let DragSession {
            initial,
            held,
            mut ghost,
            ..
        } = session;
        tracing::debug!(%initial, %held, moves, "reorder drag ended");

        env.delegate.on_hide_ghost(&ghost, held);
        let rest = env
            .list
            .rect_for_row(held)
            .map(|rect| resting_pose(rect, &ghost));

        match rest {
            Some(to) if self.animates() => {
                let mut drop = GhostTransition::new(
                    TransitionKind::Drop,
                    *ghost.pose(),
                    to,
                    now,
                    self.config.animation_duration,
                );
                drop.apply(now, &mut ghost);
                env.list.update_ghost(&ghost);
                self.state = DragState::Settling(Settle {
                    ghost,
                    initial,
                    held,
                    drop,
                });
            }
            rest => {
                if let Some(to) = rest {
                    ghost.set_pose(to);
                    env.list.update_ghost(&ghost);
                }
                cleanup(initial, held, env);
            }
        }
    }

    /// One auto-scroll tick.
    ///
    /// `gesture` is the recognizer's current press in viewport coordinates;
    /// it is converted to list-local coordinates after the content offset
    /// has been advanced, then fed to [`update`](Self::update). Skipped when
    /// there is no press or its location is NaN.
    pub fn tick<H>(
        &mut self,
        gesture: Option<&PressGesture>,
        env: &mut ReorderEnv<'_, H>,
        now: Instant,
    ) where
        H: ListHost<Cell = C>,
    {
        let DragState::Dragging(session) = &self.state else {
            return;
        };
        let Some(gesture) = gesture else {
            return;
        };
        if gesture.location.is_nan() {
            tracing::trace!("auto-scroll tick skipped: pointer location is NaN");
            return;
        }

        let metrics = env.list.scroll_metrics();
        let next = metrics.next_offset(session.scroll_rate, self.config.scroll_step);
        if next != metrics.offset {
            tracing::trace!(from = metrics.offset.y, to = next.y, "auto-scroll");
            env.list.set_content_offset(next);
        }

        let offset = env.list.content_offset();
        let local = gesture.translated(offset.x, offset.y);
        self.update(&local, env, now);
    }

    /// Auto-scroll ticks due at `now`.
    pub fn poll_ticker(&mut self, now: Instant) -> u32 {
        self.ticker.poll(now)
    }

    /// Sample running lift or drop transitions. Call on every frame.
    pub fn advance<H>(&mut self, now: Instant, env: &mut ReorderEnv<'_, H>)
    where
        H: ListHost<Cell = C>,
    {
        let settled = match &mut self.state {
            DragState::Idle => false,
            DragState::Dragging(session) => {
                if let Some(lift) = session.lift.as_mut() {
                    lift.apply(now, &mut session.ghost);
                    env.list.update_ghost(&session.ghost);
                    if lift.is_complete() {
                        session.lift = None;
                    }
                }
                false
            }
            DragState::Settling(settle) => {
                settle.drop.apply(now, &mut settle.ghost);
                env.list.update_ghost(&settle.ghost);
                settle.drop.is_complete()
            }
        };
        if settled {
            if let Some(settle) = self.take_settle() {
                cleanup(settle.initial, settle.held, env);
            }
        }
    }

    /// Complete a pending drop immediately.
    pub fn finish_settling<H>(&mut self, env: &mut ReorderEnv<'_, H>)
    where
        H: ListHost<Cell = C>,
    {
        let Some(mut settle) = self.take_settle() else {
            return;
        };
        settle.drop.finish(&mut settle.ghost);
        env.list.update_ghost(&settle.ghost);
        cleanup(settle.initial, settle.held, env);
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// True while a released ghost is still animating into place.
    #[inline]
    pub fn is_settling(&self) -> bool {
        matches!(self.state, DragState::Settling(_))
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<&DragSession<C>> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// The ghost on screen, dragging or settling.
    pub fn ghost(&self) -> Option<&GhostView<C>> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(&session.ghost),
            DragState::Settling(settle) => Some(&settle.ghost),
        }
    }

    /// Why the most recent press was refused.
    #[inline]
    pub fn last_rejection(&self) -> Option<RejectReason> {
        self.last_rejection
    }

    #[inline]
    pub fn ticker_armed(&self) -> bool {
        self.ticker.is_armed()
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

impl<C: Clone> ReorderController<C> {
    fn animates(&self) -> bool {
        self.config.animations_enabled && !self.config.animation_duration.is_zero()
    }

    fn take_session(&mut self) -> Option<DragSession<C>> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging(session) => Some(session),
            other => {
                self.state = other;
                None
            }
        }
    }

    fn take_settle(&mut self) -> Option<Settle<C>> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Settling(settle) => Some(settle),
            other => {
                self.state = other;
                None
            }
        }
    }

    fn lifted_pose(&self, rect: Rect, pointer_y: f64, content_height: f64) -> GhostPose {
        let height = rect.height * self.config.lift_scale;
        let center_y = ghost_center_y(pointer_y, height, content_height);
        GhostPose {
            frame: rect.with_center(Point::new(rect.center().x, center_y)),
            scale: self.config.lift_scale,
            style: self.config.ghost_style,
        }
    }

    fn try_begin<H>(
        &mut self,
        gesture: &PressGesture,
        env: &mut ReorderEnv<'_, H>,
        now: Instant,
    ) -> Result<(), RejectReason>
    where
        H: ListHost<Cell = C>,
    {
        if !self.config.enabled {
            return Err(RejectReason::Disabled);
        }
        if self.is_dragging() {
            return Err(RejectReason::AlreadyDragging);
        }
        self.finish_settling(env);
        if env.data.row_count() == 0 {
            return Err(RejectReason::EmptyList);
        }

        let location = gesture.location;
        let row = env.list.row_at(location).ok_or(RejectReason::NoRowAtPoint)?;
        if !env.data.can_move(row) {
            return Err(RejectReason::DataSourceRefused);
        }
        if !env.delegate.should_move_row(row, gesture) {
            return Err(RejectReason::DelegateRefused);
        }
        let rect = env.list.rect_for_row(row).ok_or(RejectReason::NoRowAtPoint)?;
        let cell = env.list.cell_for_row(row).ok_or(RejectReason::NoCell)?;

        env.feedback.prepare();
        env.feedback.selection_changed();

        let cell = env.delegate.dragging_cell(row, cell);
        let ghost = GhostView::new(cell, row, rect);
        env.list.attach_ghost(&ghost);
        env.delegate.on_show_ghost(&ghost, row);

        let lifted = self.lifted_pose(rect, location.y, env.list.content_size().height);
        let mut session = DragSession::new(row, ghost);
        if self.animates() {
            let mut lift = GhostTransition::new(
                TransitionKind::Lift,
                *session.ghost.pose(),
                lifted,
                now,
                self.config.animation_duration,
            );
            lift.apply(now, &mut session.ghost);
            session.lift = Some(lift);
        } else {
            session.ghost.set_pose(lifted);
        }
        env.list.update_ghost(&session.ghost);
        env.list.set_row_hidden(row, true);
        session.last_vertical_position = Some(location.y);

        self.ticker.arm(now);
        self.state = DragState::Dragging(session);
        self.last_rejection = None;
        tracing::debug!(%row, x = location.x, y = location.y, "reorder drag began");
        Ok(())
    }
}

/// Pose of the ghost once it has settled over `rect`: unscaled, still
/// styled as lifted.
fn resting_pose<C>(rect: Rect, ghost: &GhostView<C>) -> GhostPose {
    GhostPose {
        frame: rect,
        scale: 1.0,
        style: *ghost.style(),
    }
}

/// A hit-test result.
#[derive(Debug, Clone, Copy)]
struct Hit {
    row: RowIndex,
    /// The pointer was outside the content and had to be clamped in.
    clamped: bool,
}

/// Row under `location`, retrying with `y` clamped into the content when the
/// pointer is above or below every row.
fn hit_test<H: ListHost>(list: &H, location: Point) -> Option<Hit> {
    if let Some(row) = list.row_at(location) {
        return Some(Hit {
            row,
            clamped: false,
        });
    }
    let bottom = (list.content_size().height - 0.5).max(0.0);
    let clamped = Point::new(location.x, location.y.clamp(0.0, bottom));
    if clamped == location {
        return None;
    }
    list.row_at(clamped).map(|row| Hit { row, clamped: true })
}

fn resolve_moves<C, H>(session: &mut DragSession<C>, location: Point, env: &mut ReorderEnv<'_, H>)
where
    H: ListHost<Cell = C>,
{
    let Some(hit) = hit_test(&*env.list, location) else {
        return;
    };
    let proposed = env.delegate.target_for_move(session.initial, hit.row);
    if !env.list.contains_row(proposed) {
        tracing::warn!(%proposed, "delegate proposed a row that does not exist");
        return;
    }
    let (Some(held_rect), Some(target_rect)) = (
        env.list.rect_for_row(session.held),
        env.list.rect_for_row(proposed),
    ) else {
        return;
    };

    let probe = DropProbe {
        held: session.held,
        proposed,
        held_height: held_rect.height,
        target_height: target_rect.height,
        // Past either end of the content the edge row counts as fully
        // covered, so dragging above the first row still reaches it. A row
        // the delegate substituted is never under the pointer, so it counts
        // as covered too.
        offset_in_target: if hit.clamped || proposed != hit.row {
            target_rect.height
        } else {
            location.y - target_rect.y
        },
    };
    let data = &*env.data;
    let Some(target) = DropTargetResolver::resolve(&probe, |row| data.can_move(row)) else {
        return;
    };

    for step in step_path(session.held, target) {
        if !env.data.can_move(step) {
            tracing::trace!(%step, "stepped move stopped at a fixed row");
            break;
        }
        let from = session.held;
        env.list.move_row(from, step);
        env.data.move_row(from, step);
        session.held = step;
        session.moves += 1;
        env.feedback.selection_changed();
        tracing::debug!(%from, to = %step, "row moved");
    }
}

fn cleanup<H: ListHost>(initial: RowIndex, held: RowIndex, env: &mut ReorderEnv<'_, H>) {
    env.list.detach_ghost();
    if env.list.contains_row(held) {
        env.list.set_row_hidden(held, false);
    }
    let rows: Vec<RowIndex> = affected_rows(initial, held)
        .into_iter()
        .filter(|row| env.list.contains_row(*row))
        .collect();
    if !rows.is_empty() {
        env.list.reload_rows(&rows, RowAnimation::None);
    }
    env.feedback.selection_changed();
    env.feedback.finalize();
    tracing::trace!(reloaded = rows.len(), "reorder cleanup finished");
}
