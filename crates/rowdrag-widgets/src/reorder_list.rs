#![forbid(unsafe_code)]

//! Host integration: a list with long-press reordering attached.
//!
//! [`ReorderList`] owns the host list, the data source, the optional
//! delegate and feedback generator, a [`LongPressRecognizer`] and a
//! [`ReorderController`]. The host forwards raw pointer events and calls
//! [`on_frame`](ReorderList::on_frame) once per frame; everything else
//! (press timing, auto-scroll, lift and drop transitions) happens inside.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use rowdrag_core::event::PointerEvent;
//! use rowdrag_core::geometry::Size;
//! use rowdrag_core::Instant;
//! use rowdrag_widgets::memory::{MemoryList, VecDataSource};
//! use rowdrag_widgets::reorder_list::ReorderList;
//!
//! let list = MemoryList::uniform(["a", "b", "c"], 44.0, Size::new(320.0, 480.0));
//! let data = VecDataSource::new(vec!["a", "b", "c"]);
//! let mut reorder = ReorderList::new(list, data);
//!
//! let t0 = Instant::now();
//! reorder.handle_pointer(&PointerEvent::down(100.0, 20.0), t0);
//! reorder.on_frame(t0 + Duration::from_millis(500));
//! reorder.handle_pointer(&PointerEvent::moved(100.0, 70.0), t0 + Duration::from_millis(600));
//! reorder.handle_pointer(&PointerEvent::up(100.0, 70.0), t0 + Duration::from_millis(700));
//! reorder.finish_settling();
//!
//! assert_eq!(reorder.data().items(0), &["b", "a", "c"]);
//! ```

use std::time::Duration;

use rowdrag_core::config::ReorderConfig;
use rowdrag_core::event::PointerEvent;
use rowdrag_core::gesture::{LongPressRecognizer, PressGesture};
use web_time::Instant;

use crate::controller::{Disposition, ReorderController, ReorderEnv};
use crate::host::{
    ListHost, NoFeedback, NoopDelegate, ReorderDataSource, ReorderDelegate, SelectionFeedback,
};

/// A list view with long-press drag-to-reorder.
pub struct ReorderList<H: ListHost, D, G = NoopDelegate, F = NoFeedback> {
    list: H,
    data: D,
    delegate: G,
    feedback: F,
    recognizer: LongPressRecognizer,
    controller: ReorderController<H::Cell>,
    /// Latest timestamp handed in by the host.
    clock: Option<Instant>,
}

impl<H, D, G, F> std::fmt::Debug for ReorderList<H, D, G, F>
where
    H: ListHost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReorderList")
            .field("recognizer", &self.recognizer)
            .field("dragging", &self.controller.is_dragging())
            .field("settling", &self.controller.is_settling())
            .finish_non_exhaustive()
    }
}

impl<H, D> ReorderList<H, D>
where
    H: ListHost,
    D: ReorderDataSource,
{
    /// Attach reordering with the default configuration, no delegate and no
    /// feedback.
    #[must_use]
    pub fn new(list: H, data: D) -> Self {
        let config = ReorderConfig::default();
        let mut recognizer = LongPressRecognizer::new(config.press);
        recognizer.set_enabled(config.enabled);
        Self {
            list,
            data,
            delegate: NoopDelegate,
            feedback: NoFeedback,
            recognizer,
            controller: ReorderController::new(config),
            clock: None,
        }
    }
}

impl<H, D, G, F> ReorderList<H, D, G, F>
where
    H: ListHost,
    D: ReorderDataSource,
    G: ReorderDelegate<H::Cell>,
    F: SelectionFeedback,
{
    /// Replace the configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: ReorderConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Install a delegate.
    #[must_use]
    pub fn with_delegate<G2>(self, delegate: G2) -> ReorderList<H, D, G2, F>
    where
        G2: ReorderDelegate<H::Cell>,
    {
        ReorderList {
            list: self.list,
            data: self.data,
            delegate,
            feedback: self.feedback,
            recognizer: self.recognizer,
            controller: self.controller,
            clock: self.clock,
        }
    }

    /// Install a feedback generator.
    #[must_use]
    pub fn with_feedback<F2>(self, feedback: F2) -> ReorderList<H, D, G, F2>
    where
        F2: SelectionFeedback,
    {
        ReorderList {
            list: self.list,
            data: self.data,
            delegate: self.delegate,
            feedback,
            recognizer: self.recognizer,
            controller: self.controller,
            clock: self.clock,
        }
    }

    // -- Configuration -----------------------------------------------------

    pub fn config(&self) -> &ReorderConfig {
        self.controller.config()
    }

    /// Apply a new configuration. Disabling cancels an active drag.
    pub fn set_config(&mut self, config: ReorderConfig) {
        let enabled = config.enabled;
        self.recognizer.set_config(config.press);
        self.controller.set_config(config);
        self.set_reorder_enabled(enabled);
    }

    /// Whether long-press reordering is enabled.
    #[inline]
    pub fn reorder_enabled(&self) -> bool {
        self.recognizer.is_enabled()
    }

    /// Enable or disable long-press reordering. Disabling cancels an active
    /// drag, which then settles like a release.
    pub fn set_reorder_enabled(&mut self, enabled: bool) {
        if self.controller.config().enabled != enabled {
            let config = self.controller.config().clone().with_enabled(enabled);
            self.controller.set_config(config);
        }
        if let Some(cancelled) = self.recognizer.set_enabled(enabled) {
            tracing::debug!("reorder disabled during a drag");
            let now = self.now();
            self.forward(&cancelled, now);
        }
    }

    #[inline]
    pub fn min_press_duration(&self) -> Duration {
        self.recognizer.min_press_duration()
    }

    /// Change the press duration. Takes effect for the next press.
    pub fn set_min_press_duration(&mut self, duration: Duration) {
        self.recognizer.set_min_press_duration(duration);
        let config = self.controller.config().clone().with_min_press_duration(duration);
        self.controller.set_config(config);
    }

    // -- Input -------------------------------------------------------------

    /// Feed one pointer event. Positions are in viewport coordinates.
    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant) {
        self.clock = Some(now);
        if let Some(gesture) = self.recognizer.process(event, now) {
            self.dispatch(gesture, now);
        }
    }

    /// Per-frame work: the long-press timer, auto-scroll ticks and ghost
    /// transitions.
    pub fn on_frame(&mut self, now: Instant) {
        self.clock = Some(now);
        if let Some(began) = self.recognizer.check_long_press(now) {
            self.dispatch(began, now);
        }

        let ticks = self.controller.poll_ticker(now);
        for _ in 0..ticks {
            let current = self.recognizer.current();
            let (controller, mut env) = self.parts();
            controller.tick(current.as_ref(), &mut env, now);
        }

        let (controller, mut env) = self.parts();
        controller.advance(now, &mut env);
    }

    /// Complete a pending drop transition immediately.
    pub fn finish_settling(&mut self) {
        let (controller, mut env) = self.parts();
        controller.finish_settling(&mut env);
    }

    // -- Accessors ---------------------------------------------------------

    pub fn list(&self) -> &H {
        &self.list
    }

    /// Mutable access to the host list. Changing rows while a drag is active
    /// is the caller's responsibility.
    pub fn list_mut(&mut self) -> &mut H {
        &mut self.list
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    pub fn delegate(&self) -> &G {
        &self.delegate
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn controller(&self) -> &ReorderController<H::Cell> {
        &self.controller
    }

    pub fn recognizer(&self) -> &LongPressRecognizer {
        &self.recognizer
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Take the collaborators back.
    pub fn into_parts(self) -> (H, D, G, F) {
        (self.list, self.data, self.delegate, self.feedback)
    }

    // -- Internals ---------------------------------------------------------

    fn now(&self) -> Instant {
        self.clock.unwrap_or_else(Instant::now)
    }

    fn parts(&mut self) -> (&mut ReorderController<H::Cell>, ReorderEnv<'_, H>) {
        let env = ReorderEnv::new(
            &mut self.list,
            &mut self.data,
            &mut self.delegate,
            &mut self.feedback,
        );
        (&mut self.controller, env)
    }

    /// Translate a viewport-space gesture into list-local coordinates.
    fn to_local(&self, gesture: &PressGesture) -> PressGesture {
        let offset = self.list.content_offset();
        gesture.translated(offset.x, offset.y)
    }

    fn forward(&mut self, gesture: &PressGesture, now: Instant) -> Disposition {
        let local = self.to_local(gesture);
        let (controller, mut env) = self.parts();
        controller.handle(&local, &mut env, now)
    }

    fn dispatch(&mut self, gesture: PressGesture, now: Instant) {
        if self.forward(&gesture, now) == Disposition::CancelGesture {
            tracing::trace!(phase = ?gesture.phase, "reorder gesture cancelled");
            if let Some(cancelled) = self.recognizer.reset() {
                self.forward(&cancelled, now);
            }
        }
    }
}
