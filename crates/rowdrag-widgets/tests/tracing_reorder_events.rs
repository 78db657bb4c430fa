//! Structured log events emitted by the reorder controller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rowdrag_core::Instant;
use rowdrag_core::config::ReorderConfig;
use rowdrag_core::geometry::{Point, Size};
use rowdrag_core::gesture::{GesturePhase, PressGesture};
use rowdrag_core::row::RowIndex;
use rowdrag_widgets::{
    MemoryList, NoFeedback, NoopDelegate, RejectReason, ReorderController, ReorderDelegate,
    ReorderEnv, VecDataSource,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// Tracing capture infrastructure
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct CaptureHandle {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn with_message(&self, message: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.message() == message)
            .collect()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_tracing<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { events }
}

// =========================================================================
// Fixtures
// =========================================================================

const ROW: f64 = 44.0;

fn press(phase: GesturePhase, y: f64, t0: Instant) -> PressGesture {
    PressGesture {
        phase,
        location: Point::new(100.0, y),
        start_location: Point::new(100.0, y),
        pressed_at: t0,
    }
}

fn fixture(n: usize) -> (MemoryList<usize>, VecDataSource<usize>) {
    let list = MemoryList::uniform(0..n, ROW, Size::new(320.0, 600.0));
    let data = VecDataSource::new((0..n).collect());
    (list, data)
}

/// Points every move at a row that does not exist.
struct OutOfRange;

impl ReorderDelegate<usize> for OutOfRange {
    fn target_for_move(&mut self, _from: RowIndex, _proposed: RowIndex) -> RowIndex {
        RowIndex::new(7, 0)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn rejected_begin_logs_reason() {
    let handle = with_captured_tracing(|| {
        let (mut list, mut data) = fixture(3);
        let (mut delegate, mut feedback) = (NoopDelegate, NoFeedback);
        let mut env = ReorderEnv::new(&mut list, &mut data, &mut delegate, &mut feedback);
        let mut ctrl = ReorderController::default();
        let t0 = Instant::now();
        let _ = ctrl.begin(&press(GesturePhase::Began, 500.0, t0), &mut env, t0);
    });

    let rejected = handle.with_message("reorder begin rejected");
    assert_eq!(rejected.len(), 1, "expected one rejection event");
    assert_eq!(rejected[0].level, tracing::Level::DEBUG);
    assert_eq!(
        rejected[0].fields.get("reason").map(String::as_str),
        Some(RejectReason::NoRowAtPoint.to_string().as_str())
    );
    assert!(rejected[0].fields.contains_key("y"));
}

#[test]
fn drag_lifecycle_is_logged() {
    let handle = with_captured_tracing(|| {
        let (mut list, mut data) = fixture(5);
        let (mut delegate, mut feedback) = (NoopDelegate, NoFeedback);
        let mut env = ReorderEnv::new(&mut list, &mut data, &mut delegate, &mut feedback);
        let mut ctrl = ReorderController::new(ReorderConfig::default().without_animations());
        let t0 = Instant::now();
        ctrl.handle(&press(GesturePhase::Began, 20.0, t0), &mut env, t0);
        ctrl.handle(&press(GesturePhase::Changed, 2.0 * ROW + 10.0, t0), &mut env, t0);
        ctrl.handle(&press(GesturePhase::Ended, 2.0 * ROW + 10.0, t0), &mut env, t0);
    });

    let began = handle.with_message("reorder drag began");
    assert_eq!(began.len(), 1);
    assert_eq!(began[0].fields.get("row").map(String::as_str), Some("0:0"));

    assert_eq!(handle.with_message("row moved").len(), 2);

    let ended = handle.with_message("reorder drag ended");
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].fields.get("moves").map(String::as_str), Some("2"));
    assert_eq!(ended[0].fields.get("held").map(String::as_str), Some("0:2"));
}

#[test]
fn bad_delegate_target_warns_and_moves_nothing() {
    let handle = with_captured_tracing(|| {
        let (mut list, mut data) = fixture(4);
        let (mut delegate, mut feedback) = (OutOfRange, NoFeedback);
        let mut env = ReorderEnv::new(&mut list, &mut data, &mut delegate, &mut feedback);
        let mut ctrl = ReorderController::new(ReorderConfig::default().without_animations());
        let t0 = Instant::now();
        ctrl.handle(&press(GesturePhase::Began, 20.0, t0), &mut env, t0);
        ctrl.handle(&press(GesturePhase::Changed, 3.0 * ROW + 10.0, t0), &mut env, t0);
        assert_eq!(ctrl.session().map(|s| s.moves()), Some(0));
    });

    let warnings: Vec<_> = handle
        .events()
        .into_iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].message(),
        "delegate proposed a row that does not exist"
    );
}
