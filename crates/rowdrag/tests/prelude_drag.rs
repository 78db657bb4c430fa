//! A complete drag through the facade: JSON config, raw pointer events, and a
//! host-defined data source.

use std::time::Duration;

use rowdrag::prelude::*;

/// A to-do list whose first entry is a header that never moves.
struct Todos {
    items: Vec<&'static str>,
}

impl ReorderDataSource for Todos {
    fn row_count(&self) -> usize {
        self.items.len()
    }

    fn can_move(&self, row: RowIndex) -> bool {
        row.row != 0
    }

    fn move_row(&mut self, from: RowIndex, to: RowIndex) {
        let item = self.items.remove(from.row);
        self.items.insert(to.row, item);
    }
}

#[test]
fn json_configured_drag_reorders_host_data() {
    let config = rowdrag::config_from_json(
        r#"{
            "press": { "min_press_duration": { "secs": 0, "nanos": 200000000 } },
            "animations_enabled": false
        }"#,
    )
    .unwrap();

    let items = vec!["Today", "milk", "eggs", "bread"];
    let list = MemoryList::uniform(items.clone(), 40.0, Size::new(320.0, 480.0));
    let mut reorder = ReorderList::new(list, Todos { items }).with_config(config);
    let t0 = Instant::now();

    reorder.handle_pointer(&PointerEvent::down(50.0, 130.0), t0);
    reorder.on_frame(t0 + Duration::from_millis(250));
    assert!(reorder.is_dragging());

    // The header refuses to trade places.
    reorder.handle_pointer(&PointerEvent::moved(50.0, 10.0), t0 + Duration::from_millis(300));
    assert_eq!(reorder.data().items, vec!["Today", "milk", "eggs", "bread"]);

    reorder.handle_pointer(&PointerEvent::moved(50.0, 50.0), t0 + Duration::from_millis(320));
    reorder.handle_pointer(&PointerEvent::up(50.0, 50.0), t0 + Duration::from_millis(350));

    assert!(!reorder.is_dragging());
    assert_eq!(reorder.data().items, vec!["Today", "bread", "milk", "eggs"]);
    assert_eq!(
        reorder.list().cells(0),
        vec!["Today", "bread", "milk", "eggs"]
    );
}

#[test]
fn header_row_cannot_be_lifted() {
    let items = vec!["Today", "milk"];
    let list = MemoryList::uniform(items.clone(), 40.0, Size::new(320.0, 480.0));
    let mut reorder = ReorderList::new(list, Todos { items });
    let t0 = Instant::now();

    reorder.handle_pointer(&PointerEvent::down(50.0, 10.0), t0);
    reorder.on_frame(t0 + Duration::from_millis(600));
    assert!(!reorder.is_dragging());
    assert_eq!(
        reorder.controller().last_rejection(),
        Some(rowdrag::RejectReason::DataSourceRefused)
    );
}
