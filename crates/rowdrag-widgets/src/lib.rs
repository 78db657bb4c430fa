#![forbid(unsafe_code)]

//! Long-press drag-to-reorder for scrollable lists.
//!
//! # Role in rowdrag
//! `rowdrag-widgets` is the reorder interaction itself: the state machine
//! that lifts a row into a floating ghost, follows the pointer, swaps rows
//! as the ghost passes over them, scrolls the list near its edges and
//! settles the ghost into its final slot.
//!
//! # Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`host`] | Collaborator traits the list, data source, delegate and haptics implement |
//! | [`ghost`] | The floating snapshot and its lift/drop transitions |
//! | [`resolver`] | When the held row moves, and through which steps |
//! | [`session`] | Per-drag state |
//! | [`controller`] | The state machine |
//! | [`reorder_list`] | Pointer events and frame ticks in, everything else handled |
//! | [`memory`] | Headless in-memory list and data source |
//!
//! Most hosts only need [`ReorderList`]. Hosts that already own a gesture
//! pipeline can drive [`ReorderController`] directly with [`PressGesture`]
//! updates.
//!
//! [`PressGesture`]: rowdrag_core::gesture::PressGesture

pub mod controller;
pub mod ghost;
pub mod host;
pub mod memory;
pub mod reorder_list;
pub mod resolver;
pub mod session;

pub use controller::{Disposition, RejectReason, ReorderController, ReorderEnv};
pub use ghost::{GhostPose, GhostTransition, GhostView, TransitionKind};
pub use host::{
    ListHost, NoFeedback, NoopDelegate, ReorderDataSource, ReorderDelegate, RowAnimation,
    SelectionFeedback,
};
pub use memory::{MemoryList, MemoryRow, VecDataSource};
pub use reorder_list::ReorderList;
pub use resolver::{DropProbe, DropTargetResolver, step_path};
pub use session::DragSession;
