//! Shared types for the statement-tables workspace
//!
//! This crate contains the types shared between the table editor and the
//! detector-settings crates: geometric primitives, the table markup
//! model, editor notification events and the common error enum. The
//! types are plain serde-derived data; all behaviour beyond simple
//! accessors lives in the editor crate.

pub mod errors;
pub mod events;
pub mod geometry;
pub mod table;

pub use errors::{EditorError, EditorResult};
pub use events::EditorEvent;
pub use geometry::{Axis, Corner, LineSeg, Point, Rect, Size};
pub use table::{
    AddMode, DrawingSettings, SelectedElement, SelectedTable, TableData, TableRegion, Tool,
    DEFAULT_TOOL, DEFAULT_ZOOM_STEP, MIN_COLUMN_WIDTH, MIN_ROW_HEIGHT, SELECTION_HANDLE_RADIUS,
};
