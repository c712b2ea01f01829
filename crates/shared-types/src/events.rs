//! Editor notification events consumed by the detector mirror and the
//! extracted-text display

use serde::{Deserialize, Serialize};

use crate::table::TableRegion;

/// Notification emitted after each committed mutation of the page's
/// table list.
///
/// Drag gestures emit `TableUpdated` on every pointer move, so consumers
/// always see the geometry the page is currently rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
#[serde(rename_all = "camelCase")]
pub enum EditorEvent {
    NewTable { table: TableRegion },
    TableUpdated { index: usize, table: TableRegion },
    TableDeleted { index: usize },
    TableSelected { index: usize },
    TableDeselected,
}
