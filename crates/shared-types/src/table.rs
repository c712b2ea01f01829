//! The table markup model: a boundary rectangle plus ordered separator
//! lines, and the transient selection state around it

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Corner, LineSeg, Rect};

/// Radius of the grab circle drawn around corner and separator handles
pub const SELECTION_HANDLE_RADIUS: f64 = 5.0;

/// Minimum width a column may be squeezed to
pub const MIN_COLUMN_WIDTH: f64 = 4.0 * SELECTION_HANDLE_RADIUS;

/// Minimum height a row may be squeezed to
pub const MIN_ROW_HEIGHT: f64 = 4.0 * SELECTION_HANDLE_RADIUS;

/// Multiplicative zoom applied per scroll-wheel notch
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;

/// A table region marked up on a page image.
///
/// Vertical separators are kept sorted left-to-right, horizontal ones
/// top-to-bottom, and every separator spans exactly the boundary's
/// opposite dimension. The layout engine preserves these invariants
/// through every mutation; callers address separators by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRegion {
    pub boundary: Rect,
    pub vertical_separators: Vec<LineSeg>,
    pub horizontal_separators: Vec<LineSeg>,
}

impl TableRegion {
    pub fn column_count(&self) -> usize {
        self.vertical_separators.len() + 1
    }

    pub fn row_count(&self) -> usize {
        self.horizontal_separators.len() + 1
    }

    /// Separators subdividing the given axis: vertical lines for `X`,
    /// horizontal lines for `Y`
    pub fn separators(&self, axis: Axis) -> &[LineSeg] {
        match axis {
            Axis::X => &self.vertical_separators,
            Axis::Y => &self.horizontal_separators,
        }
    }

    pub fn separators_mut(&mut self, axis: Axis) -> &mut Vec<LineSeg> {
        match axis {
            Axis::X => &mut self.vertical_separators,
            Axis::Y => &mut self.horizontal_separators,
        }
    }

    pub fn division_count(&self, axis: Axis) -> usize {
        self.separators(axis).len() + 1
    }

    pub fn translated(&self, dx: f64, dy: f64) -> TableRegion {
        TableRegion {
            boundary: self.boundary.translated(dx, dy),
            vertical_separators: self
                .vertical_separators
                .iter()
                .map(|line| line.translated(dx, dy))
                .collect(),
            horizontal_separators: self
                .horizontal_separators
                .iter()
                .map(|line| line.translated(dx, dy))
                .collect(),
        }
    }

    /// Flat export consumed by the detector mirror: corner coordinates
    /// plus the scalar positions of each separator
    pub fn data(&self) -> TableData {
        TableData {
            top_left: (self.boundary.top_left.x, self.boundary.top_left.y),
            bottom_right: (self.boundary.bottom_right.x, self.boundary.bottom_right.y),
            vlines: self.vertical_separators.iter().map(|l| l.p1.x).collect(),
            hlines: self.horizontal_separators.iter().map(|l| l.p1.y).collect(),
        }
    }
}

/// Position-only snapshot of a table region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub top_left: (f64, f64),
    pub bottom_right: (f64, f64),
    pub vlines: Vec<f64>,
    pub hlines: Vec<f64>,
}

/// Element of a table armed for dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target")]
#[serde(rename_all = "camelCase")]
pub enum SelectedElement {
    Boundary(Corner),
    VerticalSeparator(usize),
    HorizontalSeparator(usize),
}

/// Transient selection state: which table in the page list is armed for
/// editing, and which of its elements (if any) is being dragged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedTable {
    pub index: usize,
    pub table: TableRegion,
    pub element: Option<SelectedElement>,
}

/// Pointer tool selected in the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    TableDrawing,
    Hand,
}

pub const DEFAULT_TOOL: Tool = Tool::Hand;

/// Policy for division-count changes.
///
/// `Append` grows or shrinks the boundary so new cells add physical
/// space; `InsertAtEnd` keeps the boundary fixed and redistributes the
/// existing space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddMode {
    InsertAtEnd,
    Append,
}

/// Per-session drawing settings, mirrored from the selected table so the
/// toolbar reflects its actual counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingSettings {
    pub column_count: usize,
    pub row_count: usize,
    pub column_add_mode: AddMode,
    pub row_add_mode: AddMode,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            column_count: 2,
            row_count: 3,
            column_add_mode: AddMode::InsertAtEnd,
            row_add_mode: AddMode::Append,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn two_by_three() -> TableRegion {
        TableRegion {
            boundary: Rect::from_corners(Point::new(0.0, 0.0), Point::new(100.0, 150.0)),
            vertical_separators: vec![LineSeg::new(
                Point::new(50.0, 0.0),
                Point::new(50.0, 150.0),
            )],
            horizontal_separators: vec![
                LineSeg::new(Point::new(0.0, 50.0), Point::new(100.0, 50.0)),
                LineSeg::new(Point::new(0.0, 100.0), Point::new(100.0, 100.0)),
            ],
        }
    }

    #[test]
    fn test_counts() {
        let table = two_by_three();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.division_count(Axis::X), 2);
        assert_eq!(table.division_count(Axis::Y), 3);
    }

    #[test]
    fn test_data_export() {
        let data = two_by_three().data();
        assert_eq!(data.top_left, (0.0, 0.0));
        assert_eq!(data.bottom_right, (100.0, 150.0));
        assert_eq!(data.vlines, vec![50.0]);
        assert_eq!(data.hlines, vec![50.0, 100.0]);
    }

    #[test]
    fn test_translated_shifts_every_point() {
        let table = two_by_three();
        let moved = table.translated(5.0, 5.0);
        assert_eq!(moved.boundary.top_left, Point::new(5.0, 5.0));
        assert_eq!(moved.boundary.bottom_right, Point::new(105.0, 155.0));
        assert_eq!(moved.vertical_separators[0].p1, Point::new(55.0, 5.0));
        assert_eq!(moved.horizontal_separators[1].p2, Point::new(105.0, 105.0));
    }

    #[test]
    fn test_serialization() {
        let table = two_by_three();

        let serialized = bincode::serialize(&table).unwrap();
        let deserialized: TableRegion = bincode::deserialize(&serialized).unwrap();

        assert_eq!(table, deserialized);
    }

    #[test]
    fn test_minimum_sizes_derive_from_handle_radius() {
        assert_eq!(MIN_COLUMN_WIDTH, 20.0);
        assert_eq!(MIN_ROW_HEIGHT, 20.0);
    }
}
