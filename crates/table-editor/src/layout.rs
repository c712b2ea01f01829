//! Pure layout mathematics over [`TableRegion`]
//!
//! Every function here takes the current geometry and returns a new one;
//! nothing mutates in place and nothing touches selection or view state.
//! Separator positions are carried through mutations as *distributions*:
//! the ordered fractions (0–1) of each separator's offset from the
//! boundary's near edge, relative to the boundary size along that axis.
//! Extracting the distribution before a structural change and
//! regenerating the lines from it afterwards is what keeps columns and
//! rows proportionally stable under resize, recount and rescale.

use statement_tables_shared::{
    Axis, Corner, EditorError, EditorResult, LineSeg, Point, Rect, SelectedElement, SelectedTable,
    TableRegion, AddMode, MIN_COLUMN_WIDTH, MIN_ROW_HEIGHT,
};

/// Minimum width the table may be resized to: every column keeps at
/// least [`MIN_COLUMN_WIDTH`]
pub fn min_table_width(table: &TableRegion) -> f64 {
    table.column_count() as f64 * MIN_COLUMN_WIDTH
}

/// Minimum height the table may be resized to: every row keeps at least
/// [`MIN_ROW_HEIGHT`]
pub fn min_table_height(table: &TableRegion) -> f64 {
    table.row_count() as f64 * MIN_ROW_HEIGHT
}

fn min_cell_size(axis: Axis) -> f64 {
    match axis {
        Axis::X => MIN_COLUMN_WIDTH,
        Axis::Y => MIN_ROW_HEIGHT,
    }
}

/// Generate the separator lines for `division_count` divisions along
/// `axis` of `boundary`.
///
/// A provided distribution must describe exactly `division_count - 1`
/// separators; with no distribution the divisions are evenly spaced
/// (`{1/n, 2/n, ...}`). Each generated line spans the full opposite
/// dimension of the boundary.
pub fn generate_lines(
    boundary: &Rect,
    division_count: usize,
    axis: Axis,
    distribution: Option<&[f64]>,
) -> EditorResult<Vec<LineSeg>> {
    let fractions: Vec<f64> = match distribution {
        Some(given) => {
            if given.len() + 1 != division_count {
                return Err(EditorError::DistributionMismatch {
                    expected: division_count.saturating_sub(1),
                    got: given.len(),
                });
            }
            given.to_vec()
        }
        // e.g. division_count=5 => [0.2, 0.4, 0.6, 0.8]
        None => (1..division_count)
            .map(|i| i as f64 / division_count as f64)
            .collect(),
    };

    let near_edge = boundary.near_edge(axis);
    let size = boundary.extent(axis);
    let span_start = boundary.near_edge(axis.perpendicular());
    let span_end = boundary.far_edge(axis.perpendicular());

    let lines = fractions
        .iter()
        .map(|fraction| {
            let pos = near_edge + size * fraction;
            match axis {
                Axis::X => LineSeg::new(Point::new(pos, span_start), Point::new(pos, span_end)),
                Axis::Y => LineSeg::new(Point::new(span_start, pos), Point::new(span_end, pos)),
            }
        })
        .collect();

    Ok(lines)
}

/// Inverse of [`generate_lines`]: the fraction of each existing
/// separator's offset from the boundary's near edge.
///
/// For a boundary at x=150 of width 200 with a vertical separator at
/// x=200, the fraction is |200 - 150| / 200 = 0.25.
pub fn extract_distribution(table: &TableRegion, axis: Axis) -> Vec<f64> {
    let near_edge = table.boundary.near_edge(axis);
    let size = table.boundary.extent(axis);

    table
        .separators(axis)
        .iter()
        .map(|line| (near_edge - line.p1.along(axis)).abs() / size)
        .collect()
}

/// The `[min, max]` range a separator may travel along its axis.
///
/// The range is bounded by the neighbouring separators (or the boundary
/// edges where there is no neighbour), each inset by the minimum cell
/// size so no column or row can shrink below it.
pub fn translation_bounds(
    table: &TableRegion,
    index: usize,
    axis: Axis,
    min_size: f64,
) -> EditorResult<(f64, f64)> {
    let lines = table.separators(axis);
    if index >= lines.len() {
        return Err(EditorError::SeparatorIndexOutOfRange {
            index,
            len: lines.len(),
        });
    }

    let previous = if index == 0 {
        table.boundary.near_edge(axis)
    } else {
        lines[index - 1].p1.along(axis)
    };
    let next = if index == lines.len() - 1 {
        table.boundary.far_edge(axis)
    } else {
        lines[index + 1].p1.along(axis)
    };

    // min/max ordering guards against a neighbour that sits on the wrong
    // side after a mirrored boundary
    Ok((
        previous.min(next) + min_size,
        previous.max(next) - min_size,
    ))
}

/// Create a table from two opposite corners of a draw gesture, with the
/// requested division counts evenly spaced.
///
/// The corners may arrive in any order; the boundary is normalized.
pub fn make_table(
    start: Point,
    end: Point,
    column_count: usize,
    row_count: usize,
) -> EditorResult<TableRegion> {
    if column_count < 1 {
        return Err(EditorError::InvalidDivisionCount {
            count: column_count,
        });
    }
    if row_count < 1 {
        return Err(EditorError::InvalidDivisionCount { count: row_count });
    }

    let boundary = Rect::from_corners(start, end);
    Ok(TableRegion {
        vertical_separators: generate_lines(&boundary, column_count, Axis::X, None)?,
        horizontal_separators: generate_lines(&boundary, row_count, Axis::Y, None)?,
        boundary,
    })
}

/// Resize the table by dragging one boundary corner to `pos`.
///
/// The diagonally opposite corner stays fixed (until the minimum-size
/// clamp engages), and both separator sets are rebuilt from the
/// pre-resize distributions so relative column and row proportions are
/// preserved.
pub fn resize_by_corner(
    pos: Point,
    table: &TableRegion,
    corner: Corner,
) -> EditorResult<TableRegion> {
    let grabbed = table.boundary.corner(corner);
    let dx = pos.x - grabbed.x;
    let dy = pos.y - grabbed.y;

    // The origin only moves when a left-side or top-side handle is the
    // one being dragged.
    let x0 = if corner.is_left() {
        pos.x
    } else {
        table.boundary.left()
    };
    let y0 = if corner.is_top() {
        pos.y
    } else {
        table.boundary.top()
    };

    let width = table.boundary.width() + if corner.is_left() { -dx } else { dx };
    let height = table.boundary.height() + if corner.is_top() { -dy } else { dy };

    let width = width.max(min_table_width(table));
    let height = height.max(min_table_height(table));

    let boundary = Rect::new(x0, y0, width, height);

    let column_distribution = extract_distribution(table, Axis::X);
    let row_distribution = extract_distribution(table, Axis::Y);

    Ok(TableRegion {
        vertical_separators: generate_lines(
            &boundary,
            column_distribution.len() + 1,
            Axis::X,
            Some(&column_distribution),
        )?,
        horizontal_separators: generate_lines(
            &boundary,
            row_distribution.len() + 1,
            Axis::Y,
            Some(&row_distribution),
        )?,
        boundary,
    })
}

/// Move a single separator towards the pointer, clamped to its
/// translation bounds.
///
/// Only the pointer coordinate along the separator's travel axis is
/// read: a vertical separator can be grabbed from anywhere along its
/// length (even outside the boundary's vertical range) and still only
/// moves horizontally. The moved line always spans the boundary's full
/// opposite dimension.
pub fn drag_separator(
    pos: Point,
    table: &TableRegion,
    axis: Axis,
    index: usize,
) -> EditorResult<TableRegion> {
    let (min_pos, max_pos) = translation_bounds(table, index, axis, min_cell_size(axis))?;
    // Not f64::clamp: a table drawn smaller than two minimum cells has
    // min_pos > max_pos, and the lower bound takes priority then.
    let coord = pos.along(axis);
    let clamped = if coord < min_pos {
        min_pos
    } else if coord > max_pos {
        max_pos
    } else {
        coord
    };

    let line = match axis {
        Axis::X => LineSeg::new(
            Point::new(clamped, table.boundary.top()),
            Point::new(clamped, table.boundary.bottom()),
        ),
        Axis::Y => LineSeg::new(
            Point::new(table.boundary.left(), clamped),
            Point::new(table.boundary.right(), clamped),
        ),
    };

    let mut updated = table.clone();
    updated.separators_mut(axis)[index] = line;
    Ok(updated)
}

/// Apply the pointer position to whichever element of `selected` is
/// armed: a corner drag resizes, a separator drag translates that line.
///
/// Requesting this with no armed element is a contract violation and
/// fails loudly.
pub fn update_selected_element(pos: Point, selected: &SelectedTable) -> EditorResult<TableRegion> {
    match selected.element {
        Some(SelectedElement::Boundary(corner)) => resize_by_corner(pos, &selected.table, corner),
        Some(SelectedElement::VerticalSeparator(index)) => {
            drag_separator(pos, &selected.table, Axis::X, index)
        }
        Some(SelectedElement::HorizontalSeparator(index)) => {
            drag_separator(pos, &selected.table, Axis::Y, index)
        }
        None => Err(EditorError::NoElementSelected),
    }
}

/// Change the number of columns (`axis = X`) or rows (`axis = Y`) to
/// `target_count`.
///
/// Cells are added or removed at the far end, each new cell the size of
/// the current last one. With [`AddMode::Append`] the boundary grows or
/// shrinks by the added/removed proportion so existing cells keep their
/// physical size; with [`AddMode::InsertAtEnd`] the boundary is fixed
/// and existing cells are redistributed. The perpendicular separators
/// are regenerated against the final boundary so their lengths stay
/// correct, but their own distribution is untouched.
///
/// In either mode the boundary ends up at least `target_count` minimum
/// cell sizes along the axis; a recount that would squeeze cells below
/// the minimum grows the boundary instead.
pub fn set_division_count(
    table: &TableRegion,
    axis: Axis,
    target_count: usize,
    add_mode: AddMode,
) -> EditorResult<TableRegion> {
    if target_count < 1 {
        return Err(EditorError::InvalidDivisionCount {
            count: target_count,
        });
    }

    let separator_distribution = extract_distribution(table, axis);

    // Per-cell sizes, with the implicit 0.0 and 1.0 boundaries.
    let mut cell_sizes: Vec<f64> = Vec::with_capacity(separator_distribution.len() + 1);
    let mut previous = 0.0;
    for fraction in &separator_distribution {
        cell_sizes.push(fraction - previous);
        previous = *fraction;
    }
    cell_sizes.push(1.0 - previous);

    // Grow by duplicating the last cell, shrink by popping from the end;
    // the accumulated delta drives the boundary change in append mode.
    let mut boundary_size_change = 0.0;
    if target_count >= cell_sizes.len() {
        let last = cell_sizes[cell_sizes.len() - 1];
        for _ in cell_sizes.len()..target_count {
            cell_sizes.push(last);
            boundary_size_change += last;
        }
    } else {
        while cell_sizes.len() > target_count {
            if let Some(removed) = cell_sizes.pop() {
                boundary_size_change -= removed;
            }
        }
    }

    let total: f64 = cell_sizes.iter().sum();
    let normalization = 1.0 / total;

    let mut new_distribution = Vec::with_capacity(cell_sizes.len() - 1);
    let mut accumulated = 0.0;
    for size in &cell_sizes[..cell_sizes.len() - 1] {
        accumulated += size * normalization;
        new_distribution.push(accumulated);
    }

    let boundary = match add_mode {
        AddMode::Append => {
            let width = match axis {
                Axis::X => table.boundary.width() * (1.0 + boundary_size_change),
                Axis::Y => table.boundary.width(),
            };
            let height = match axis {
                Axis::X => table.boundary.height(),
                Axis::Y => table.boundary.height() * (1.0 + boundary_size_change),
            };
            Rect::new(table.boundary.left(), table.boundary.top(), width, height)
        }
        AddMode::InsertAtEnd => table.boundary,
    };

    // Every cell keeps its minimum size, whichever mode produced the
    // boundary: a recount on a small table grows it rather than
    // squeezing cells below the minimum.
    let min_extent = min_cell_size(axis) * target_count as f64;
    let boundary = if boundary.extent(axis) < min_extent {
        let (width, height) = match axis {
            Axis::X => (min_extent, boundary.height()),
            Axis::Y => (boundary.width(), min_extent),
        };
        Rect::new(boundary.left(), boundary.top(), width, height)
    } else {
        boundary
    };

    let new_lines = generate_lines(&boundary, target_count, axis, Some(&new_distribution))?;

    // Regenerate the other axis against the (possibly resized) boundary
    // so separator lengths match it; the distribution itself is
    // unchanged.
    let perpendicular = axis.perpendicular();
    let perpendicular_distribution = extract_distribution(table, perpendicular);
    let perpendicular_lines = generate_lines(
        &boundary,
        perpendicular_distribution.len() + 1,
        perpendicular,
        Some(&perpendicular_distribution),
    )?;

    let (vertical_separators, horizontal_separators) = match axis {
        Axis::X => (new_lines, perpendicular_lines),
        Axis::Y => (perpendicular_lines, new_lines),
    };

    Ok(TableRegion {
        boundary,
        vertical_separators,
        horizontal_separators,
    })
}

/// Shift every table by `(dx, dy)`. Distributions are unaffected since
/// all points move identically.
pub fn translate_tables(tables: &[TableRegion], dx: f64, dy: f64) -> Vec<TableRegion> {
    tables.iter().map(|table| table.translated(dx, dy)).collect()
}

/// Rescale every table about `pivot` by `relative_ratio`, preserving
/// both separator distributions.
///
/// Each boundary corner's offset from the pivot is scaled by the ratio;
/// the controller passes the image centre as the pivot, but a
/// pointer-anchored zoom only needs a different argument. Ratios compose
/// multiplicatively across successive zoom steps; the caller tracks the
/// absolute ratio and passes the relative change.
pub fn rescale_tables(
    tables: &[TableRegion],
    pivot: Point,
    relative_ratio: f64,
) -> EditorResult<Vec<TableRegion>> {
    let mut scaled = Vec::with_capacity(tables.len());

    for table in tables {
        let column_distribution = extract_distribution(table, Axis::X);
        let row_distribution = extract_distribution(table, Axis::Y);

        let scale_about_pivot = |point: Point| {
            Point::new(
                pivot.x + (point.x - pivot.x) * relative_ratio,
                pivot.y + (point.y - pivot.y) * relative_ratio,
            )
        };
        let boundary = Rect::from_corners(
            scale_about_pivot(table.boundary.top_left),
            scale_about_pivot(table.boundary.bottom_right),
        );

        scaled.push(TableRegion {
            vertical_separators: generate_lines(
                &boundary,
                column_distribution.len() + 1,
                Axis::X,
                Some(&column_distribution),
            )?,
            horizontal_separators: generate_lines(
                &boundary,
                row_distribution.len() + 1,
                Axis::Y,
                Some(&row_distribution),
            )?,
            boundary,
        });
    }

    Ok(scaled)
}
