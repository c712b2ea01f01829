//! Interaction state machine for one page editing surface
//!
//! Pointer, scroll and resize events come in; layout-engine calls and
//! notification events go out. All mutation is synchronous on the
//! caller's thread: every pointer move that changes geometry replaces
//! the table in the page list immediately, so each event leaves a
//! renderable state behind and observers always see the current
//! geometry.

use statement_tables_shared::{
    Axis, DrawingSettings, EditorError, EditorEvent, EditorResult, Point, SelectedTable, Size,
    TableRegion, Tool, AddMode, DEFAULT_TOOL,
};

use crate::hit_test;
use crate::layout;
use crate::view::PageView;

type Observer = Box<dyn Fn(&EditorEvent)>;

/// Interaction controller for a single rendered page.
///
/// The page exclusively owns its table list; a selection is a transient
/// copy of one entry that is written back on every mutation.
pub struct EditorController {
    tool: Tool,
    settings: DrawingSettings,
    view: PageView,
    tables: Vec<TableRegion>,
    selected: Option<SelectedTable>,
    start_pos: Option<Point>,
    end_pos: Option<Point>,
    observers: Vec<Observer>,
}

impl EditorController {
    pub fn new(canvas_size: Size, image_size: Size) -> Self {
        let mut view = PageView::new(canvas_size, image_size);
        view.recenter();
        Self {
            tool: DEFAULT_TOOL,
            settings: DrawingSettings::default(),
            view,
            tables: Vec::new(),
            selected: None,
            start_pos: None,
            end_pos: None,
            observers: Vec::new(),
        }
    }

    /// Register a notification observer. Observers are invoked
    /// synchronously, in subscription order, after each committed
    /// mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&EditorEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&self, event: EditorEvent) {
        log::debug!("editor event: {event:?}");
        for observer in &self.observers {
            observer(&event);
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn settings(&self) -> &DrawingSettings {
        &self.settings
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn tables(&self) -> &[TableRegion] {
        &self.tables
    }

    pub fn selected(&self) -> Option<&SelectedTable> {
        self.selected.as_ref()
    }

    /// Draw preview rectangle corners while a draw drag is in progress
    pub fn draw_preview(&self) -> Option<(Point, Point)> {
        match (self.tool, self.start_pos, self.end_pos) {
            (Tool::TableDrawing, Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Switch between the drawing and hand tools.
    ///
    /// Any selection and any in-progress draw positions are cleared on a
    /// change, so a tool flip mid-drag cannot leave stale preview state
    /// behind.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            log::debug!("tool changed to {tool:?}");
            self.tool = tool;
            self.selected = None;
            self.start_pos = None;
            self.end_pos = None;
        }
    }

    pub fn set_column_add_mode(&mut self, mode: AddMode) {
        self.settings.column_add_mode = mode;
    }

    pub fn set_row_add_mode(&mut self, mode: AddMode) {
        self.settings.row_add_mode = mode;
    }

    /// Change the column count: a live recount of the selected table, or
    /// a settings update for the next table to be drawn when nothing is
    /// selected.
    pub fn set_column_count(&mut self, count: usize) -> EditorResult<()> {
        self.set_division_count(Axis::X, count)
    }

    /// Row-count counterpart of [`Self::set_column_count`]
    pub fn set_row_count(&mut self, count: usize) -> EditorResult<()> {
        self.set_division_count(Axis::Y, count)
    }

    fn set_division_count(&mut self, axis: Axis, count: usize) -> EditorResult<()> {
        if count < 1 {
            return Err(EditorError::InvalidDivisionCount { count });
        }

        let add_mode = match axis {
            Axis::X => self.settings.column_add_mode,
            Axis::Y => self.settings.row_add_mode,
        };

        let selection = self
            .selected
            .as_ref()
            .map(|selected| (selected.index, selected.table.clone()));

        if let Some((index, table)) = selection {
            let updated = layout::set_division_count(&table, axis, count, add_mode)?;
            self.replace_table(index, updated.clone());
            self.set_settings_count(axis, count);
            self.emit(EditorEvent::TableUpdated {
                index,
                table: updated,
            });
        } else {
            self.set_settings_count(axis, count);
        }
        Ok(())
    }

    fn set_settings_count(&mut self, axis: Axis, count: usize) {
        match axis {
            Axis::X => self.settings.column_count = count,
            Axis::Y => self.settings.row_count = count,
        }
    }

    /// Write an updated geometry into the page list and the selection
    /// copy together
    fn replace_table(&mut self, index: usize, table: TableRegion) {
        self.tables[index] = table.clone();
        if let Some(selected) = self.selected.as_mut() {
            if selected.index == index {
                selected.table = table;
            }
        }
    }

    /// Left-button press: records the drag anchor, and with the hand
    /// tool arms whichever handle of the selected table is under the
    /// pointer so subsequent moves can drag it.
    pub fn pointer_down(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.end_pos = Some(pos);

        if self.tool == Tool::Hand {
            if let Some(selected) = self.selected.as_mut() {
                selected.element = hit_test::find_element_near(pos, &selected.table);
            }
        }
    }

    /// Pointer move with the left button held.
    ///
    /// Hand tool: pans the canvas when nothing is selected, or drags the
    /// armed element of the selected table. Drawing tool: tracks the
    /// preview rectangle only; nothing is committed until release.
    pub fn pointer_move(&mut self, pos: Point) -> EditorResult<()> {
        let end = self.end_pos.ok_or(EditorError::NoDragInProgress)?;

        if self.tool == Tool::Hand {
            let armed = self
                .selected
                .as_ref()
                .map(|selected| selected.element.is_some());
            match armed {
                None => {
                    let dx = pos.x - end.x;
                    let dy = pos.y - end.y;
                    self.view.pan(dx, dy);
                    self.tables = layout::translate_tables(&self.tables, dx, dy);
                }
                Some(true) => {
                    let selected = self.selected.as_ref().ok_or(EditorError::NoTableSelected)?;
                    let index = selected.index;
                    let updated = layout::update_selected_element(pos, selected)?;
                    self.replace_table(index, updated.clone());
                    self.emit(EditorEvent::TableUpdated {
                        index,
                        table: updated,
                    });
                }
                // Selected table but no armed element: the press missed
                // every handle, so the move drags nothing.
                Some(false) => {}
            }
        }

        self.end_pos = Some(pos);
        Ok(())
    }

    /// Left-button release: commits a drawn table, or resolves a click
    /// into a selection change, or ends an element drag.
    pub fn pointer_up(&mut self, pos: Point) -> EditorResult<()> {
        match self.tool {
            Tool::TableDrawing => {
                if let Some(start) = self.start_pos {
                    let table = layout::make_table(
                        start,
                        pos,
                        self.settings.column_count,
                        self.settings.row_count,
                    )?;
                    self.tables.push(table.clone());
                    self.emit(EditorEvent::NewTable { table });
                }
            }
            Tool::Hand => {
                if self.selected.is_some() {
                    // Ending an element drag keeps the table selected;
                    // the moves already notified on every change.
                    if let Some(selected) = self.selected.as_mut() {
                        selected.element = None;
                    }
                } else {
                    match hit_test::find_table_near(pos, &self.tables) {
                        Some(index) => {
                            let table = self.tables[index].clone();
                            self.settings.column_count = table.column_count();
                            self.settings.row_count = table.row_count();
                            self.selected = Some(SelectedTable {
                                index,
                                table,
                                element: None,
                            });
                            self.emit(EditorEvent::TableSelected { index });
                        }
                        None => self.emit(EditorEvent::TableDeselected),
                    }
                }
            }
        }

        self.start_pos = None;
        self.end_pos = None;
        Ok(())
    }

    /// Scroll-wheel zoom: rescale the displayed image by the fixed zoom
    /// step, recentre it, and rescale every table about the image centre.
    pub fn scroll(&mut self, steps: i32) -> EditorResult<()> {
        self.view.zoom(steps);
        self.view.recenter();
        let relative = self.view.advance_scale_ratio();
        self.tables = layout::rescale_tables(&self.tables, self.view.centre(), relative)?;
        self.sync_selected_table();
        Ok(())
    }

    /// Canvas resize: the origin shift is a pure translation of every
    /// table; any image-size-driven change is handled by the rescale.
    pub fn canvas_resized(&mut self, canvas_size: Size) -> EditorResult<()> {
        self.view.set_canvas_size(canvas_size);
        let (dx, dy) = self.view.recenter();
        self.tables = layout::translate_tables(&self.tables, dx, dy);
        let relative = self.view.advance_scale_ratio();
        self.tables = layout::rescale_tables(&self.tables, self.view.centre(), relative)?;
        self.sync_selected_table();
        Ok(())
    }

    /// Install a freshly rendered page image, resetting zoom and pan
    pub fn set_page_image(&mut self, image_size: Size) {
        self.view.reset_image(image_size);
    }

    /// Delete a table from the page.
    ///
    /// A selection pointing at the deleted table is cleared (with a
    /// deselection notification); selections behind it shift down.
    pub fn remove_table(&mut self, index: usize) -> EditorResult<()> {
        if index >= self.tables.len() {
            return Err(EditorError::TableIndexOutOfRange {
                index,
                len: self.tables.len(),
            });
        }
        self.tables.remove(index);

        let mut deselected = false;
        if let Some(selected) = self.selected.as_mut() {
            if selected.index == index {
                deselected = true;
            } else if selected.index > index {
                selected.index -= 1;
            }
        }
        if deselected {
            self.selected = None;
        } else {
            self.sync_selected_table();
        }

        self.emit(EditorEvent::TableDeleted { index });
        if deselected {
            self.emit(EditorEvent::TableDeselected);
        }
        Ok(())
    }

    /// Refresh the selection's table copy after a bulk transform
    fn sync_selected_table(&mut self) {
        if let Some(selected) = self.selected.as_mut() {
            if let Some(table) = self.tables.get(selected.index) {
                selected.table = table.clone();
            }
        }
    }
}
