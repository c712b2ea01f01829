//! Multi-page detector workspace
//!
//! Holds one observable settings record and one explicit-line list per
//! rendered page, and mirrors editor table geometry into those lines so
//! the external detector sees the marked-up regions. Line positions are
//! normalized to [`BASE_IMAGE_RESOLUTION`] regardless of the resolution
//! the pages were rendered at.

use serde::{Deserialize, Serialize};
use statement_tables_shared::{EditorError, EditorEvent, EditorResult, TableData};
use uuid::Uuid;

use crate::observable::ObservableSettings;
use crate::settings::{
    PageSelector, SettingKey, SettingValue, TableSettings, BASE_IMAGE_RESOLUTION,
};

/// Orientation of an explicit detector line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    fn setting_key(&self) -> SettingKey {
        match self {
            Orientation::Vertical => SettingKey::ExplicitVerticalLines,
            Orientation::Horizontal => SettingKey::ExplicitHorizontalLines,
        }
    }
}

/// One explicit line handed to the detector.
///
/// Lines mirrored from a table region are flagged so the settings panel
/// can hide them from the manually managed list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitLine {
    pub id: Uuid,
    pub position: f64,
    pub orientation: Orientation,
    pub part_of_table: bool,
}

/// Where an added page lands in the page list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddPageMode {
    AtBeginning,
    AtEnd,
    InsertAfter(usize),
    /// Replace a run of consecutive page indices with the new page
    Replace(Vec<usize>),
}

/// Per-page detector state
pub struct DetectorPage {
    pub settings: ObservableSettings,
    explicit_lines: Vec<ExplicitLine>,
    /// Mirrored line ids per table, parallel to the editor's page table
    /// list
    table_lines: Vec<Vec<Uuid>>,
}

impl DetectorPage {
    fn new() -> Self {
        Self {
            settings: ObservableSettings::new(TableSettings::default()),
            explicit_lines: Vec::new(),
            table_lines: Vec::new(),
        }
    }

    pub fn explicit_lines(&self) -> &[ExplicitLine] {
        &self.explicit_lines
    }
}

/// The detector-side mirror of an editing session
pub struct DetectorWorkspace {
    pages: Vec<DetectorPage>,
    /// Resolution (px/inch) the page images were rendered at
    resolution: u32,
}

impl DetectorWorkspace {
    pub fn new(page_count: usize, resolution: u32) -> Self {
        log::debug!("initialising detector workspace with {page_count} pages at {resolution} px/in");
        Self {
            pages: (0..page_count).map(|_| DetectorPage::new()).collect(),
            resolution,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> EditorResult<&DetectorPage> {
        self.pages.get(index).ok_or(EditorError::PageIndexOutOfRange {
            index,
            len: self.pages.len(),
        })
    }

    fn page_mut(&mut self, index: usize) -> EditorResult<&mut DetectorPage> {
        let len = self.pages.len();
        self.pages
            .get_mut(index)
            .ok_or(EditorError::PageIndexOutOfRange { index, len })
    }

    pub fn settings(&self, page_index: usize) -> EditorResult<&ObservableSettings> {
        Ok(&self.page(page_index)?.settings)
    }

    /// Map an image-space position to the detector's base resolution
    fn normalize_position(&self, position: f64) -> f64 {
        position * BASE_IMAGE_RESOLUTION as f64 / self.resolution as f64
    }

    //
    // Pages
    //

    pub fn add_page(&mut self, mode: AddPageMode) -> EditorResult<()> {
        match mode {
            AddPageMode::AtBeginning => self.pages.insert(0, DetectorPage::new()),
            AddPageMode::AtEnd => self.pages.push(DetectorPage::new()),
            AddPageMode::InsertAfter(index) => {
                if index >= self.pages.len() {
                    return Err(EditorError::PageIndexOutOfRange {
                        index,
                        len: self.pages.len(),
                    });
                }
                self.pages.insert(index + 1, DetectorPage::new());
            }
            AddPageMode::Replace(indices) => {
                let run = self.validated_replace_run(indices)?;
                self.pages.drain(run.0..=run.1);
                self.pages.insert(run.0, DetectorPage::new());
            }
        }
        Ok(())
    }

    /// Validate a replace selection: non-empty, in range, consecutive.
    /// Returns the (first, last) of the deduplicated run.
    fn validated_replace_run(&self, mut indices: Vec<usize>) -> EditorResult<(usize, usize)> {
        if indices.is_empty() {
            return Err(EditorError::EmptyReplaceSelection);
        }
        indices.sort_unstable();
        indices.dedup();

        let first = indices[0];
        let last = indices[indices.len() - 1];
        if last >= self.pages.len() {
            return Err(EditorError::PageIndexOutOfRange {
                index: last,
                len: self.pages.len(),
            });
        }
        if last - first != indices.len() - 1 {
            return Err(EditorError::NonConsecutiveReplaceSelection { indices });
        }
        Ok((first, last))
    }

    pub fn remove_page(&mut self, index: usize) -> EditorResult<()> {
        if index >= self.pages.len() {
            return Err(EditorError::PageIndexOutOfRange {
                index,
                len: self.pages.len(),
            });
        }
        self.pages.remove(index);
        Ok(())
    }

    pub fn remove_all_pages(&mut self) {
        self.pages.clear();
    }

    //
    // Explicit lines
    //

    /// Add a manually placed line; returns its id
    pub fn add_line(
        &mut self,
        page_index: usize,
        position: f64,
        orientation: Orientation,
    ) -> EditorResult<Uuid> {
        let normalized = self.normalize_position(position);
        let page = self.page_mut(page_index)?;
        let id = Uuid::new_v4();
        page.explicit_lines.push(ExplicitLine {
            id,
            position: normalized,
            orientation,
            part_of_table: false,
        });
        self.sync_explicit_lines(page_index, orientation)?;
        Ok(id)
    }

    pub fn update_line(
        &mut self,
        page_index: usize,
        id: Uuid,
        position: f64,
    ) -> EditorResult<()> {
        let normalized = self.normalize_position(position);
        let page = self.page_mut(page_index)?;
        let line = page
            .explicit_lines
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or(EditorError::LineNotFound { id })?;
        line.position = normalized;
        let orientation = line.orientation;
        self.sync_explicit_lines(page_index, orientation)
    }

    pub fn remove_line(&mut self, page_index: usize, id: Uuid) -> EditorResult<()> {
        let page = self.page_mut(page_index)?;
        let position = page
            .explicit_lines
            .iter()
            .position(|line| line.id == id)
            .ok_or(EditorError::LineNotFound { id })?;
        let orientation = page.explicit_lines.remove(position).orientation;
        self.sync_explicit_lines(page_index, orientation)
    }

    /// Push the current line list of one orientation into the page's
    /// settings record, sorted and deduplicated
    fn sync_explicit_lines(
        &mut self,
        page_index: usize,
        orientation: Orientation,
    ) -> EditorResult<()> {
        let page = self.page_mut(page_index)?;
        let mut values: Vec<f64> = page
            .explicit_lines
            .iter()
            .filter(|line| line.orientation == orientation)
            .map(|line| line.position)
            .collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        page.settings
            .set(orientation.setting_key(), SettingValue::Lines(values))
    }

    //
    // Table mirroring
    //

    /// Mirror a table's boundary and separators into explicit lines
    /// flagged as table-owned; returns the created line ids
    fn mirror_table(&mut self, page_index: usize, data: &TableData) -> EditorResult<Vec<Uuid>> {
        let (x0, y0) = data.top_left;
        let (x1, y1) = data.bottom_right;

        let mut ids = Vec::with_capacity(data.vlines.len() + data.hlines.len() + 4);
        for x in [x0, x1].iter().chain(data.vlines.iter()) {
            ids.push(self.add_line(page_index, *x, Orientation::Vertical)?);
        }
        for y in [y0, y1].iter().chain(data.hlines.iter()) {
            ids.push(self.add_line(page_index, *y, Orientation::Horizontal)?);
        }

        let page = self.page_mut(page_index)?;
        for line in page.explicit_lines.iter_mut() {
            if ids.contains(&line.id) {
                line.part_of_table = true;
            }
        }
        Ok(ids)
    }

    /// Remove previously mirrored lines and resync both orientations
    fn unmirror_lines(&mut self, page_index: usize, ids: &[Uuid]) -> EditorResult<()> {
        let page = self.page_mut(page_index)?;
        page.explicit_lines.retain(|line| !ids.contains(&line.id));
        self.sync_explicit_lines(page_index, Orientation::Vertical)?;
        self.sync_explicit_lines(page_index, Orientation::Horizontal)
    }

    /// Number of tables currently mirrored for a page
    pub fn mirrored_table_count(&self, page_index: usize) -> EditorResult<usize> {
        Ok(self.page(page_index)?.table_lines.len())
    }

    /// Mirror a table region onto a page; returns the created line ids
    pub fn add_table(&mut self, page_index: usize, data: &TableData) -> EditorResult<Vec<Uuid>> {
        let ids = self.mirror_table(page_index, data)?;
        self.page_mut(page_index)?.table_lines.push(ids.clone());
        Ok(ids)
    }

    /// Replace the mirrored lines of one table with a new geometry
    pub fn update_table(
        &mut self,
        page_index: usize,
        table_index: usize,
        data: &TableData,
    ) -> EditorResult<()> {
        let old_ids = self.mirrored_table_ids(page_index, table_index)?;
        self.unmirror_lines(page_index, &old_ids)?;
        let ids = self.mirror_table(page_index, data)?;
        self.page_mut(page_index)?.table_lines[table_index] = ids;
        Ok(())
    }

    /// Drop a mirrored table and its lines
    pub fn remove_table(&mut self, page_index: usize, table_index: usize) -> EditorResult<()> {
        let old_ids = self.mirrored_table_ids(page_index, table_index)?;
        self.unmirror_lines(page_index, &old_ids)?;
        self.page_mut(page_index)?.table_lines.remove(table_index);
        Ok(())
    }

    /// Consume one editor notification, keeping the page's explicit
    /// lines in step with the editor's table list.
    ///
    /// Selection events do not change geometry and are ignored here.
    pub fn apply_editor_event(
        &mut self,
        page_index: usize,
        event: &EditorEvent,
    ) -> EditorResult<()> {
        log::debug!("mirroring editor event on page {page_index}: {event:?}");
        match event {
            EditorEvent::NewTable { table } => {
                self.add_table(page_index, &table.data())?;
                Ok(())
            }
            EditorEvent::TableUpdated { index, table } => {
                self.update_table(page_index, *index, &table.data())
            }
            EditorEvent::TableDeleted { index } => self.remove_table(page_index, *index),
            EditorEvent::TableSelected { .. } | EditorEvent::TableDeselected => Ok(()),
        }
    }

    fn mirrored_table_ids(&self, page_index: usize, index: usize) -> EditorResult<Vec<Uuid>> {
        let page = self.page(page_index)?;
        page.table_lines
            .get(index)
            .cloned()
            .ok_or(EditorError::TableIndexOutOfRange {
                index,
                len: page.table_lines.len(),
            })
    }

    //
    // Settings fan-out
    //

    /// Apply one setting to the selected pages
    pub fn set_setting(
        &mut self,
        selector: PageSelector,
        key: SettingKey,
        value: SettingValue,
    ) -> EditorResult<()> {
        let indices: Vec<usize> = match selector {
            PageSelector::All => (0..self.pages.len()).collect(),
            PageSelector::Page(index) => vec![index],
            PageSelector::Pages(indices) => indices,
        };

        for index in &indices {
            if *index >= self.pages.len() {
                return Err(EditorError::PageIndexOutOfRange {
                    index: *index,
                    len: self.pages.len(),
                });
            }
        }
        for index in indices {
            self.pages[index].settings.set(key, value.clone())?;
        }
        Ok(())
    }
}
