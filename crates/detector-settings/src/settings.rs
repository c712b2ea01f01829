//! Typed table-detector settings
//!
//! The external detector is driven by a per-page settings record. Every
//! knob is addressed through [`SettingKey`] and written with a
//! [`SettingValue`], so multi-page fan-out works on tagged variants
//! instead of attribute names.

use serde::{Deserialize, Serialize};
use statement_tables_shared::{EditorError, EditorResult};

/// Resolution (px/inch) detector line positions are normalized to
pub const BASE_IMAGE_RESOLUTION: u32 = 72;

/// Edge-detection strategy of the external table detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Lines,
    LinesStrict,
    Text,
    Explicit,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Lines => write!(f, "lines"),
            Strategy::LinesStrict => write!(f, "lines_strict"),
            Strategy::Text => write!(f, "text"),
            Strategy::Explicit => write!(f, "explicit"),
        }
    }
}

/// Per-page settings record consumed by the table detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    pub vertical_strategy: Strategy,
    pub horizontal_strategy: Strategy,
    pub explicit_vertical_lines: Vec<f64>,
    pub explicit_horizontal_lines: Vec<f64>,
    pub snap_tolerance: f64,
    pub snap_x_tolerance: f64,
    pub snap_y_tolerance: f64,
    pub join_tolerance: f64,
    pub join_x_tolerance: f64,
    pub join_y_tolerance: f64,
    pub edge_min_length: f64,
    pub min_words_vertical: u32,
    pub min_words_horizontal: u32,
    pub text_tolerance: f64,
    pub text_x_tolerance: f64,
    pub text_y_tolerance: f64,
    pub intersection_tolerance: f64,
    pub intersection_x_tolerance: f64,
    pub intersection_y_tolerance: f64,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            vertical_strategy: Strategy::Lines,
            horizontal_strategy: Strategy::Lines,
            explicit_vertical_lines: Vec::new(),
            explicit_horizontal_lines: Vec::new(),
            snap_tolerance: 3.0,
            snap_x_tolerance: 3.0,
            snap_y_tolerance: 3.0,
            join_tolerance: 3.0,
            join_x_tolerance: 3.0,
            join_y_tolerance: 3.0,
            edge_min_length: 3.0,
            min_words_vertical: 3,
            min_words_horizontal: 1,
            text_tolerance: 3.0,
            text_x_tolerance: 3.0,
            text_y_tolerance: 3.0,
            intersection_tolerance: 3.0,
            intersection_x_tolerance: 3.0,
            intersection_y_tolerance: 3.0,
        }
    }
}

/// Settings validation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl TableSettings {
    /// Validate the settings record
    pub fn validate(&self) -> SettingsValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let tolerances = [
            ("snap_tolerance", self.snap_tolerance),
            ("snap_x_tolerance", self.snap_x_tolerance),
            ("snap_y_tolerance", self.snap_y_tolerance),
            ("join_tolerance", self.join_tolerance),
            ("join_x_tolerance", self.join_x_tolerance),
            ("join_y_tolerance", self.join_y_tolerance),
            ("edge_min_length", self.edge_min_length),
            ("text_tolerance", self.text_tolerance),
            ("text_x_tolerance", self.text_x_tolerance),
            ("text_y_tolerance", self.text_y_tolerance),
            ("intersection_tolerance", self.intersection_tolerance),
            ("intersection_x_tolerance", self.intersection_x_tolerance),
            ("intersection_y_tolerance", self.intersection_y_tolerance),
        ];
        for (name, value) in tolerances {
            if value < 0.0 {
                errors.push(format!("{name} must be non-negative, got {value}"));
            }
        }

        if self.vertical_strategy == Strategy::Explicit && self.explicit_vertical_lines.is_empty()
        {
            warnings.push("vertical_strategy is explicit but no explicit vertical lines are set"
                .to_string());
        }
        if self.horizontal_strategy == Strategy::Explicit
            && self.explicit_horizontal_lines.is_empty()
        {
            warnings.push(
                "horizontal_strategy is explicit but no explicit horizontal lines are set"
                    .to_string(),
            );
        }
        if self.min_words_vertical == 0 {
            warnings.push("min_words_vertical of 0 matches every word column".to_string());
        }

        SettingsValidation {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Apply one keyed write, rejecting a value of the wrong shape.
    ///
    /// Nothing is modified when the value type does not match the key.
    pub fn apply(&mut self, key: SettingKey, value: SettingValue) -> EditorResult<()> {
        use SettingKey as K;
        use SettingValue as V;

        match (key, value) {
            (K::VerticalStrategy, V::Strategy(s)) => self.vertical_strategy = s,
            (K::HorizontalStrategy, V::Strategy(s)) => self.horizontal_strategy = s,
            (K::ExplicitVerticalLines, V::Lines(values)) => self.explicit_vertical_lines = values,
            (K::ExplicitHorizontalLines, V::Lines(values)) => {
                self.explicit_horizontal_lines = values
            }
            (K::SnapTolerance, V::Tolerance(v)) => self.snap_tolerance = v,
            (K::SnapXTolerance, V::Tolerance(v)) => self.snap_x_tolerance = v,
            (K::SnapYTolerance, V::Tolerance(v)) => self.snap_y_tolerance = v,
            (K::JoinTolerance, V::Tolerance(v)) => self.join_tolerance = v,
            (K::JoinXTolerance, V::Tolerance(v)) => self.join_x_tolerance = v,
            (K::JoinYTolerance, V::Tolerance(v)) => self.join_y_tolerance = v,
            (K::EdgeMinLength, V::Tolerance(v)) => self.edge_min_length = v,
            (K::MinWordsVertical, V::WordCount(v)) => self.min_words_vertical = v,
            (K::MinWordsHorizontal, V::WordCount(v)) => self.min_words_horizontal = v,
            (K::TextTolerance, V::Tolerance(v)) => self.text_tolerance = v,
            (K::TextXTolerance, V::Tolerance(v)) => self.text_x_tolerance = v,
            (K::TextYTolerance, V::Tolerance(v)) => self.text_y_tolerance = v,
            (K::IntersectionTolerance, V::Tolerance(v)) => self.intersection_tolerance = v,
            (K::IntersectionXTolerance, V::Tolerance(v)) => self.intersection_x_tolerance = v,
            (K::IntersectionYTolerance, V::Tolerance(v)) => self.intersection_y_tolerance = v,
            (key, _) => {
                return Err(EditorError::SettingTypeMismatch {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

/// Addressable detector setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    VerticalStrategy,
    HorizontalStrategy,
    ExplicitVerticalLines,
    ExplicitHorizontalLines,
    SnapTolerance,
    SnapXTolerance,
    SnapYTolerance,
    JoinTolerance,
    JoinXTolerance,
    JoinYTolerance,
    EdgeMinLength,
    MinWordsVertical,
    MinWordsHorizontal,
    TextTolerance,
    TextXTolerance,
    TextYTolerance,
    IntersectionTolerance,
    IntersectionXTolerance,
    IntersectionYTolerance,
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SettingKey::VerticalStrategy => "vertical_strategy",
            SettingKey::HorizontalStrategy => "horizontal_strategy",
            SettingKey::ExplicitVerticalLines => "explicit_vertical_lines",
            SettingKey::ExplicitHorizontalLines => "explicit_horizontal_lines",
            SettingKey::SnapTolerance => "snap_tolerance",
            SettingKey::SnapXTolerance => "snap_x_tolerance",
            SettingKey::SnapYTolerance => "snap_y_tolerance",
            SettingKey::JoinTolerance => "join_tolerance",
            SettingKey::JoinXTolerance => "join_x_tolerance",
            SettingKey::JoinYTolerance => "join_y_tolerance",
            SettingKey::EdgeMinLength => "edge_min_length",
            SettingKey::MinWordsVertical => "min_words_vertical",
            SettingKey::MinWordsHorizontal => "min_words_horizontal",
            SettingKey::TextTolerance => "text_tolerance",
            SettingKey::TextXTolerance => "text_x_tolerance",
            SettingKey::TextYTolerance => "text_y_tolerance",
            SettingKey::IntersectionTolerance => "intersection_tolerance",
            SettingKey::IntersectionXTolerance => "intersection_x_tolerance",
            SettingKey::IntersectionYTolerance => "intersection_y_tolerance",
        };
        write!(f, "{name}")
    }
}

/// Value written to a [`SettingKey`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
#[serde(rename_all = "snake_case")]
pub enum SettingValue {
    Strategy(Strategy),
    Tolerance(f64),
    WordCount(u32),
    Lines(Vec<f64>),
}

/// Which pages a settings write fans out to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSelector {
    All,
    Page(usize),
    Pages(Vec<usize>),
}
