//! Common error types used across all statement-tables crates
//! Provides consistent error handling and reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Base error type for all editor and detector operations.
///
/// Every failure here is a synchronous programming-contract violation
/// inside one event's call chain; there is nothing transient to retry.
/// An operation either fully applies or returns one of these and leaves
/// state untouched. Hit-test misses are `Option::None`, never errors.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum EditorError {
    // Argument errors
    #[error("distribution of {got} separators does not describe {expected} divisions")]
    DistributionMismatch { expected: usize, got: usize },

    #[error("division count must be at least 1, got {count}")]
    InvalidDivisionCount { count: usize },

    #[error("separator index {index} out of range for {len} separators")]
    SeparatorIndexOutOfRange { index: usize, len: usize },

    #[error("table index {index} out of range for {len} tables")]
    TableIndexOutOfRange { index: usize, len: usize },

    #[error("page index {index} out of range for {len} pages")]
    PageIndexOutOfRange { index: usize, len: usize },

    #[error("no explicit line with id {id}")]
    LineNotFound { id: Uuid },

    #[error("setting {key} does not accept the given value type")]
    SettingTypeMismatch { key: String },

    // State errors
    #[error("no element is selected for an element-scoped operation")]
    NoElementSelected,

    #[error("no table is selected")]
    NoTableSelected,

    #[error("pointer drag state is empty: no pointer-down was recorded")]
    NoDragInProgress,

    #[error("reentrant write to observable settings key {key} from a notification callback")]
    ReentrantSettingsUpdate { key: String },

    // Page replacement validation
    #[error("replace selection must name at least one page")]
    EmptyReplaceSelection,

    #[error("replace selection must be consecutive page indices, got {indices:?}")]
    NonConsecutiveReplaceSelection { indices: Vec<usize> },
}

/// Result type alias for editor and detector operations
pub type EditorResult<T> = Result<T, EditorError>;
