//! Detector-settings store for the statement-tables workspace
//!
//! The external table detector reads a per-page settings record
//! (strategies, tolerances, explicit line lists). This crate owns those
//! records: a typed settings schema with keyed writes, an observable
//! wrapper with an explicit reentrancy policy, and the multi-page
//! workspace that mirrors editor table geometry into explicit detector
//! lines.

pub mod observable;
pub mod settings;
pub mod workspace;

pub use observable::{ObservableSettings, SubscriptionId};
pub use settings::{
    PageSelector, SettingKey, SettingValue, SettingsValidation, Strategy, TableSettings,
    BASE_IMAGE_RESOLUTION,
};
pub use workspace::{AddPageMode, DetectorWorkspace, ExplicitLine, Orientation};
