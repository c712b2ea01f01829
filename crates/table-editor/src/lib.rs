//! Interactive table-geometry editor
//!
//! The core of the statement import tool: a table is a boundary
//! rectangle plus ordered column and row separators, manipulated by
//! dragging corner and separator handles. This crate provides the pure
//! layout mathematics ([`layout`]), pointer proximity queries
//! ([`hit_test`]), the page view bookkeeping ([`view`]) and the
//! interaction state machine tying them together ([`controller`]).
//!
//! Rendering is out of scope: the controller leaves a fully renderable
//! geometry behind after every event, and emits
//! [`statement_tables_shared::EditorEvent`] notifications for the
//! detector mirror and the extracted-text display.

pub mod controller;
pub mod layout;
pub mod view;

pub use controller::EditorController;
pub use view::PageView;
