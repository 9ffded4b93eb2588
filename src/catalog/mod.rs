//! Printer preset catalog.
//!
//! Immutable registry of printer presets and component groups, loaded from
//! TOML once at startup (embedded default or operator file) and then shared
//! read-only with every request.

pub mod loader;
pub mod registry;
pub mod snippet;
pub mod types;

pub use loader::{default_catalog, load_catalog, parse_catalog};
pub use registry::PresetCatalog;
pub use types::{Component, ComponentGroup, Parameter, PresetSummary, PrinterPreset};
