//! Configuration merging engine.
//!
//! Turns a preset, the selected component snippets, parameter overrides and
//! custom macros into one Klipper configuration document.
//!
//! # Merge order
//!
//! 1. Preset base snippets, in declaration order
//! 2. One section per component category, in catalog order
//! 3. Parameter overrides (request values always win over component defaults)
//! 4. Custom macros, in request order
//!
//! Only an unknown preset fails the request. Everything else is reported as
//! a `MergeWarning` and generation continues.
//!
//! # Example
//!
//! ```ignore
//! use klipper_configurator::catalog::default_catalog;
//! use klipper_configurator::merger::{ConfigMerger, GenerationRequest};
//!
//! let catalog = default_catalog();
//! let request = GenerationRequest {
//!     printer_preset_id: "voron-trident".to_string(),
//!     ..Default::default()
//! };
//!
//! let result = ConfigMerger::new(&catalog).generate(&request)?;
//! println!("{}", result.configuration);
//! ```

mod engine;
pub mod render;
mod types;

pub use engine::ConfigMerger;
pub use types::*;
