//! Core types and workflow for the ETS transportation charges report.

/// Merging charge records with route translations.
pub mod join;
/// Domain models and identifiers shared by all providers.
pub mod model;
/// Traits describing the external collaborators and their errors.
pub mod ports;
/// Rich-text node tree consumed by the CMS field renderer.
pub mod richtext;
/// High-level service facade used by the runner.
pub mod service;
/// Per-locale table and heading construction.
pub mod table;

pub use join::*;
pub use model::*;
pub use ports::*;
pub use richtext::*;
pub use service::*;
pub use table::*;
