//! africasuite-core
//!
//! Pure domain types for the AfricaSuite report pipeline: templates, sections,
//! parameters, generated reports, generation jobs, and artifact naming.
//! No rendering or runtime dependency; this is the shared vocabulary of the
//! reporting crates.

pub mod error;
pub mod models;
pub mod paths;
