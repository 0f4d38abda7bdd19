//! africasuite-reports
//!
//! The report pipeline: data synthesis, rendering on blocking threads, a TTL
//! cache of rendered artifacts, and a priority job queue drained by
//! background workers. [`service::ReportService`] ties them together.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod persist;
pub mod queue;
pub mod service;
pub mod synth;

pub use service::{BatchRequest, ReportOutput, ReportService};
