//! africasuite-export
//!
//! Report rendering: template + synthesized data → layout → DOCX document or
//! XLSX workbook bytes. Pure; nothing here touches the filesystem.

pub mod docx;
pub mod error;
pub mod format;
pub mod layout;
pub mod render;
pub mod styles;
pub mod xlsx;

pub use render::render;
