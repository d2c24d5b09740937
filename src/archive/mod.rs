//! Package archive extraction.
//!
//! Language packages ship as zip archives, usually with the `.argosmodel`
//! extension.

mod zip;

pub use zip::ZipExtractor;
