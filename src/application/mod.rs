//! Application layer - use cases the CLI drives.

pub mod localize;
mod resolve;

pub use localize::{LocalizeAction, LocalizeJob, LocalizeOptions, LocalizePlan, LocalizeReport};
pub use resolve::{PackageResolver, Resolution, ResolutionError};
