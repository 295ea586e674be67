//! Foundation types for the compdoc engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileKey`] - Logical file identity
//! - [`Stamp`] - Modification stamps
//! - [`Stamper`], [`FsStamper`] - Pluggable modification-time oracle
//!
//! This module has NO dependencies on other compdoc modules.

mod file_key;
mod stamp;

pub use file_key::FileKey;
pub use stamp::{FsStamper, Stamp, Stamper};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
