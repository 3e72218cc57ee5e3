//! Data layer - Static mappings and constants
//!
//! - Reserved characters, fixed replacements and accent compose codes
//! - Banners, easylist properties and table policy constants

pub mod constants;
pub mod replacements;

pub use constants::{is_known_template, KNOWN_TEMPLATES};
pub use replacements::{accent, replacement, reserved};
