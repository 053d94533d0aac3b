//! SameSite policy model
//!
//! - [`pattern`] - cookie name patterns (`name`, `prefix*`, `*suffix`, `*`)
//! - [`resolver`] - turns raw configuration into a conflict-free policy
//! - [`snapshot`] - the immutable, lock-free readable policy

pub mod pattern;
pub mod resolver;
pub mod snapshot;

pub use pattern::{Pattern, PatternKind};
pub use resolver::resolve;
pub use snapshot::{SameSite, SameSitePolicy};
