//! Enumerated API values, identity selectors, and schedule objects.

pub mod enums;
pub mod identity;
pub mod schedule;

pub use enums::*;
pub use identity::*;
pub use schedule::*;
