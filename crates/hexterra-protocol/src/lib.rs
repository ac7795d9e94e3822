//! Plain data shared between the territory core and its collaborators.
//!
//! Everything here is serde-friendly so persistence or transport layers can
//! consume city records without depending on the core algorithms.

#![forbid(unsafe_code)]

mod geometry;
mod hex;
mod ids;
mod snapshot;

pub use crate::geometry::*;
pub use crate::hex::*;
pub use crate::ids::*;
pub use crate::snapshot::*;
