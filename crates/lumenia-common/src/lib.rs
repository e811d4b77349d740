//! # Lumenia Common
//!
//! Common types shared across all Lumenia subsystems.
//!
//! This crate provides the foundational ID newtypes used by the catalog,
//! the recipe index, and the asset loader.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
}

pub use prelude::*;
