//! Fundamental value types shared across the crate.

mod position;

pub use position::{Bearing, Position};
