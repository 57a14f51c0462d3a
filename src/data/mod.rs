//! Synthetic demo data.

pub mod sample;

pub use sample::*;
