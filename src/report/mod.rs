//! Output generation.

pub mod generator;

pub use generator::*;
