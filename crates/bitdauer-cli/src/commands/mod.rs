//! CLI command implementations.

pub mod common;
pub mod factory;
pub mod noise;
pub mod patches;
pub mod render;
pub mod tone;
