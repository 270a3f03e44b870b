//! Provides input/output for the two text formats handled by refkit: M-site definition
//! files and frame-structured reference streams.

pub mod definitions;
pub mod frames;
