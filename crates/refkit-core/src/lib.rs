//! # refkit Core Library
//!
//! Post-processing for frame-structured reference files (`.ref`) used when generating
//! force-field reference data. Two streaming transformations are provided:
//!
//! - **Virtual-site insertion**: adds M-site records to each molecule, positioned as a
//!   coefficient-weighted sum of atoms located by an atom-name pattern.
//! - **Line-count normalization**: rewrites each frame's leading count so it matches the
//!   number of body lines that follow.
//!
//! ## Architecture
//!
//! - **[`core`]**: line classification, the definition and frame models, and file I/O.
//! - **[`engine`]**: molecule grouping, pattern matching, site synthesis, and the line-count
//!   state machine, plus run configuration and errors.
//! - **[`workflows`]**: end-to-end passes from a reader to a writer, each returning a summary.

pub mod core;
pub mod engine;
pub mod workflows;
