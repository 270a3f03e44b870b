//! # Workflows Module
//!
//! End-to-end passes over a reference stream. Each workflow reads lines from a `BufRead`,
//! writes the transformed stream to a `Write`, and returns the counters gathered on the way.
//!
//! - **Insertion** ([`insert`]) - Adds virtual-site records to every matching molecule.
//! - **Renumbering** ([`renumber`]) - Rewrites frame line counts from their body lengths.
//! - **Pipeline** ([`pipeline`]) - Insertion followed by renumbering in a single pass.

pub mod insert;
pub mod pipeline;
pub mod renumber;
