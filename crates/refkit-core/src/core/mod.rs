//! # Core Module
//!
//! Stateless building blocks shared by both transformations.
//!
//! - **Models** ([`models`]) - Classified lines, M-site definitions, and frames
//! - **File I/O** ([`io`]) - The definition-file loader and the frame reader/writer

pub mod io;
pub mod models;
