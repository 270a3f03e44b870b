//! # Engine Module
//!
//! The algorithms behind the two transformations.
//!
//! ## Virtual-site insertion
//!
//! Lines are grouped into molecules ([`grouping`]), each definition's atom-name pattern is
//! bound to specific atoms ([`matching`]), and the weighted site record is built and spliced
//! in after its anchor atom ([`synthesis`]). [`insertion`] drives this as a streaming
//! iterator, optionally processing batches of molecules in parallel.
//!
//! ## Line-count normalization
//!
//! [`normalize`] wraps the frame assembler and rewrites each frame's count from its body
//! length.
//!
//! No state survives a molecule group or frame boundary apart from the read-only
//! definition list.

pub mod config;
pub mod error;
pub mod grouping;
pub mod insertion;
pub mod matching;
pub mod normalize;
pub mod synthesis;
