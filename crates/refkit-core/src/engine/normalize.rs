use crate::core::io::frames::{FrameAssembler, FrameError};
use crate::core::models::frame::Frame;
use crate::engine::config::NormalizationConfig;
use std::io;
use tracing::debug;

/// Counters collected while normalizing line counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationStats {
    pub frames: usize,
    pub corrected_frames: usize,
    pub skipped_lines: usize,
}

/// Yields frames whose declared count has been replaced by the actual body length.
pub struct LineCountNormalizer<I> {
    frames: FrameAssembler<I>,
    stats: NormalizationStats,
}

impl<I> LineCountNormalizer<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I, config: NormalizationConfig) -> Self {
        Self {
            frames: FrameAssembler::new(lines, config.malformed_count),
            stats: NormalizationStats::default(),
        }
    }

    pub fn stats(&self) -> NormalizationStats {
        NormalizationStats {
            skipped_lines: self.frames.skipped_lines(),
            ..self.stats
        }
    }
}

impl<I> Iterator for LineCountNormalizer<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut frame = match self.frames.next()? {
            Ok(frame) => frame,
            Err(e) => return Some(Err(e)),
        };
        self.stats.frames += 1;
        let declared = frame.declared_count;
        if frame.normalize() {
            self.stats.corrected_frames += 1;
            debug!(
                "Frame {} declared {} line(s) but has {}; corrected.",
                self.stats.frames, declared, frame.declared_count
            );
        }
        Some(Ok(frame))
    }
}
