use crate::core::io::frames::write_frame;
use crate::engine::config::NormalizationConfig;
use crate::engine::error::EngineError;
use crate::engine::normalize::{LineCountNormalizer, NormalizationStats};
use std::io::{BufRead, Write};
use tracing::{info, instrument};

#[instrument(skip_all, name = "renumber_workflow")]
pub fn run(
    reader: impl BufRead,
    writer: &mut impl Write,
    config: &NormalizationConfig,
) -> Result<NormalizationStats, EngineError> {
    let mut normalizer = LineCountNormalizer::new(reader.lines(), *config);
    for frame in normalizer.by_ref() {
        write_frame(writer, &frame?)?;
    }
    writer.flush()?;

    let stats = normalizer.stats();
    info!(
        "Wrote {} frame(s); corrected {} line count(s); skipped {} line(s).",
        stats.frames, stats.corrected_frames, stats.skipped_lines
    );
    Ok(stats)
}
