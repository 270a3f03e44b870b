use crate::cli::FixLinenuArgs;
use crate::commands::stdout_writer;
use crate::error::Result;
use crate::utils::input::open_input;
use refkit::engine::config::RunConfig;
use refkit::workflows;
use tracing::{info, warn};

pub fn run(args: FixLinenuArgs, config: &RunConfig) -> Result<()> {
    let reader = open_input(args.input.as_deref())?;

    let mut writer = stdout_writer();
    let stats = workflows::renumber::run(reader, &mut writer, &config.normalization)?;

    if stats.skipped_lines > 0 {
        warn!(
            "{} line(s) outside any frame were dropped.",
            stats.skipped_lines
        );
    }
    info!(
        "fix-linenu finished: {} frame(s), {} count(s) corrected.",
        stats.frames, stats.corrected_frames
    );
    Ok(())
}
