use crate::cli::AddMsiteArgs;
use crate::commands::add_msite::load_definitions;
use crate::commands::stdout_writer;
use crate::error::Result;
use crate::utils::input::open_input;
use refkit::engine::config::RunConfig;
use refkit::workflows;
use tracing::info;

pub fn run(args: AddMsiteArgs, config: &RunConfig) -> Result<()> {
    let set = load_definitions(&args.definitions)?;
    let reader = open_input(args.input.as_deref())?;

    let mut writer = stdout_writer();
    let summary = workflows::pipeline::run(reader, &mut writer, &set.definitions, config)?;

    info!(
        "process finished: {} site(s) inserted; {} frame(s), {} count(s) corrected.",
        summary.insertion.sites_inserted,
        summary.normalization.frames,
        summary.normalization.corrected_frames
    );
    Ok(())
}
