use crate::cli::AddMsiteArgs;
use crate::commands::stdout_writer;
use crate::error::Result;
use crate::utils::input::open_input;
use refkit::core::io::definitions::{DefinitionFile, DefinitionSet};
use refkit::engine::config::RunConfig;
use refkit::workflows;
use std::path::Path;
use tracing::{info, warn};

pub(crate) fn load_definitions(path: &Path) -> Result<DefinitionSet> {
    info!("Loading M-site definitions from {:?}", path);
    let set = DefinitionFile::read_from_path(path)?;
    if set.is_empty() {
        warn!("No M-site definitions found in {:?}", path);
    } else {
        info!(
            "Loaded {} definition(s); skipped {} malformed block(s).",
            set.len(),
            set.skipped.len()
        );
    }
    Ok(set)
}

pub fn run(args: AddMsiteArgs, config: &RunConfig) -> Result<()> {
    let set = load_definitions(&args.definitions)?;
    let reader = open_input(args.input.as_deref())?;

    let mut writer = stdout_writer();
    let stats = workflows::insert::run(reader, &mut writer, &set.definitions, &config.insertion)?;

    info!(
        "add-msite finished: {} site(s) inserted into {} molecule(s).",
        stats.sites_inserted, stats.molecules
    );
    Ok(())
}
