use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

const DEFINITION_FORMAT_HELP: &str = "\
M-SITE DEFINITION FILE FORMAT:
  The definition file consists of 3-line blocks; blank lines and lines
  starting with '#' are ignored.

    Line 1: <MoleculeType>                      (e.g. DMA)
    Line 2: <Atom1> <Atom2> ... <AtomN> <MSiteName>
    Line 3: <Coeff1> <Coeff2> ... <CoeffN>

  Example:
    DMA
    C1 H2 C1 EM
    0.2 0.2 0.2

  Patterns are matched within each molecule. For repeated atom names
  (e.g. C1 H2 C1) the 1st C1, 1st H2 and 2nd C1 of the molecule are used.
  The site position is sum(coefficient[i] * position[i]); the site is
  inserted right after the atom matched by the last pattern entry.";

const FRAME_FORMAT_HELP: &str = "\
FILE FORMAT:
  Each frame is a line count, a comment line, and the body lines that
  follow (atoms, NetF, Torq and M-site lines) up to the next line count
  or end of input. The count is rewritten to the actual number of body
  lines.";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "refkit - Post-processing tools for frame-structured force-field reference files (.ref).",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output, including warnings about skipped input
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to standard error
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to synthesize sites.
    /// More than one thread enables batched parallel insertion.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S normalization.malformed-count=fail
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add M-site virtual atoms to a reference file using a definition file.
    #[command(after_help = DEFINITION_FORMAT_HELP)]
    AddMsite(AddMsiteArgs),
    /// Rewrite the line count of every frame to match its body length.
    #[command(after_help = FRAME_FORMAT_HELP)]
    FixLinenu(FixLinenuArgs),
    /// Add M-sites and then fix the line counts, in a single pass.
    #[command(after_help = DEFINITION_FORMAT_HELP)]
    Process(AddMsiteArgs),
}

/// Arguments for the `add-msite` and `process` subcommands.
#[derive(Args, Debug)]
pub struct AddMsiteArgs {
    /// Path to the M-site definition file.
    #[arg(required = true, value_name = "DEFINITIONS")]
    pub definitions: PathBuf,

    /// Path to the input reference file. Reads standard input if omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

/// Arguments for the `fix-linenu` subcommand.
#[derive(Args, Debug)]
pub struct FixLinenuArgs {
    /// Path to the input reference file. Reads standard input if omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}
