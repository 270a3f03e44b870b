pub mod add_msite;
pub mod fix_linenu;
pub mod process;

use std::io::{self, BufWriter, StdoutLock};

/// Buffered standard output; records are the only thing ever written to it.
pub(crate) fn stdout_writer() -> BufWriter<StdoutLock<'static>> {
    BufWriter::new(io::stdout().lock())
}
