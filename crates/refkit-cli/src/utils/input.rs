use crate::error::{CliError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Opens the reference stream: the named file, or standard input when no path is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            info!("Reading reference records from {:?}", path);
            let file = File::open(path).map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => CliError::InputNotFound(path.to_path_buf()),
                _ => CliError::Io(e),
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            info!("Reading reference records from standard input");
            Ok(Box::new(io::stdin().lock()))
        }
    }
}
