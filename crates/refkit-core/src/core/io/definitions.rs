use crate::core::models::definition::{DefinitionError, MsiteDefinition};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Fatal errors while reading an M-site definition file.
#[derive(Debug, Error)]
pub enum DefinitionFileError {
    #[error("Failed to read definition file '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A block that was rejected, with the 1-based line number of its molecule-type label.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBlock {
    pub line: usize,
    pub error: DefinitionError,
}

/// The result of loading a definition file: the valid definitions in file order plus the
/// blocks that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionSet {
    pub definitions: Vec<MsiteDefinition>,
    pub skipped: Vec<SkippedBlock>,
}

impl DefinitionSet {
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }
}

/// Reader for M-site definition files.
///
/// The format is a sequence of three-line blocks; blank lines and lines starting with `#` are
/// ignored:
///
/// ```text
/// DMA
/// C1 H2 C1 EM
/// 0.2 0.2 0.2
/// ```
pub struct DefinitionFile;

impl DefinitionFile {
    /// Parses definitions from a buffered reader.
    ///
    /// Malformed blocks are skipped with a warning and recorded in [`DefinitionSet::skipped`].
    /// A trailing partial block (fewer than three lines) is dropped silently.
    ///
    /// # Errors
    ///
    /// Only I/O errors from the reader are returned.
    pub fn read_from(reader: &mut impl BufRead) -> io::Result<DefinitionSet> {
        let mut lines: Vec<(usize, String)> = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.starts_with('#') {
                continue;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            lines.push((index + 1, trimmed.to_string()));
        }

        let mut set = DefinitionSet::default();
        let mut blocks = lines.chunks_exact(3);
        for block in &mut blocks {
            let (line, label) = &block[0];
            match parse_block(label, &block[1].1, &block[2].1) {
                Ok(definition) => {
                    debug!(
                        "Loaded M-site definition '{}' for {} ({} atom(s)).",
                        definition.site_name(),
                        definition.molecule_type(),
                        definition.pattern().len()
                    );
                    set.definitions.push(definition);
                }
                Err(error) => {
                    warn!("Skipping definition block at line {}: {}", line, error);
                    set.skipped.push(SkippedBlock { line: *line, error });
                }
            }
        }
        if !blocks.remainder().is_empty() {
            debug!(
                "Ignoring {} trailing line(s) that do not form a complete definition block.",
                blocks.remainder().len()
            );
        }

        Ok(set)
    }

    /// Parses definitions from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionFileError::Io`] if the file cannot be opened or read.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<DefinitionSet, DefinitionFileError> {
        let path = path.as_ref();
        let to_error = |source| DefinitionFileError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(to_error)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader).map_err(to_error)
    }
}

fn parse_block(
    molecule_type: &str,
    pattern_line: &str,
    coefficient_line: &str,
) -> Result<MsiteDefinition, DefinitionError> {
    let mut pattern: Vec<String> = pattern_line.split_whitespace().map(String::from).collect();
    if pattern.len() < 2 {
        return Err(DefinitionError::TooFewTokens {
            molecule_type: molecule_type.to_string(),
        });
    }
    let site_name = pattern.pop().unwrap_or_default();

    let coefficients = coefficient_line
        .split_whitespace()
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|_| DefinitionError::InvalidCoefficient {
                    molecule_type: molecule_type.to_string(),
                    value: value.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    MsiteDefinition::new(molecule_type, pattern, site_name, coefficients)
}
