use crate::core::models::definition::MsiteDefinition;
use crate::engine::config::InsertionConfig;
use crate::engine::error::EngineError;
use crate::engine::insertion::{InsertionStats, SiteInserter};
use std::io::{BufRead, Write};
use tracing::{info, instrument};

#[instrument(skip_all, name = "insertion_workflow")]
pub fn run(
    reader: impl BufRead,
    writer: &mut impl Write,
    definitions: &[MsiteDefinition],
    config: &InsertionConfig,
) -> Result<InsertionStats, EngineError> {
    info!(
        "Inserting virtual sites with {} definition(s).",
        definitions.len()
    );

    let mut inserter = SiteInserter::new(reader.lines(), definitions, config.clone());
    for line in inserter.by_ref() {
        writeln!(writer, "{}", line?)?;
    }
    writer.flush()?;

    let stats = inserter.stats();
    info!(
        "Processed {} molecule(s); inserted {} site(s).",
        stats.molecules, stats.sites_inserted
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::definitions::DefinitionFile;
    use std::io::Cursor;

    fn insert(definitions: &str, input: &str) -> (String, InsertionStats) {
        let set = DefinitionFile::read_from(&mut Cursor::new(definitions)).unwrap();
        let mut out = Vec::new();
        let stats = run(
            Cursor::new(input),
            &mut out,
            &set.definitions,
            &InsertionConfig::default(),
        )
        .unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn dma_site_is_inserted_after_second_carbon() {
        let input = "\
3
DMA frame
C1 1.0 0.0 0.0 0.5 0.5 0.5 1.0 7
H2 0.0 2.0 0.0 0.5 0.5 0.5 1.0 7
C1 0.0 0.0 3.0 0.5 0.5 0.5 1.0 7
";
        let (output, stats) = insert("DMA\nC1 H2 C1 EM\n0.2 0.2 0.2\n", input);
        assert_eq!(stats.sites_inserted, 1);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[..5], input.lines().collect::<Vec<_>>()[..]);
        assert_eq!(
            lines[5],
            "EM         0.2000000   0.4000000   0.6000000     0.0000000     0.0000000     0.0000000     1.0     7"
        );
    }

    #[test]
    fn header_before_first_molecule_is_copied_unchanged() {
        let input = "free text header\n1\ncomment\nA 0 0 0 0 0 0 1.0 1\n";
        let (output, stats) = insert("X\nA M\n1.0\n", input);
        assert!(output.starts_with("free text header\n1\ncomment\nA 0 0 0 0 0 0 1.0 1\nM "));
        assert_eq!(stats.passthrough_lines, 3);
    }

    #[test]
    fn skipped_block_does_not_stop_valid_ones() {
        let input = "1\nc\nA 0 0 0 0 0 0 1.0 1\nB 2 0 0 0 0 0 1.0 1\n";
        let (output, stats) = insert("BAD\nA B M0\n1.0\nGOOD\nA B M1\n0.5 0.5\n", input);
        assert_eq!(stats.sites_inserted, 1);
        assert!(output.contains("M1 "));
        assert!(!output.contains("M0 "));
    }

    #[test]
    fn crlf_input_is_written_with_plain_newlines() {
        let (output, _) = insert("", "1\r\nc\r\nA 0 0 0 0 0 0 1.0 1\r\n");
        assert_eq!(output, "1\nc\nA 0 0 0 0 0 0 1.0 1\n");
    }
}
