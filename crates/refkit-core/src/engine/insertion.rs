use crate::core::models::definition::MsiteDefinition;
use crate::engine::config::InsertionConfig;
use crate::engine::grouping::{MoleculeGrouper, Segment};
use crate::engine::synthesis::process_group;
use rayon::prelude::*;
use std::collections::VecDeque;
use std::io;

/// Counters collected while inserting sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertionStats {
    pub passthrough_lines: usize,
    pub molecules: usize,
    pub sites_inserted: usize,
}

fn process_segment(segment: Segment, definitions: &[MsiteDefinition]) -> (Vec<String>, usize) {
    match segment {
        Segment::Passthrough(line) => (vec![line.raw], 0),
        Segment::Molecule(group) => process_group(group, definitions),
    }
}

/// Streams output lines with virtual sites spliced into each molecule group.
///
/// Segments are pulled from a [`MoleculeGrouper`] in batches. In parallel mode a batch is
/// processed on the rayon pool and reassembled in input order, so the output is identical to
/// the sequential pass.
pub struct SiteInserter<'a, I> {
    segments: MoleculeGrouper<I>,
    definitions: &'a [MsiteDefinition],
    config: InsertionConfig,
    output: VecDeque<String>,
    stats: InsertionStats,
    exhausted: bool,
}

impl<'a, I> SiteInserter<'a, I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I, definitions: &'a [MsiteDefinition], config: InsertionConfig) -> Self {
        Self {
            segments: MoleculeGrouper::new(lines),
            definitions,
            config,
            output: VecDeque::new(),
            stats: InsertionStats::default(),
            exhausted: false,
        }
    }

    pub fn stats(&self) -> InsertionStats {
        self.stats
    }

    fn refill(&mut self) -> io::Result<()> {
        let limit = if self.config.parallel {
            self.config.batch_size.max(1)
        } else {
            1
        };

        let mut batch = Vec::with_capacity(limit);
        while batch.len() < limit {
            match self.segments.next() {
                Some(segment) => batch.push(segment?),
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }

        for segment in &batch {
            match segment {
                Segment::Passthrough(_) => self.stats.passthrough_lines += 1,
                Segment::Molecule(_) => self.stats.molecules += 1,
            }
        }

        let definitions = self.definitions;
        let processed: Vec<(Vec<String>, usize)> = if self.config.parallel && batch.len() > 1 {
            batch
                .into_par_iter()
                .map(|segment| process_segment(segment, definitions))
                .collect()
        } else {
            batch
                .into_iter()
                .map(|segment| process_segment(segment, definitions))
                .collect()
        };

        for (lines, inserted) in processed {
            self.stats.sites_inserted += inserted;
            self.output.extend(lines);
        }
        Ok(())
    }
}

impl<I> Iterator for SiteInserter<'_, I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.output.pop_front() {
                return Some(Ok(line));
            }
            if self.exhausted {
                return None;
            }
            if let Err(e) = self.refill() {
                self.exhausted = true;
                return Some(Err(e));
            }
        }
    }
}
