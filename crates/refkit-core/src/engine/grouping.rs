use crate::core::models::record::{AtomRecord, ClassifiedLine, classify};
use std::io;
use std::mem;

/// A contiguous run of lines sharing one molecule id.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeGroup {
    pub molecule_id: String,
    pub lines: Vec<ClassifiedLine>,
}

impl MoleculeGroup {
    fn start(molecule_id: String, line: ClassifiedLine) -> Self {
        Self {
            molecule_id,
            lines: vec![line],
        }
    }

    /// The atom records of the group in file order, with their line index within the group.
    pub fn atoms(&self) -> impl Iterator<Item = (usize, &AtomRecord)> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| line.as_atom().map(|atom| (index, atom)))
    }
}

/// One unit of work produced by the [`MoleculeGrouper`].
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A line copied to the output unchanged: header lines and lines without a molecule id.
    Passthrough(ClassifiedLine),
    /// A complete molecule group, ready for site insertion.
    Molecule(MoleculeGroup),
}

/// Splits a line stream into header passthrough lines and molecule groups.
///
/// Everything before the first line with a molecule id is header. After that, consecutive
/// lines with the same molecule id form one group; a change of id, a line without an id, or
/// the end of input closes the pending group.
pub struct MoleculeGrouper<I> {
    lines: I,
    in_header: bool,
    pending: Option<MoleculeGroup>,
    queued: Option<Segment>,
}

impl<I> MoleculeGrouper<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            in_header: true,
            pending: None,
            queued: None,
        }
    }
}

impl<I> Iterator for MoleculeGrouper<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(segment) = self.queued.take() {
            return Some(Ok(segment));
        }

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => classify(line),
                Some(Err(e)) => return Some(Err(e)),
                None => return self.pending.take().map(|group| Ok(Segment::Molecule(group))),
            };

            if self.in_header {
                if line.molecule_id.is_none() {
                    return Some(Ok(Segment::Passthrough(line)));
                }
                self.in_header = false;
            }

            let Some(molecule_id) = line.molecule_id.clone() else {
                return match self.pending.take() {
                    Some(group) => {
                        self.queued = Some(Segment::Passthrough(line));
                        Some(Ok(Segment::Molecule(group)))
                    }
                    None => Some(Ok(Segment::Passthrough(line))),
                };
            };

            if let Some(group) = self.pending.as_mut() {
                if group.molecule_id == molecule_id {
                    group.lines.push(line);
                    continue;
                }
                let finished = mem::replace(group, MoleculeGroup::start(molecule_id, line));
                return Some(Ok(Segment::Molecule(finished)));
            }
            self.pending = Some(MoleculeGroup::start(molecule_id, line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(input: &str) -> Vec<Segment> {
        MoleculeGrouper::new(input.lines().map(|l| Ok(l.to_string())))
            .map(Result::unwrap)
            .collect()
    }

    fn describe(segment: &Segment) -> String {
        match segment {
            Segment::Passthrough(line) => format!("pass:{}", line.raw),
            Segment::Molecule(group) => format!("mol:{}x{}", group.molecule_id, group.lines.len()),
        }
    }

    const FRAME: &str = "\
4
comment line
C1 0.0 0.0 0.0 0.0 0.0 0.0 12.0 1
H2 1.0 0.0 0.0 0.0 0.0 0.0 1.0 1
O1 2.0 0.0 0.0 0.0 0.0 0.0 16.0 2
NetF 0.1 0.2 0.3
";

    #[test]
    fn header_lines_pass_through_until_first_molecule_id() {
        let result: Vec<_> = segments(FRAME).iter().map(describe).collect();
        assert_eq!(
            result,
            vec![
                "pass:4",
                "pass:comment line",
                "mol:1x2",
                "mol:2x1",
                "pass:NetF 0.1 0.2 0.3",
            ]
        );
    }

    #[test]
    fn lines_without_id_flush_and_never_reopen_the_header() {
        let input = format!("{}{}", FRAME, FRAME);
        let result: Vec<_> = segments(&input).iter().map(describe).collect();
        assert_eq!(
            result[5..],
            [
                "pass:4",
                "pass:comment line",
                "mol:1x2",
                "mol:2x1",
                "pass:NetF 0.1 0.2 0.3",
            ]
        );
    }

    #[test]
    fn group_at_end_of_input_is_flushed() {
        let result: Vec<_> = segments("X 0 0 0 0 0 0 1.0 5\nY 0 0 0 0 0 0 1.0 5")
            .iter()
            .map(describe)
            .collect();
        assert_eq!(result, vec!["mol:5x2"]);
    }

    #[test]
    fn atoms_skip_non_atom_lines_but_keep_indices() {
        let input = "A 0 0 0 0 0 0 1.0 3\nnote x y z w v u 3\nB 1 1 1 0 0 0 1.0 3";
        let Segment::Molecule(group) = segments(input).remove(0) else {
            panic!("expected a molecule group");
        };
        let atoms: Vec<_> = group.atoms().map(|(i, a)| (i, a.name.clone())).collect();
        assert_eq!(atoms, vec![(0, "A".to_string()), (2, "B".to_string())]);
    }
}
