use crate::core::models::definition::MsiteDefinition;
use crate::core::models::record::{AtomRecord, MOLECULE_ID_MIN_FIELDS};
use crate::engine::grouping::MoleculeGroup;
use crate::engine::matching::match_pattern;
use nalgebra::{Point3, Vector3};
use std::cmp::Reverse;
use tracing::{debug, warn};

/// Index of the first field copied verbatim from the template (mass, then molecule id).
const FIRST_COPIED_FIELD: usize = 7;
const ZERO_FORCE: &str = "0.0000000";
const FIELD_GAP: &str = "     ";

/// Computes `Σ coefficients[i] * positions[i]`.
///
/// Coefficients are used as given; they need not sum to one.
pub fn weighted_position(positions: &[Point3<f64>], coefficients: &[f64]) -> Point3<f64> {
    let sum = positions
        .iter()
        .zip(coefficients)
        .fold(Vector3::zeros(), |acc, (p, &c)| acc + p.coords * c);
    Point3::from(sum)
}

/// Formats a virtual-site record using `template` for the fields after the coordinates.
///
/// Forces are always written as zero. Every template field from the eighth onward (mass,
/// molecule id, ...) is copied verbatim so the site keeps the template's molecule id. A
/// template with fewer than eight fields yields a name-and-coordinates record.
pub fn format_site_record(name: &str, position: &Point3<f64>, template: &AtomRecord) -> String {
    let mut record = format!(
        "{:<8} {:11.7} {:11.7} {:11.7}",
        name, position.x, position.y, position.z
    );
    if template.field_count() >= MOLECULE_ID_MIN_FIELDS {
        for _ in 0..3 {
            record.push_str(FIELD_GAP);
            record.push_str(ZERO_FORCE);
        }
        let copied = &template.trailing_fields[FIRST_COPIED_FIELD - 4..];
        for field in copied {
            record.push_str(FIELD_GAP);
            record.push_str(field);
        }
    }
    record
}

/// A synthesized site waiting to be spliced into its molecule group.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteInsertion {
    /// Line index (within the group) after which the site goes.
    pub after_line: usize,
    /// Position of the definition in the definition file.
    pub definition_index: usize,
    pub record: String,
}

/// Builds the site for one definition, if its pattern matches the group.
///
/// The record is anchored after the atom bound to the *last pattern slot*, which is not
/// necessarily the last atom of the molecule.
pub fn synthesize_site(
    group: &MoleculeGroup,
    definition: &MsiteDefinition,
    definition_index: usize,
) -> Option<SiteInsertion> {
    let atoms: Vec<(usize, &AtomRecord)> = group.atoms().collect();
    let binding = match_pattern(
        atoms.iter().map(|(_, atom)| atom.name.as_str()),
        definition.pattern(),
    )?;

    let positions: Vec<Point3<f64>> = binding.iter().map(|&i| atoms[i].1.position).collect();
    let position = weighted_position(&positions, definition.coefficients());

    let &last_slot = binding.last()?;
    let (anchor_line, template) = atoms[last_slot];
    if template.field_count() < MOLECULE_ID_MIN_FIELDS {
        warn!(
            "Template atom '{}' for site '{}' in molecule {} has only {} field(s); writing coordinates only.",
            template.name,
            definition.site_name(),
            group.molecule_id,
            template.field_count()
        );
    }

    let record = format_site_record(definition.site_name(), &position, template);
    debug!(
        "Synthesized site '{}' ({}) in molecule {} after line {} of the group.",
        definition.site_name(),
        definition.molecule_type(),
        group.molecule_id,
        anchor_line
    );

    Some(SiteInsertion {
        after_line: anchor_line,
        definition_index,
        record,
    })
}

/// Plans every definition's site for a group against the group's original line indices.
pub fn plan_insertions(
    group: &MoleculeGroup,
    definitions: &[MsiteDefinition],
) -> Vec<SiteInsertion> {
    definitions
        .iter()
        .enumerate()
        .filter_map(|(index, definition)| synthesize_site(group, definition, index))
        .collect()
}

/// Splices planned sites into the group's lines.
///
/// Insertions are applied in descending anchor order so that no insertion shifts the index of
/// another. Sites anchored to the same line keep definition-file order.
pub fn apply_insertions(mut lines: Vec<String>, mut insertions: Vec<SiteInsertion>) -> Vec<String> {
    insertions.sort_by_key(|ins| (Reverse(ins.after_line), Reverse(ins.definition_index)));
    lines.reserve(insertions.len());
    for insertion in insertions {
        lines.insert(insertion.after_line + 1, insertion.record);
    }
    lines
}

/// Runs every definition against a group and returns its output lines with sites inserted,
/// together with the number of sites added.
pub fn process_group(group: MoleculeGroup, definitions: &[MsiteDefinition]) -> (Vec<String>, usize) {
    let insertions = plan_insertions(&group, definitions);
    let inserted = insertions.len();
    let lines = group.lines.into_iter().map(|line| line.raw).collect();
    (apply_insertions(lines, insertions), inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::classify;

    fn group(id: &str, lines: &[&str]) -> MoleculeGroup {
        MoleculeGroup {
            molecule_id: id.to_string(),
            lines: lines.iter().map(|l| classify(*l)).collect(),
        }
    }

    fn definition(pattern: &[&str], site: &str, coefficients: &[f64]) -> MsiteDefinition {
        MsiteDefinition::new(
            "TEST",
            pattern.iter().map(|s| s.to_string()).collect(),
            site,
            coefficients.to_vec(),
        )
        .unwrap()
    }

    fn fields(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn weighted_position_is_coefficient_sum() {
        let p = weighted_position(
            &[Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)],
            &[0.5, 0.5],
        );
        assert_eq!(p, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn weighted_position_allows_zero_sum_coefficients() {
        let p = weighted_position(
            &[Point3::new(1.0, 2.0, 3.0), Point3::new(3.0, 2.0, 1.0)],
            &[1.0, -1.0],
        );
        assert_eq!(p, Point3::new(-2.0, 0.0, 2.0));
    }

    #[test]
    fn site_record_zeroes_forces_and_copies_mass_and_id() {
        let template = classify("C1 0 0 0 9.9 9.9 9.9 12.011 42");
        let record =
            format_site_record("EM", &Point3::new(1.0, -2.5, 0.125), template.as_atom().unwrap());
        assert_eq!(
            record,
            "EM         1.0000000  -2.5000000   0.1250000     0.0000000     0.0000000     0.0000000     12.011     42"
        );
    }

    #[test]
    fn site_record_copies_every_field_after_forces() {
        let template = classify("C1 0 0 0 0 0 0 1.0 extra 42");
        let record =
            format_site_record("EM", &Point3::origin(), template.as_atom().unwrap());
        let f = fields(&record);
        assert_eq!(f.len(), 10);
        assert_eq!(&f[7..], ["1.0", "extra", "42"]);
    }

    #[test]
    fn short_template_degrades_to_coordinates_only() {
        let template = classify("C1 0 0 0");
        let record =
            format_site_record("EM", &Point3::new(1.0, 2.0, 3.0), template.as_atom().unwrap());
        assert_eq!(record, "EM         1.0000000   2.0000000   3.0000000");
    }

    #[test]
    fn site_goes_after_last_pattern_atom_not_last_molecule_atom() {
        let g = group(
            "1",
            &[
                "A 0 0 0 0 0 0 1.0 1",
                "B 2 0 0 0 0 0 1.0 1",
                "C 5 5 5 0 0 0 1.0 1",
            ],
        );
        let (lines, inserted) = process_group(g, &[definition(&["A", "B"], "M", &[0.5, 0.5])]);
        assert_eq!(inserted, 1);
        assert_eq!(lines.len(), 4);
        assert_eq!(fields(&lines[2])[0..4], ["M", "1.0000000", "0.0000000", "0.0000000"]);
        assert!(lines[3].starts_with("C "));
    }

    #[test]
    fn anchor_is_last_slot_even_when_it_precedes_other_slots() {
        let g = group("1", &["A 0 0 0 0 0 0 1.0 1", "B 2 0 0 0 0 0 1.0 1"]);
        let (lines, _) = process_group(g, &[definition(&["B", "A"], "M", &[1.0, 0.0])]);
        assert!(lines[1].starts_with("M "));
        assert!(lines[2].starts_with("B "));
    }

    #[test]
    fn disjoint_definitions_insert_at_their_own_positions() {
        let g = group(
            "1",
            &[
                "A 0 0 0 0 0 0 1.0 1",
                "B 2 0 0 0 0 0 1.0 1",
                "C 0 4 0 0 0 0 1.0 1",
                "D 0 0 6 0 0 0 1.0 1",
            ],
        );
        let definitions = [
            definition(&["C", "D"], "M2", &[0.5, 0.5]),
            definition(&["A", "B"], "M1", &[0.5, 0.5]),
        ];
        let (lines, inserted) = process_group(g, &definitions);
        assert_eq!(inserted, 2);
        let names: Vec<String> = lines.iter().map(|l| fields(l)[0].clone()).collect();
        assert_eq!(names, ["A", "B", "M1", "C", "D", "M2"]);
        assert_eq!(fields(&lines[5])[1..4], ["0.0000000", "2.0000000", "3.0000000"]);
    }

    #[test]
    fn sites_sharing_an_anchor_keep_definition_order() {
        let g = group("1", &["A 0 0 0 0 0 0 1.0 1"]);
        let definitions = [
            definition(&["A"], "M1", &[1.0]),
            definition(&["A"], "M2", &[2.0]),
        ];
        let (lines, _) = process_group(g, &definitions);
        let names: Vec<String> = lines.iter().map(|l| fields(l)[0].clone()).collect();
        assert_eq!(names, ["A", "M1", "M2"]);
    }

    #[test]
    fn unmatched_definition_leaves_group_untouched() {
        let input = ["C1 0 0 0 0 0 0 1.0 1", "H2 1 0 0 0 0 0 1.0 1"];
        let g = group("1", &input);
        let (lines, inserted) =
            process_group(g, &[definition(&["C1", "H2", "C1"], "EM", &[0.2, 0.2, 0.2])]);
        assert_eq!(inserted, 0);
        assert_eq!(lines, input);
    }

    #[test]
    fn molecule_type_label_is_not_checked() {
        let g = group("1", &["O 0 0 0 0 0 0 16.0 1", "H 1 0 0 0 0 0 1.0 1"]);
        let unrelated = MsiteDefinition::new(
            "NOT_WATER",
            vec!["O".into(), "H".into()],
            "M",
            vec![0.5, 0.5],
        )
        .unwrap();
        let (_, inserted) = process_group(g, &[unrelated]);
        assert_eq!(inserted, 1);
    }
}
