use std::collections::HashMap;

/// Binds each slot of an atom-name pattern to one atom of a molecule.
///
/// A name that appears `k` times in the pattern needs the 1st through `k`-th occurrences of
/// that name in the molecule, in file order. Atoms are scanned once while a running
/// occurrence counter is kept per name; an atom whose count equals a slot's required rank is
/// bound to that slot. Bindings are never revisited.
///
/// # Arguments
///
/// * `atom_names` - The names of the molecule's atoms in file order.
/// * `pattern` - The atom names to locate, repeats allowed.
///
/// # Return
///
/// The index (into `atom_names`) bound to each pattern slot, or `None` if any required
/// occurrence is missing. A partial binding is never returned.
pub fn match_pattern<'a, S>(
    atom_names: impl IntoIterator<Item = &'a str>,
    pattern: &'a [S],
) -> Option<Vec<usize>>
where
    S: AsRef<str>,
{
    if pattern.is_empty() {
        return None;
    }

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    let mut slot_by_rank: HashMap<(&str, usize), usize> = HashMap::with_capacity(pattern.len());
    for (slot, name) in pattern.iter().enumerate() {
        let rank = occurrences.entry(name.as_ref()).or_insert(0);
        *rank += 1;
        slot_by_rank.insert((name.as_ref(), *rank), slot);
    }

    let mut bound: Vec<Option<usize>> = vec![None; pattern.len()];
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(occurrences.len());
    for (atom_index, name) in atom_names.into_iter().enumerate() {
        if !occurrences.contains_key(name) {
            continue;
        }
        let count = seen.entry(name).or_insert(0);
        *count += 1;
        if let Some(&slot) = slot_by_rank.get(&(name, *count)) {
            bound[slot].get_or_insert(atom_index);
        }
    }

    bound.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(atoms: &[&'static str], pattern: &'static [&'static str]) -> Option<Vec<usize>> {
        match_pattern(atoms.iter().copied(), pattern)
    }

    #[test]
    fn repeated_names_bind_successive_occurrences() {
        assert_eq!(find(&["C1", "H2", "C1"], &["C1", "C1"]), Some(vec![0, 2]));
    }

    #[test]
    fn mixed_pattern_follows_occurrence_rank() {
        assert_eq!(
            find(&["C1", "H2", "C1"], &["C1", "H2", "C1"]),
            Some(vec![0, 1, 2])
        );
    }

    #[test]
    fn missing_occurrence_fails_the_whole_match() {
        assert_eq!(find(&["C1", "H2"], &["C1", "H2", "C1"]), None);
        assert_eq!(find(&["C1", "H2"], &["O1"]), None);
    }

    #[test]
    fn slot_order_is_independent_of_atom_order() {
        assert_eq!(find(&["C1", "O1", "H2"], &["H2", "C1"]), Some(vec![2, 0]));
    }

    #[test]
    fn extra_occurrences_are_ignored() {
        assert_eq!(
            find(&["H2", "C1", "H2", "H2", "C1"], &["H2", "H2"]),
            Some(vec![0, 2])
        );
    }

    #[test]
    fn empty_inputs_do_not_match() {
        assert_eq!(find(&[], &["C1"]), None);
        assert_eq!(find(&["C1"], &[]), None);
    }

    #[test]
    fn works_with_owned_pattern_names() {
        let pattern = vec!["A".to_string(), "B".to_string()];
        let atoms = ["B", "A"];
        assert_eq!(match_pattern(atoms.iter().copied(), &pattern), Some(vec![1, 0]));
    }
}
