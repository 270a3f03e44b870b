use nalgebra::Point3;

/// Minimum number of whitespace-separated fields a line needs to carry a molecule id.
pub const MOLECULE_ID_MIN_FIELDS: usize = 8;

/// An atom line of a reference file: `NAME X Y Z [FX FY FZ MASS MOL_ID ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// The atom name (first field).
    pub name: String,
    /// Cartesian coordinates taken from fields 2-4.
    pub position: Point3<f64>,
    /// Every field after the coordinates, kept as text (forces, mass, molecule id, ...).
    pub trailing_fields: Vec<String>,
}

impl AtomRecord {
    /// Total number of whitespace-separated fields on the original line.
    pub fn field_count(&self) -> usize {
        4 + self.trailing_fields.len()
    }

    /// Returns the trailing field at the given 0-based *line* field index, if present.
    pub fn field(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(4)
            .and_then(|i| self.trailing_fields.get(i))
            .map(String::as_str)
    }
}

/// The closed set of line kinds found in a reference file.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A frame's line-count line: exactly one integer token.
    Count(i64),
    /// An atom line with parseable coordinates.
    Atom(AtomRecord),
    /// Anything else (comments, NetF/Torq lines, free-form header text).
    Other,
}

/// A raw line together with its classification.
///
/// Classification happens once; downstream stages match on [`Record`] and read the cached
/// molecule id instead of re-tokenizing `raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine {
    /// The line content without its terminator, written back verbatim.
    pub raw: String,
    pub record: Record,
    /// The last field of the line when it has at least [`MOLECULE_ID_MIN_FIELDS`] fields.
    pub molecule_id: Option<String>,
}

impl ClassifiedLine {
    pub fn is_count(&self) -> bool {
        matches!(self.record, Record::Count(_))
    }

    pub fn as_atom(&self) -> Option<&AtomRecord> {
        match &self.record {
            Record::Atom(atom) => Some(atom),
            _ => None,
        }
    }
}

/// Tokenizes a line and tags it as a count line, an atom record, or other.
pub fn classify(line: impl Into<String>) -> ClassifiedLine {
    let raw = line.into();
    let fields: Vec<&str> = raw.split_whitespace().collect();

    let molecule_id = if fields.len() >= MOLECULE_ID_MIN_FIELDS {
        fields.last().map(|id| id.to_string())
    } else {
        None
    };

    let record = match fields.as_slice() {
        [single] => match single.parse::<i64>() {
            Ok(count) => Record::Count(count),
            Err(_) => Record::Other,
        },
        [name, x, y, z, rest @ ..] => match (x.parse(), y.parse(), z.parse()) {
            (Ok(x), Ok(y), Ok(z)) => Record::Atom(AtomRecord {
                name: name.to_string(),
                position: Point3::new(x, y, z),
                trailing_fields: rest.iter().map(|f| f.to_string()).collect(),
            }),
            _ => Record::Other,
        },
        _ => Record::Other,
    };

    ClassifiedLine {
        raw,
        record,
        molecule_id,
    }
}

/// Returns `true` if the line is exactly one integer token.
pub fn is_count_line(line: &str) -> bool {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(single), None) => single.parse::<i64>().is_ok(),
        _ => false,
    }
}
