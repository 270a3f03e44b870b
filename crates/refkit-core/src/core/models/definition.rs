use thiserror::Error;

/// Reasons a definition block is rejected.
///
/// These are non-fatal: the loader skips the offending block and keeps the rest.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Invalid pattern line for {molecule_type}: expected at least one atom name and a site name")]
    TooFewTokens { molecule_type: String },

    #[error("Invalid coefficients for {molecule_type}: '{value}' is not a number")]
    InvalidCoefficient {
        molecule_type: String,
        value: String,
    },

    #[error(
        "Coefficient count mismatch for {molecule_type}: {atoms} atom name(s) but {coefficients} coefficient(s)"
    )]
    CoefficientCountMismatch {
        molecule_type: String,
        atoms: usize,
        coefficients: usize,
    },
}

/// A rule for constructing one virtual site ("M-site") inside a molecule.
///
/// The site is placed at `Σ coefficients[i] * position(pattern[i])`. The molecule type is a
/// descriptive label only; it is never compared against the data, so a pattern that matches
/// atoms of an unrelated molecule still fires.
#[derive(Debug, Clone, PartialEq)]
pub struct MsiteDefinition {
    molecule_type: String,
    pattern: Vec<String>,
    site_name: String,
    coefficients: Vec<f64>,
}

impl MsiteDefinition {
    /// Creates a definition, enforcing that the pattern is non-empty and that there is exactly
    /// one coefficient per pattern slot.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::TooFewTokens`] for an empty pattern and
    /// [`DefinitionError::CoefficientCountMismatch`] when the lengths differ.
    pub fn new(
        molecule_type: impl Into<String>,
        pattern: Vec<String>,
        site_name: impl Into<String>,
        coefficients: Vec<f64>,
    ) -> Result<Self, DefinitionError> {
        let molecule_type = molecule_type.into();
        if pattern.is_empty() {
            return Err(DefinitionError::TooFewTokens { molecule_type });
        }
        if pattern.len() != coefficients.len() {
            return Err(DefinitionError::CoefficientCountMismatch {
                molecule_type,
                atoms: pattern.len(),
                coefficients: coefficients.len(),
            });
        }
        Ok(Self {
            molecule_type,
            pattern,
            site_name: site_name.into(),
            coefficients,
        })
    }

    pub fn molecule_type(&self) -> &str {
        &self.molecule_type
    }

    pub fn pattern(&self) -> &[String] {
        &self.pattern
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}
