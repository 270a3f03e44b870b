/// One configuration block of a reference file: a count line, a comment line, and a body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// The count as written in the input.
    pub declared_count: i64,
    /// The line after the count line, kept verbatim.
    pub comment: String,
    /// Every line up to the next count line or end of input.
    pub body: Vec<String>,
}

impl Frame {
    pub fn new(declared_count: i64, comment: impl Into<String>) -> Self {
        Self {
            declared_count,
            comment: comment.into(),
            body: Vec::new(),
        }
    }

    /// The number of body lines actually present.
    pub fn actual_count(&self) -> usize {
        self.body.len()
    }

    /// Whether the declared count agrees with the body length.
    pub fn is_consistent(&self) -> bool {
        usize::try_from(self.declared_count).is_ok_and(|n| n == self.actual_count())
    }

    /// Replaces the declared count with the body length.
    ///
    /// Returns `true` if the count changed.
    pub fn normalize(&mut self) -> bool {
        if self.is_consistent() {
            return false;
        }
        self.declared_count = self.actual_count() as i64;
        true
    }
}
