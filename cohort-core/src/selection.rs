//! Selection parameters for the tagging entry points.
//!
//! A [`Selection`] bundles the label to apply, the number of people to
//! reach, and how far the achieved count may deviate from it. Tolerance
//! defaults to zero, which requests an exact count.

/// Describes one tagging request.
///
/// # Examples
/// ```
/// use cohort_core::Selection;
///
/// let selection = Selection::new("flu", 40).with_tolerance(2);
/// assert_eq!(selection.label(), "flu");
/// assert_eq!(selection.target(), 40);
/// assert_eq!(selection.tolerance(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    label: String,
    target: i64,
    tolerance: u64,
}

impl Selection {
    /// Creates a selection for the given label and target count, with zero
    /// tolerance.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::Selection;
    ///
    /// let selection = Selection::new("flu", 10);
    /// assert_eq!(selection.tolerance(), 0);
    /// ```
    #[must_use]
    pub fn new(label: impl Into<String>, target: i64) -> Self {
        Self {
            label: label.into(),
            target,
            tolerance: 0,
        }
    }

    /// Overrides the allowed deviation between requested and achieved count.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::Selection;
    ///
    /// let selection = Selection::new("flu", 10).with_tolerance(3);
    /// assert_eq!(selection.tolerance(), 3);
    /// ```
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: u64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the label this selection applies.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the requested number of people to tag.
    #[must_use]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Returns the allowed deviation from the target.
    #[must_use]
    pub fn tolerance(&self) -> u64 {
        self.tolerance
    }
}
