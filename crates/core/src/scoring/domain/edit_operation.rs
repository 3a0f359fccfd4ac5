use serde::Serialize;

/// A single step in the alignment of a hypothesis against a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditOperation {
    Match,
    /// Reference token replaced by a different hypothesis token.
    Substitution,
    /// Reference token missing from the hypothesis.
    Deletion,
    /// Hypothesis token with no reference counterpart.
    Insertion,
}

impl EditOperation {
    pub fn cost(&self) -> usize {
        match self {
            EditOperation::Match => 0,
            _ => 1,
        }
    }
}

impl std::fmt::Display for EditOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditOperation::Match => write!(f, "="),
            EditOperation::Substitution => write!(f, "S"),
            EditOperation::Deletion => write!(f, "D"),
            EditOperation::Insertion => write!(f, "I"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EditCounts {
    pub matches: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
}

impl EditCounts {
    pub fn from_operations(ops: &[EditOperation]) -> Self {
        let mut counts = Self::default();
        for op in ops {
            counts.record(*op);
        }
        counts
    }

    pub fn record(&mut self, op: EditOperation) {
        match op {
            EditOperation::Match => self.matches += 1,
            EditOperation::Substitution => self.substitutions += 1,
            EditOperation::Deletion => self.deletions += 1,
            EditOperation::Insertion => self.insertions += 1,
        }
    }

    /// Total number of edits (substitutions + deletions + insertions).
    pub fn distance(&self) -> usize {
        self.substitutions + self.deletions + self.insertions
    }

    /// Number of reference tokens covered by these operations.
    pub fn reference_len(&self) -> usize {
        self.matches + self.substitutions + self.deletions
    }

    /// Number of hypothesis tokens covered by these operations.
    pub fn hypothesis_len(&self) -> usize {
        self.matches + self.substitutions + self.insertions
    }
}

impl std::ops::AddAssign for EditCounts {
    fn add_assign(&mut self, other: Self) {
        self.matches += other.matches;
        self.substitutions += other.substitutions;
        self.deletions += other.deletions;
        self.insertions += other.insertions;
    }
}
