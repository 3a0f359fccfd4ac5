use serde::Serialize;

use super::alignment_matrix::AlignmentMatrix;
use super::edit_operation::{EditCounts, EditOperation};

/// One optimal edit script between a reference and a hypothesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
    operations: Vec<EditOperation>,
    counts: EditCounts,
}

impl Alignment {
    pub fn operations(&self) -> &[EditOperation] {
        &self.operations
    }

    pub fn counts(&self) -> EditCounts {
        self.counts
    }

    pub fn distance(&self) -> usize {
        self.counts.distance()
    }
}

/// Minimum-edit-distance alignment between two ordered sequences.
///
/// Insertions, deletions and substitutions each cost 1; equal items cost 0.
/// Works for any item type with equality, so the same engine scores words,
/// characters or any other token stream.
pub struct SequenceAligner;

impl SequenceAligner {
    /// Edit distance using two rolling rows instead of the dense table.
    ///
    /// Memory is `O(min(R, H))`; the result is identical to
    /// [`AlignmentMatrix::distance`].
    pub fn edit_distance<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> usize {
        // Unit costs make the distance symmetric, so the shorter side can
        // always be the row buffer.
        let (outer, inner) = if hypothesis.len() <= reference.len() {
            (reference, hypothesis)
        } else {
            (hypothesis, reference)
        };
        if inner.is_empty() {
            return outer.len();
        }

        let mut prev: Vec<usize> = (0..=inner.len()).collect();
        let mut curr = vec![0usize; inner.len() + 1];

        for (i, outer_item) in outer.iter().enumerate() {
            curr[0] = i + 1;
            for (j, inner_item) in inner.iter().enumerate() {
                curr[j + 1] = if outer_item == inner_item {
                    prev[j]
                } else {
                    1 + prev[j + 1].min(curr[j]).min(prev[j])
                };
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[inner.len()]
    }

    /// Full alignment with the recovered edit script.
    pub fn align<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> Alignment {
        let matrix = AlignmentMatrix::build(reference, hypothesis);
        let operations = matrix.backtrace(reference, hypothesis);
        let counts = EditCounts::from_operations(&operations);
        debug_assert_eq!(counts.distance(), matrix.distance());
        Alignment { operations, counts }
    }
}
