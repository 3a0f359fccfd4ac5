use ndarray::Array2;

use super::edit_operation::EditOperation;

/// Dense edit-distance table between a reference and a hypothesis.
///
/// Cell `(i, j)` holds the minimum number of insertions, deletions and
/// substitutions that turn the first `i` reference items into the first
/// `j` hypothesis items. Row 0 and column 0 are seeded with their index;
/// every interior cell is filled row-major from its up, left and diagonal
/// neighbours, which are always finalized first.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentMatrix {
    cells: Array2<usize>,
}

impl AlignmentMatrix {
    pub fn build<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> Self {
        let rows = reference.len() + 1;
        let cols = hypothesis.len() + 1;
        let mut cells = Array2::<usize>::zeros((rows, cols));

        for i in 0..rows {
            cells[[i, 0]] = i;
        }
        for j in 0..cols {
            cells[[0, j]] = j;
        }

        for i in 1..rows {
            for j in 1..cols {
                cells[[i, j]] = if reference[i - 1] == hypothesis[j - 1] {
                    cells[[i - 1, j - 1]]
                } else {
                    1 + cells[[i - 1, j]] // deletion
                        .min(cells[[i, j - 1]]) // insertion
                        .min(cells[[i - 1, j - 1]]) // substitution
                };
            }
        }

        Self { cells }
    }

    /// Number of rows, i.e. reference length + 1.
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns, i.e. hypothesis length + 1.
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        self.cells.get([i, j]).copied()
    }

    /// Minimum edit distance between the full sequences (bottom-right cell).
    pub fn distance(&self) -> usize {
        self.cells[[self.rows() - 1, self.cols() - 1]]
    }

    /// Walks back from the bottom-right cell to recover one optimal edit
    /// script, in reference order.
    ///
    /// `reference` and `hypothesis` must be the sequences the matrix was
    /// built from. Ties prefer match, then substitution, deletion, insertion.
    pub(crate) fn backtrace<T: PartialEq>(
        &self,
        reference: &[T],
        hypothesis: &[T],
    ) -> Vec<EditOperation> {
        let mut ops = Vec::with_capacity(self.rows().max(self.cols()));
        let (mut i, mut j) = (reference.len(), hypothesis.len());

        while i > 0 || j > 0 {
            let here = self.cells[[i, j]];
            if i > 0 && j > 0 && reference[i - 1] == hypothesis[j - 1] {
                ops.push(EditOperation::Match);
                i -= 1;
                j -= 1;
            } else if i > 0 && j > 0 && here == self.cells[[i - 1, j - 1]] + 1 {
                ops.push(EditOperation::Substitution);
                i -= 1;
                j -= 1;
            } else if i > 0 && here == self.cells[[i - 1, j]] + 1 {
                ops.push(EditOperation::Deletion);
                i -= 1;
            } else {
                ops.push(EditOperation::Insertion);
                j -= 1;
            }
        }

        ops.reverse();
        ops
    }
}
