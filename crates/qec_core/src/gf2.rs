//! Dense linear algebra over GF(2).

use crate::bit_utils::BitPack;

/// Row-major binary matrix with rows packed into `u64` words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    cols: usize,
    rows: Vec<Vec<u64>>,
}

impl BinaryMatrix {
    pub fn new(cols: usize) -> Self {
        Self {
            cols,
            rows: Vec::new(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Appends a row. Words past `cols` bits are ignored by every operation.
    pub fn push_row(&mut self, mut row: Vec<u64>) {
        row.resize(BitPack::words_for(self.cols), 0);
        self.rows.push(row);
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        BitPack::get(&self.rows[row], col)
    }

    /// Reduces `rows` (with an optional right-hand-side bit per row) to
    /// reduced row echelon form and returns the pivot column of each
    /// leading row.
    fn eliminate(cols: usize, rows: &mut [Vec<u64>], rhs: &mut [bool]) -> Vec<usize> {
        let mut pivots = Vec::new();
        let mut rank = 0;
        for col in 0..cols {
            let Some(found) = (rank..rows.len()).find(|&r| BitPack::get(&rows[r], col)) else {
                continue;
            };
            rows.swap(rank, found);
            if !rhs.is_empty() {
                rhs.swap(rank, found);
            }
            let pivot_row = rows[rank].clone();
            let pivot_rhs = rhs.get(rank).copied().unwrap_or(false);
            for r in 0..rows.len() {
                if r != rank && BitPack::get(&rows[r], col) {
                    BitPack::xor_into(&mut rows[r], &pivot_row);
                    if !rhs.is_empty() {
                        rhs[r] ^= pivot_rhs;
                    }
                }
            }
            pivots.push(col);
            rank += 1;
            if rank == rows.len() {
                break;
            }
        }
        pivots
    }

    pub fn rank(&self) -> usize {
        let mut rows = self.rows.clone();
        Self::eliminate(self.cols, &mut rows, &mut []).len()
    }

    /// Solves `A·v = rhs` and returns one solution with every free variable
    /// set to zero, or `None` if the system is inconsistent.
    pub fn solve(&self, rhs: &[bool]) -> Option<Vec<u64>> {
        if rhs.len() != self.rows.len() {
            return None;
        }
        let mut rows = self.rows.clone();
        let mut rhs = rhs.to_vec();
        let pivots = Self::eliminate(self.cols, &mut rows, &mut rhs);

        if rhs[pivots.len()..].iter().any(|&b| b) {
            return None;
        }

        let mut solution = vec![0u64; BitPack::words_for(self.cols)];
        for (r, &col) in pivots.iter().enumerate() {
            BitPack::set(&mut solution, col, rhs[r]);
        }
        Some(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(cols: usize, rows: &[&[usize]]) -> BinaryMatrix {
        let mut m = BinaryMatrix::new(cols);
        for ones in rows {
            let mut row = vec![0u64; BitPack::words_for(cols)];
            for &c in *ones {
                BitPack::set(&mut row, c, true);
            }
            m.push_row(row);
        }
        m
    }

    #[test]
    fn rank_detects_dependent_rows() {
        let m = matrix(4, &[&[0, 1], &[1, 2], &[0, 2]]);
        assert_eq!(m.rank(), 2);
        let m = matrix(4, &[&[0, 1], &[1, 2], &[2, 3]]);
        assert_eq!(m.rank(), 3);
        assert_eq!(BinaryMatrix::new(3).rank(), 0);
    }

    #[test]
    fn solve_returns_a_valid_solution() {
        let m = matrix(5, &[&[0, 1], &[1, 2], &[3, 4]]);
        let rhs = [true, false, true];
        let v = m.solve(&rhs).unwrap();
        for (r, &want) in rhs.iter().enumerate() {
            let got = (0..5).filter(|&c| m.get(r, c) && BitPack::get(&v, c)).count() % 2 == 1;
            assert_eq!(got, want);
        }
    }

    #[test]
    fn inconsistent_system_has_no_solution() {
        let m = matrix(3, &[&[0, 1], &[0, 1]]);
        assert!(m.solve(&[true, false]).is_none());
        assert!(m.solve(&[true, true]).is_some());
    }
}
