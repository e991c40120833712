//! N×N occupancy grid used by the backtracking search
//!
//! A `Board` is owned by exactly one solver. Snapshots are plain clones:
//! the grid is a flat `Vec<bool>`, so a clone is a single allocation and
//! shares nothing with the live board.

use std::fmt;

/// Square board holding at most one queen per cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    n: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Create an empty `n`×`n` board.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    /// Create an empty board with a queen already placed at `(0, col)`.
    pub fn with_first_queen(n: usize, col: usize) -> Self {
        let mut board = Self::new(n);
        board.place(0, col);
        board
    }

    /// Board size.
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.n && col < self.n, "cell ({row}, {col}) out of range");
        row * self.n + col
    }

    /// Whether `(row, col)` holds a queen.
    #[inline(always)]
    pub fn is_queen(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    /// Check whether a queen at `(row, col)` would be attacked by any queen
    /// in rows `[0, row)`.
    ///
    /// Rows at and below `row` are ignored: the search fills rows strictly
    /// top-down, so they are empty whenever this is called.
    pub fn is_safe(&self, row: usize, col: usize) -> bool {
        for r in 0..row {
            let dist = row - r;
            if self.is_queen(r, col) {
                return false;
            }
            if dist <= col && self.is_queen(r, col - dist) {
                return false;
            }
            if col + dist < self.n && self.is_queen(r, col + dist) {
                return false;
            }
        }
        true
    }

    /// Put a queen on `(row, col)`. The caller has checked [`Board::is_safe`].
    pub fn place(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        self.cells[idx] = true;
    }

    /// Clear `(row, col)`.
    pub fn remove(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        self.cells[idx] = false;
    }

    /// Deep copy of the grid, independent of later mutation of `self`.
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    /// Column of the first queen in `row`, if any.
    pub fn queen_in_row(&self, row: usize) -> Option<usize> {
        let start = row * self.n;
        self.cells[start..start + self.n].iter().position(|&q| q)
    }

    /// All queens as `(row, col)` pairs in row-major order.
    pub fn queens(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.n;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, q)| **q)
            .map(move |(i, _)| (i / n, i % n))
    }

    pub fn queen_count(&self) -> usize {
        self.cells.iter().filter(|q| **q).count()
    }

    /// Queen column per row, `None` for rows without a queen.
    pub fn columns(&self) -> Vec<Option<usize>> {
        (0..self.n).map(|row| self.queen_in_row(row)).collect()
    }

    /// Full pairwise check: exactly `n` queens and no two sharing a row,
    /// column or diagonal.
    pub fn is_valid_solution(&self) -> bool {
        let queens: Vec<_> = self.queens().collect();
        if queens.len() != self.n {
            return false;
        }
        for (i, &(r1, c1)) in queens.iter().enumerate() {
            for &(r2, c2) in &queens[i + 1..] {
                if r1 == r2 || c1 == c2 || r1.abs_diff(r2) == c1.abs_diff(c2) {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.n {
            for col in 0..self.n {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", if self.is_queen(row, col) { 'Q' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from_columns(n: usize, cols: &[usize]) -> Board {
        let mut board = Board::new(n);
        for (row, &col) in cols.iter().enumerate() {
            board.place(row, col);
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(5);
        assert_eq!(board.size(), 5);
        assert_eq!(board.queen_count(), 0);
        assert!(board.columns().iter().all(Option::is_none));
    }

    #[test]
    fn test_with_first_queen() {
        let board = Board::with_first_queen(6, 2);
        assert!(board.is_queen(0, 2));
        assert_eq!(board.queen_count(), 1);
        assert_eq!(board.queen_in_row(0), Some(2));
    }

    #[test]
    fn test_is_safe_column_and_diagonals() {
        let board = Board::with_first_queen(4, 1);
        assert!(!board.is_safe(1, 0)); // down-left diagonal
        assert!(!board.is_safe(1, 1)); // same column
        assert!(!board.is_safe(1, 2)); // down-right diagonal
        assert!(board.is_safe(1, 3));
        assert!(board.is_safe(2, 0));
        assert!(!board.is_safe(3, 1));
    }

    #[test]
    fn test_is_safe_edge_columns() {
        // Queens on both edges must not make diagonal scans leave the board.
        let n = 6;
        let board = board_from_columns(n, &[0, 5]);
        for col in [0, n - 1] {
            let _ = board.is_safe(2, col);
            let _ = board.is_safe(n - 1, col);
        }
        assert!(!board.is_safe(2, 0));
        assert!(!board.is_safe(2, 5));
        assert!(board.is_safe(2, 1));
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::new(4);
        board.place(2, 3);
        assert!(board.is_queen(2, 3));
        board.remove(2, 3);
        assert!(!board.is_queen(2, 3));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut board = Board::with_first_queen(4, 1);
        let snap = board.snapshot();
        board.place(1, 3);
        board.remove(0, 1);
        assert!(snap.is_queen(0, 1));
        assert!(!snap.is_queen(1, 3));
    }

    #[test]
    fn test_is_valid_solution() {
        assert!(board_from_columns(4, &[1, 3, 0, 2]).is_valid_solution());
        assert!(!board_from_columns(4, &[1, 3, 0]).is_valid_solution());
        assert!(!board_from_columns(4, &[0, 1, 2, 3]).is_valid_solution());

        let mut two_in_row = Board::new(4);
        two_in_row.place(0, 0);
        two_in_row.place(0, 2);
        two_in_row.place(2, 1);
        two_in_row.place(3, 3);
        assert!(!two_in_row.is_valid_solution());
    }

    #[test]
    fn test_display() {
        let board = board_from_columns(4, &[1, 3, 0, 2]);
        assert_eq!(
            board.to_string(),
            ". Q . .\n. . . Q\nQ . . .\n. . Q .\n"
        );
    }
}
