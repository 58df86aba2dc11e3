//! Dense row-major matrix and the matrix exercises.

use serde::Serialize;

use crate::error::{KataError, KataResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Builds a matrix from nested rows. Every row must have the same,
    /// non-zero length; no rows at all gives the empty matrix.
    pub fn from_rows(rows: Vec<Vec<T>>) -> KataResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height > 0 && width == 0 {
            return Err(KataError::InvalidInput("rows must not be empty".into()));
        }
        let mut data = Vec::with_capacity(height * width);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(KataError::InvalidInput(format!(
                    "row {i} has {} columns, expected {width}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Self {
            rows: height,
            cols: width,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        // cols is zero only for the empty matrix, and chunks(0) panics
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }

    pub fn into_rows(self) -> Vec<Vec<T>> {
        let cols = self.cols;
        let mut out = Vec::with_capacity(self.rows);
        let mut data = self.data.into_iter();
        for _ in 0..self.rows {
            out.push(data.by_ref().take(cols).collect());
        }
        out
    }

    fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        let cols = self.cols;
        self.data.swap(a.0 * cols + a.1, b.0 * cols + b.1);
    }
}

/// Zeroes every row and every column that contains a zero.
pub fn set_matrix_zeroes(matrix: &mut Matrix<i64>) {
    let mut zero_rows = vec![false; matrix.rows];
    let mut zero_cols = vec![false; matrix.cols];
    for r in 0..matrix.rows {
        for c in 0..matrix.cols {
            if matrix.data[r * matrix.cols + c] == 0 {
                zero_rows[r] = true;
                zero_cols[c] = true;
            }
        }
    }
    for r in 0..matrix.rows {
        for c in 0..matrix.cols {
            if zero_rows[r] || zero_cols[c] {
                matrix.data[r * matrix.cols + c] = 0;
            }
        }
    }
}

/// Rotates a square matrix 90 degrees clockwise in place: transpose, then
/// reverse each row.
pub fn rotate_clockwise<T>(matrix: &mut Matrix<T>) -> KataResult<()> {
    if !matrix.is_square() {
        return Err(KataError::InvalidInput(format!(
            "cannot rotate a {}x{} matrix in place",
            matrix.rows, matrix.cols
        )));
    }
    let n = matrix.rows;
    for r in 0..n {
        for c in r + 1..n {
            matrix.swap((r, c), (c, r));
        }
    }
    for chunk in matrix.data.chunks_mut(n.max(1)) {
        chunk.reverse();
    }
    Ok(())
}

/// Staircase search over a matrix whose rows and columns are both sorted
/// ascending. Starts at the top-right corner and discards one row or one
/// column per step.
pub fn search_sorted_matrix(matrix: &Matrix<i64>, target: i64) -> Option<(usize, usize)> {
    if matrix.is_empty() {
        return None;
    }
    let mut row = 0;
    let mut col = matrix.cols - 1;
    loop {
        let value = matrix.data[row * matrix.cols + col];
        if value == target {
            return Some((row, col));
        }
        if value > target {
            if col == 0 {
                return None;
            }
            col -= 1;
        } else {
            row += 1;
            if row == matrix.rows {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<i64>>) -> Matrix<i64> {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_from_rows_shape() {
        let m = matrix(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.get(1, 2), Some(&6));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.row(0), Some(&[1, 2, 3][..]));
        assert!(!m.is_square());
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = Matrix::from_rows(vec![vec![1, 2], vec![3]]);
        assert!(matches!(result, Err(KataError::InvalidInput(_))));
    }

    #[test]
    fn test_from_rows_rejects_zero_width() {
        let result = Matrix::<i64>::from_rows(vec![vec![], vec![]]);
        assert!(matches!(result, Err(KataError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_matrix() {
        let m: Matrix<i64> = matrix(vec![]);
        assert!(m.is_empty());
        assert_eq!(m.iter_rows().count(), 0);
        assert_eq!(search_sorted_matrix(&m, 1), None);
    }

    #[test]
    fn test_into_rows() {
        let rows = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
        assert_eq!(matrix(rows.clone()).into_rows(), rows);
    }

    #[test]
    fn test_set_matrix_zeroes() {
        let mut m = matrix(vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]);
        set_matrix_zeroes(&mut m);
        assert_eq!(
            m.into_rows(),
            vec![vec![1, 0, 1], vec![0, 0, 0], vec![1, 0, 1]]
        );
    }

    #[test]
    fn test_set_matrix_zeroes_keeps_negative_values() {
        let mut m = matrix(vec![vec![-1, 2], vec![3, 4]]);
        set_matrix_zeroes(&mut m);
        assert_eq!(m.into_rows(), vec![vec![-1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_set_matrix_zeroes_multiple() {
        let mut m = matrix(vec![vec![0, 1, 2, 0], vec![3, 4, 5, 2], vec![1, 3, 1, 5]]);
        set_matrix_zeroes(&mut m);
        assert_eq!(
            m.into_rows(),
            vec![vec![0, 0, 0, 0], vec![0, 4, 5, 0], vec![0, 3, 1, 0]]
        );
    }

    #[test]
    fn test_rotate_clockwise() {
        let mut m = matrix(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
        rotate_clockwise(&mut m).unwrap();
        assert_eq!(
            m.into_rows(),
            vec![vec![7, 4, 1], vec![8, 5, 2], vec![9, 6, 3]]
        );
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let rows = vec![vec![1, 2], vec![3, 4]];
        let mut m = matrix(rows.clone());
        for _ in 0..4 {
            rotate_clockwise(&mut m).unwrap();
        }
        assert_eq!(m.into_rows(), rows);
    }

    #[test]
    fn test_rotate_rejects_rectangle() {
        let mut m = matrix(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert!(matches!(
            rotate_clockwise(&mut m),
            Err(KataError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_search_sorted_matrix() {
        let m = matrix(vec![
            vec![1, 4, 7, 11],
            vec![2, 5, 8, 12],
            vec![3, 6, 9, 16],
            vec![10, 13, 14, 17],
        ]);
        assert_eq!(search_sorted_matrix(&m, 5), Some((1, 1)));
        assert_eq!(search_sorted_matrix(&m, 10), Some((3, 0)));
        assert_eq!(search_sorted_matrix(&m, 17), Some((3, 3)));
        assert_eq!(search_sorted_matrix(&m, 15), None);
        assert_eq!(search_sorted_matrix(&m, 0), None);
        assert_eq!(search_sorted_matrix(&m, 20), None);
    }
}
