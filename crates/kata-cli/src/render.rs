//! Console formatting for sequences, matrices and triangles.

use std::fmt::Display;

use kata_core::{Interval, Matrix};

/// `{1, 2, 3}`, the same shape the input parser accepts.
pub fn format_vector<T: Display>(items: &[T]) -> String {
    let body: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("{{{}}}", body.join(", "))
}

/// One row per line:
///
/// ```text
/// [[1, 2],
///  [3, 4]]
/// ```
pub fn format_matrix<T: Display>(matrix: &Matrix<T>) -> String {
    if matrix.is_empty() {
        return "[]".into();
    }
    let rows: Vec<String> = matrix
        .iter_rows()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            format!("[{}]", cells.join(", "))
        })
        .collect();
    format!("[{}]", rows.join(",\n "))
}

/// `{{1, 6}, {8, 10}}`, parseable back as a matrix.
pub fn format_intervals(intervals: &[Interval]) -> String {
    let body: Vec<String> = intervals
        .iter()
        .map(|iv| format!("{{{}, {}}}", iv.start, iv.end))
        .collect();
    format!("{{{}}}", body.join(", "))
}

/// Centers each row under the last one, one leading space per missing row.
pub fn format_triangle(rows: &[Vec<u64>]) -> String {
    let height = rows.len();
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            format!("{}{}", " ".repeat(height - i - 1), cells.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[1, -2, 3]), "{1, -2, 3}");
        assert_eq!(format_vector::<i64>(&[]), "{}");
        assert_eq!(format_vector(&[7]), "{7}");
    }

    #[test]
    fn test_format_vector_parses_back() {
        let v = vec![5i64, -9, 0];
        assert_eq!(kata_core::parse_vector(&format_vector(&v)).unwrap(), v);
    }

    #[test]
    fn test_format_matrix() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(format_matrix(&m), "[[1, 2],\n [3, 4]]");

        let single = Matrix::from_rows(vec![vec![1, 0, 1]]).unwrap();
        assert_eq!(format_matrix(&single), "[[1, 0, 1]]");

        let empty: Matrix<i64> = Matrix::from_rows(vec![]).unwrap();
        assert_eq!(format_matrix(&empty), "[]");
    }

    #[test]
    fn test_format_intervals() {
        let ivs = [Interval::new(1, 6), Interval::new(8, 10)];
        assert_eq!(format_intervals(&ivs), "{{1, 6}, {8, 10}}");
        assert_eq!(format_intervals(&[]), "{}");
    }

    #[test]
    fn test_format_triangle() {
        let t = vec![vec![1], vec![1, 1], vec![1, 2, 1]];
        assert_eq!(format_triangle(&t), "  1\n 1 1\n1 2 1");
        assert_eq!(format_triangle(&[]), "");
    }
}
