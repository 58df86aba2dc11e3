//! Brace-delimited console input: `{1, -2, 3}` for sequences and
//! `{{1, 2}, {3, 4}}` for matrices.

use crate::error::{KataError, KataResult};
use crate::matrix::Matrix;

/// Parses a single `{a, b, c}` line. `{}` is the empty sequence.
pub fn parse_vector(input: &str) -> KataResult<Vec<i64>> {
    let body = strip_braces(input.trim()).ok_or_else(|| {
        KataError::Parse("expected a list delimited by '{' and '}'".into())
    })?;
    parse_elements(body).map_err(KataError::Parse)
}

/// Parses `{{..}, {..}}`. Every row must have the same length.
pub fn parse_matrix(input: &str) -> KataResult<Matrix<i64>> {
    let body = strip_braces(input.trim()).ok_or_else(|| {
        KataError::Parse("expected a matrix delimited by '{' and '}'".into())
    })?;

    let mut rows = Vec::new();
    let mut rest = body.trim();
    while !rest.is_empty() {
        let n = rows.len();
        if !rest.starts_with('{') {
            return Err(KataError::Parse(format!("expected '{{' to open row {n}")));
        }
        let close = rest
            .find('}')
            .ok_or_else(|| KataError::Parse(format!("row {n} is not closed")))?;
        let row = parse_elements(&rest[1..close])
            .map_err(|e| KataError::Parse(format!("row {n}: {e}")))?;
        rows.push(row);

        rest = rest[close + 1..].trim_start();
        if rest.is_empty() {
            break;
        }
        rest = rest
            .strip_prefix(',')
            .ok_or_else(|| KataError::Parse(format!("expected ',' after row {n}")))?
            .trim_start();
        if rest.is_empty() {
            return Err(KataError::Parse("trailing ',' after the last row".into()));
        }
    }

    Matrix::from_rows(rows).map_err(|e| match e {
        KataError::InvalidInput(msg) => KataError::Parse(msg),
        other => other,
    })
}

fn strip_braces(s: &str) -> Option<&str> {
    s.strip_prefix('{')?.strip_suffix('}')
}

fn parse_elements(body: &str) -> Result<Vec<i64>, String> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    body.split(',')
        .enumerate()
        .map(|(i, token)| parse_element(token.trim(), i))
        .collect()
}

fn parse_element(token: &str, index: usize) -> Result<i64, String> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() {
        return Err(format!("element {index} is empty"));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(format!("unexpected character '{bad}' in element {index}"));
    }
    token
        .parse::<i64>()
        .map_err(|_| format!("element {index} ({token}) does not fit in 64 bits"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vector_basic() {
        assert_eq!(parse_vector("{1,2,3}").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_vector("  { 1 , -20,  300 }  ").unwrap(), vec![1, -20, 300]);
        assert_eq!(parse_vector("{-0}").unwrap(), vec![0]);
    }

    #[test]
    fn test_parse_vector_empty() {
        assert!(parse_vector("{}").unwrap().is_empty());
        assert!(parse_vector("{   }").unwrap().is_empty());
    }

    #[test]
    fn test_parse_vector_extremes() {
        assert_eq!(
            parse_vector("{-9223372036854775808, 9223372036854775807}").unwrap(),
            vec![i64::MIN, i64::MAX]
        );
        assert!(matches!(
            parse_vector("{9223372036854775808}"),
            Err(KataError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_vector_rejects_malformed() {
        for bad in [
            "1,2,3", "{1,2,3", "1,2,3}", "{1,a}", "{1,,2}", "{1,2,}", "{-}", "{+1}", "{1 2}",
            "{{1}}", "",
        ] {
            assert!(
                matches!(parse_vector(bad), Err(KataError::Parse(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_matrix() {
        let m = parse_matrix("{{1, 2}, {3, 4}}").unwrap();
        assert_eq!(m.into_rows(), vec![vec![1, 2], vec![3, 4]]);

        let m = parse_matrix("{ {1,0,-1} }").unwrap();
        assert_eq!((m.rows(), m.cols()), (1, 3));

        assert!(parse_matrix("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_matrix_rejects_malformed() {
        for bad in [
            "{1, 2}",
            "{{1, 2}, {3}}",
            "{{1, 2} {3, 4}}",
            "{{1, 2},}",
            "{{1, 2}, {3, x}}",
            "{{1, 2}",
            "{{}, {}}",
        ] {
            assert!(
                matches!(parse_matrix(bad), Err(KataError::Parse(_))),
                "accepted {bad:?}"
            );
        }
    }
}
