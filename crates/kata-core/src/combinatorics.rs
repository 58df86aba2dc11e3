//! Checked counting helpers shared by the permutation engine and the CLI.

use crate::error::{KataError, KataResult};

/// Returns `n!`. `0!` is 1; anything above `20!` overflows `u64`.
pub fn factorial(n: u64) -> KataResult<u64> {
    (2..=n).try_fold(1u64, |acc, k| {
        acc.checked_mul(k)
            .ok_or_else(|| KataError::Overflow(format!("{n}! does not fit in 64 bits")))
    })
}

/// Returns the number of subsets of size `k` of a set of size `n`.
pub fn binomial(n: u64, k: u64) -> KataResult<u64> {
    if k > n {
        return Ok(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc == C(n, i) here, so the division is exact
        acc = acc
            .checked_mul(u128::from(n - i))
            .ok_or_else(|| overflow(n, k))?
            / u128::from(i + 1);
    }
    u64::try_from(acc).map_err(|_| overflow(n, k))
}

/// Number of distinct arrangements of a multiset whose value multiplicities
/// are `counts`: `(Σ counts)! / Π(count!)`.
pub fn multinomial(counts: &[usize]) -> KataResult<u64> {
    let mut total = 0u64;
    let mut acc = 1u64;
    for &c in counts {
        let c = c as u64;
        total += c;
        acc = acc.checked_mul(binomial(total, c)?).ok_or_else(|| {
            KataError::Overflow(format!("multinomial of {counts:?} does not fit in 64 bits"))
        })?;
    }
    Ok(acc)
}

fn overflow(n: u64, k: u64) -> KataError {
    KataError::Overflow(format!("C({n}, {k}) does not fit in 64 bits"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial_small() {
        assert_eq!(factorial(0).unwrap(), 1);
        assert_eq!(factorial(1).unwrap(), 1);
        assert_eq!(factorial(5).unwrap(), 120);
        assert_eq!(factorial(20).unwrap(), 2_432_902_008_176_640_000);
    }

    #[test]
    fn test_factorial_overflow() {
        assert!(matches!(factorial(21), Err(KataError::Overflow(_))));
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 2).unwrap(), 10);
        assert_eq!(binomial(5, 0).unwrap(), 1);
        assert_eq!(binomial(5, 5).unwrap(), 1);
        assert_eq!(binomial(3, 4).unwrap(), 0);
        assert_eq!(binomial(66, 33).unwrap(), 7_219_428_434_016_265_740);
    }

    #[test]
    fn test_binomial_overflow() {
        assert!(matches!(binomial(100, 50), Err(KataError::Overflow(_))));
    }

    #[test]
    fn test_multinomial() {
        // {1,1,2}: 3! / (2! * 1!)
        assert_eq!(multinomial(&[2, 1]).unwrap(), 3);
        assert_eq!(multinomial(&[1, 1, 1]).unwrap(), 6);
        assert_eq!(multinomial(&[4]).unwrap(), 1);
        assert_eq!(multinomial(&[]).unwrap(), 1);
        assert_eq!(multinomial(&[2, 2, 2]).unwrap(), 90);
    }
}
