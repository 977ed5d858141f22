//! Page orders: validation of user-supplied orders and the [`Permutation`] type.
//!
//! Users speak in 1-based page numbers ("3,1,2,4"); everything past this
//! module works with 0-based indices. A [`Permutation`] can only be obtained
//! through a constructor that has checked it is a bijection over
//! `0..page_count`, so downstream code never has to re-check a value of this
//! type against the count it was built for.

use crate::error::ReorderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::num::IntErrorKind;

/// A validated reordering of `0..len` page indices.
///
/// Position `k` holds the source page index that becomes output page `k`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// The order that leaves every page where it is.
    pub fn identity(page_count: usize) -> Self {
        Self((0..page_count).collect())
    }

    /// `[index]` followed by every other page in its original order.
    pub fn move_to_front(page_count: usize, index: usize) -> Result<Self, ReorderError> {
        if index >= page_count {
            return Err(ReorderError::PageIndexOutOfRange { index, page_count });
        }
        let order = std::iter::once(index)
            .chain((0..page_count).filter(|&i| i != index))
            .collect();
        Ok(Self(order))
    }

    /// Validate a 0-based order against `page_count`.
    ///
    /// Out-of-range entries are reported first as
    /// [`ReorderError::PageIndexOutOfRange`]; any other failure to be a
    /// bijection is [`ReorderError::InvalidPermutation`].
    pub fn from_indices(indices: Vec<usize>, page_count: usize) -> Result<Self, ReorderError> {
        if let Some(&index) = indices.iter().find(|&&i| i >= page_count) {
            return Err(ReorderError::PageIndexOutOfRange { index, page_count });
        }
        if !is_bijection(&indices, page_count) {
            return Err(ReorderError::InvalidPermutation {
                detail: describe_defect(&indices, page_count),
            });
        }
        Ok(Self(indices))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(k, &i)| k == i)
    }

    /// The order as 1-based page numbers, the way users write it.
    pub fn to_one_based(&self) -> Vec<usize> {
        self.0.iter().map(|i| i + 1).collect()
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// Validate a user-supplied order of 1-based page numbers.
///
/// Checks run in this order:
/// 1. every token (trimmed) parses as an integer, else [`ReorderError::Parse`];
/// 2. there are exactly `page_count` tokens, else [`ReorderError::WrongLength`];
/// 3. the 0-based values are exactly `{0, …, page_count-1}`, else
///    [`ReorderError::InvalidPermutation`]. Duplicates, zero, negative and
///    too-large numbers all land here.
///
/// # Example
/// ```rust
/// use pdf_reorder::validate_permutation;
///
/// let p = validate_permutation(&["3", "1", "2"], 3).unwrap();
/// assert_eq!(p.as_slice(), &[2, 0, 1]);
/// assert!(validate_permutation(&["2", "1", "2"], 3).is_err());
/// ```
pub fn validate_permutation<S: AsRef<str>>(
    tokens: &[S],
    page_count: usize,
) -> Result<Permutation, ReorderError> {
    let indices = tokens
        .iter()
        .map(|t| token_index(t.as_ref().trim()))
        .collect::<Result<Vec<usize>, _>>()?;

    if indices.len() != page_count {
        return Err(ReorderError::WrongLength {
            expected: page_count,
            actual: indices.len(),
        });
    }

    if !is_bijection(&indices, page_count) {
        return Err(ReorderError::InvalidPermutation {
            detail: describe_defect(&indices, page_count),
        });
    }

    Ok(Permutation(indices))
}

/// 0-based index for a 1-based page number token.
///
/// Integers that cannot be a page (below 1, or too large for `i64`) map to
/// `usize::MAX` so the set comparison rejects them; only non-integers are
/// [`ReorderError::Parse`].
fn token_index(token: &str) -> Result<usize, ReorderError> {
    match token.parse::<i64>() {
        Ok(n) if n >= 1 => Ok(usize::try_from(n - 1).unwrap_or(usize::MAX)),
        Ok(_) => Ok(usize::MAX),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(usize::MAX)
        }
        Err(_) => Err(ReorderError::Parse {
            token: token.to_string(),
        }),
    }
}

/// Parse the comma-separated manual order text, e.g. `"3, 1, 2, 4"`.
pub fn parse_order(text: &str, page_count: usize) -> Result<Permutation, ReorderError> {
    let tokens: Vec<&str> = text.split(',').collect();
    validate_permutation(&tokens, page_count)
}

/// `"1,2,…,n"`: the identity order as text, a natural pre-filled value for
/// an order input field.
pub fn default_order_text(page_count: usize) -> String {
    (1..=page_count)
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn is_bijection(indices: &[usize], page_count: usize) -> bool {
    indices.len() == page_count
        && indices.iter().all(|&i| i < page_count)
        && indices.iter().collect::<BTreeSet<_>>().len() == page_count
}

/// Human-readable reason an order is not a bijection, in 1-based numbers.
fn describe_defect(indices: &[usize], page_count: usize) -> String {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    let mut out_of_range = false;
    for &i in indices {
        if i >= page_count {
            out_of_range = true;
        } else if !seen.insert(i) {
            duplicates.insert(i + 1);
        }
    }
    let missing: Vec<usize> = (0..page_count)
        .filter(|i| !seen.contains(i))
        .map(|i| i + 1)
        .collect();

    let mut parts = Vec::new();
    if out_of_range {
        parts.push(format!("page numbers must be between 1 and {page_count}"));
    }
    if !duplicates.is_empty() {
        parts.push(format!("duplicates {:?}", duplicates.into_iter().collect::<Vec<_>>()));
    }
    if !missing.is_empty() {
        parts.push(format!("missing {missing:?}"));
    }
    if parts.is_empty() {
        parts.push("not a permutation".to_string());
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_rotation_of_three() {
        let p = validate_permutation(&["3", "1", "2"], 3).unwrap();
        assert_eq!(p.as_slice(), &[2, 0, 1]);
        assert_eq!(p.to_one_based(), vec![3, 1, 2]);
    }

    #[test]
    fn rejects_duplicate_and_missing() {
        let err = validate_permutation(&["2", "1", "2"], 3).unwrap_err();
        match err {
            ReorderError::InvalidPermutation { detail } => {
                assert!(detail.contains("duplicates [2]"), "got: {detail}");
                assert!(detail.contains("missing [3]"), "got: {detail}");
            }
            other => panic!("expected InvalidPermutation, got {other:?}"),
        }
    }

    #[test]
    fn huge_integers_are_out_of_range_not_parse_errors() {
        for huge in ["99999999999999999999", "-99999999999999999999"] {
            let err = validate_permutation(&[huge, "1"], 2).unwrap_err();
            assert!(
                matches!(err, ReorderError::InvalidPermutation { .. }),
                "{huge}: got {err:?}"
            );
        }
    }

    #[test]
    fn non_integer_is_parse_error() {
        let err = validate_permutation(&["1", "2.5"], 2).unwrap_err();
        assert!(matches!(err, ReorderError::Parse { ref token } if token == "2.5"));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = validate_permutation(&["1", "2"], 3).unwrap_err();
        assert!(matches!(
            err,
            ReorderError::WrongLength {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_values() {
        for bad in [["1", "2", "4"], ["0", "1", "2"], ["-1", "1", "2"]] {
            let err = validate_permutation(&bad, 3).unwrap_err();
            assert!(
                matches!(err, ReorderError::InvalidPermutation { .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn parse_errors_win_over_length() {
        let err = validate_permutation(&["1", "two"], 3).unwrap_err();
        assert!(matches!(err, ReorderError::Parse { ref token } if token == "two"));
    }

    #[test]
    fn empty_token_is_a_parse_error() {
        let err = parse_order("1,,2", 3).unwrap_err();
        assert!(matches!(err, ReorderError::Parse { ref token } if token.is_empty()));
    }

    #[test]
    fn parse_order_trims_whitespace() {
        let p = parse_order(" 3, 1 ,2,4 ", 4).unwrap();
        assert_eq!(p.as_slice(), &[2, 0, 1, 3]);
    }

    #[test]
    fn accepts_every_permutation_of_four() {
        fn permutations(items: Vec<usize>) -> Vec<Vec<usize>> {
            if items.len() <= 1 {
                return vec![items];
            }
            let mut out = Vec::new();
            for i in 0..items.len() {
                let mut rest = items.clone();
                let head = rest.remove(i);
                for mut tail in permutations(rest) {
                    tail.insert(0, head);
                    out.push(tail);
                }
            }
            out
        }

        let all = permutations(vec![1, 2, 3, 4]);
        assert_eq!(all.len(), 24);
        for perm in all {
            let tokens: Vec<String> = perm.iter().map(|n| n.to_string()).collect();
            let p = validate_permutation(&tokens, 4).unwrap();
            assert_eq!(p.to_one_based(), perm);
        }
    }

    #[test]
    fn default_text_round_trips_to_identity() {
        assert_eq!(default_order_text(4), "1,2,3,4");
        let p = parse_order(&default_order_text(4), 4).unwrap();
        assert!(p.is_identity());
    }

    #[test]
    fn move_to_front_keeps_remaining_order() {
        let p = Permutation::move_to_front(4, 2).unwrap();
        assert_eq!(p.as_slice(), &[2, 0, 1, 3]);
        assert!(Permutation::move_to_front(4, 0).unwrap().is_identity());
    }

    #[test]
    fn move_to_front_out_of_range() {
        let err = Permutation::move_to_front(4, 4).unwrap_err();
        assert!(matches!(
            err,
            ReorderError::PageIndexOutOfRange {
                index: 4,
                page_count: 4
            }
        ));
    }

    #[test]
    fn from_indices_reports_range_before_bijection() {
        let err = Permutation::from_indices(vec![0, 0, 9], 3).unwrap_err();
        assert!(matches!(err, ReorderError::PageIndexOutOfRange { index: 9, .. }));

        let err = Permutation::from_indices(vec![0, 0, 1], 3).unwrap_err();
        assert!(matches!(err, ReorderError::InvalidPermutation { .. }));
    }

    #[test]
    fn zero_pages_accepts_empty_order() {
        let p = validate_permutation::<&str>(&[], 0).unwrap();
        assert!(p.is_empty());
    }
}
