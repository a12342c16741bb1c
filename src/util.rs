use std::cmp::Ordering;
use std::cmp::Ordering::{Equal, Greater, Less};

pub(crate) trait OrderingExt {
  /// Chains comparisons: `self` decides unless it is `Equal`, in which case
  /// the next comparison does.
  fn lexico<F: FnOnce() -> Ordering>(self, f: F) -> Ordering;
}

impl OrderingExt for Ordering {
  fn lexico<F: FnOnce() -> Ordering>(self, f: F) -> Ordering {
    match self {
      Equal => f(),
      o => o,
    }
  }
}

/// Tolerance used when comparing coordinates for equality.
pub(crate) const EPSILON: f64 = 0.00001;

/// Orders two floats, treating values within `delta` of each other as equal.
/// Anything involving NaN compares as unordered.
pub(crate) fn fuzzy_cmp(a: f64, b: f64, delta: f64) -> Option<Ordering> {
  if (a - b).abs() <= delta {
    Some(Equal)
  } else if a < b {
    Some(Less)
  } else if a > b {
    Some(Greater)
  } else {
    None
  }
}

/// Compares coordinate lists pairwise with `fuzzy_cmp`, first difference wins.
pub(crate) fn fuzzy_cmp_all(a: &[f64], b: &[f64]) -> Option<Ordering> {
  let mut ordering = Equal;
  for (&x, &y) in a.iter().zip(b.iter()) {
    let next = fuzzy_cmp(x, y, EPSILON)?;
    ordering = ordering.lexico(|| next);
  }
  Some(ordering)
}
