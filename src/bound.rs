use std::cmp::Ordering;
use std::fmt;

/// An interval endpoint: a finite value of `T`, or one of the two
/// point-at-infinity sentinels.
///
/// `NegInfinity` compares less than every `Finite` value and `PosInfinity`;
/// `PosInfinity` compares greater than every `Finite` value and
/// `NegInfinity`. This gives intervals like `(-inf, 5)` or `(3, +inf)` a
/// total order without requiring `T` itself to have a minimum or maximum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Bound<T> {
    NegInfinity,
    Finite(T),
    PosInfinity,
}

impl<T> Bound<T> {
    pub fn is_finite(&self) -> bool {
        matches!(self, Bound::Finite(_))
    }

    pub fn finite(&self) -> Option<&T> {
        match self {
            Bound::Finite(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Ord> PartialOrd for Bound<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for Bound<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        use Bound::*;
        match (self, other) {
            (NegInfinity, NegInfinity) => Ordering::Equal,
            (NegInfinity, _) => Ordering::Less,
            (_, NegInfinity) => Ordering::Greater,
            (PosInfinity, PosInfinity) => Ordering::Equal,
            (PosInfinity, _) => Ordering::Greater,
            (_, PosInfinity) => Ordering::Less,
            (Finite(a), Finite(b)) => a.cmp(b),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Bound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::NegInfinity => write!(f, "-inf"),
            Bound::PosInfinity => write!(f, "+inf"),
            Bound::Finite(v) => write!(f, "{}", v),
        }
    }
}
