use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Closed integer interval `[min, max]`.
///
/// Bounds are `i128` so that any `i64` range shifted by any accumulated `i64`
/// offset is representable without wrapping.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Interval {
    pub min: i128,
    pub max: i128,
}

impl Interval {
    /// Returns `None` for an inverted interval.
    pub fn new(min: i128, max: i128) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn singleton(value: i128) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn contains(&self, value: i128) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Valid index range of an array type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ArrayDomain {
    #[serde(default)]
    pub lower: i64,
    #[serde(default)]
    pub upper: i64,
    #[serde(default = "default_known")]
    pub known: bool,
}

impl ArrayDomain {
    pub const fn new(lower: i64, upper: i64) -> Self {
        Self {
            lower,
            upper,
            known: true,
        }
    }

    pub const fn unknown() -> Self {
        Self {
            lower: 0,
            upper: 0,
            known: false,
        }
    }

    /// Domain of a zero-based array with `len` elements. Zero-length arrays
    /// have no valid index and are reported as unknown.
    pub fn from_length(len: u64) -> Self {
        if len == 0 {
            return Self::unknown();
        }
        match i64::try_from(len - 1) {
            Ok(upper) => Self::new(0, upper),
            Err(_) => Self::unknown(),
        }
    }

    /// The comparable interval, or `None` when the domain is unknown or
    /// violates `lower <= upper`.
    pub fn interval(&self) -> Option<Interval> {
        if !self.known {
            return None;
        }
        Interval::new(i128::from(self.lower), i128::from(self.upper))
    }
}

/// Upstream approximation of the runtime values of an SSA value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub lower: i64,
    #[serde(default)]
    pub upper: i64,
    #[serde(default = "default_known")]
    pub known: bool,
}

impl ValueRange {
    pub const fn new(lower: i64, upper: i64) -> Self {
        Self {
            lower,
            upper,
            known: true,
        }
    }

    pub const fn unknown() -> Self {
        Self {
            lower: 0,
            upper: 0,
            known: false,
        }
    }

    pub fn interval(&self) -> Option<Interval> {
        if !self.known {
            return None;
        }
        Interval::new(i128::from(self.lower), i128::from(self.upper))
    }
}

fn default_known() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use serde_json::from_str;

    use super::{ArrayDomain, Interval, ValueRange};

    #[test]
    fn unknown_and_inverted_domains_have_no_interval() {
        assert_eq!(ArrayDomain::unknown().interval(), None);
        assert_eq!(ArrayDomain::new(5, 4).interval(), None);
        assert_eq!(
            ArrayDomain::new(0, 9).interval(),
            Some(Interval { min: 0, max: 9 })
        );
    }

    #[test]
    fn from_length_builds_zero_based_domains() {
        assert_eq!(ArrayDomain::from_length(10), ArrayDomain::new(0, 9));
        assert_eq!(ArrayDomain::from_length(1), ArrayDomain::new(0, 0));
        assert!(!ArrayDomain::from_length(0).known);
        assert!(!ArrayDomain::from_length(u64::MAX).known);
    }

    #[test]
    fn extreme_ranges_widen_without_wrapping() {
        let range = ValueRange::new(i64::MIN, i64::MAX)
            .interval()
            .expect("full range is valid");
        assert_eq!(range.min, i128::from(i64::MIN));
        assert_eq!(range.max, i128::from(i64::MAX));
        assert!(range.contains(0));
        assert!(!range.contains(i128::from(i64::MAX) + 1));
    }

    #[test]
    fn missing_known_flag_defaults_to_known() {
        let domain = from_str::<ArrayDomain>(r#"{"lower": 0, "upper": 3}"#)
            .expect("domain should deserialize");
        assert_eq!(domain, ArrayDomain::new(0, 3));

        let range = from_str::<ValueRange>(r#"{"known": false}"#)
            .expect("range should deserialize");
        assert_eq!(range, ValueRange::unknown());
    }
}
