//! Inclusive price range filter.
//!
//! Prices are integers in minor currency units (cents).

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Inclusive `[min, max]` price bounds. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest accepted price, inclusive.
    pub min: Option<i64>,
    /// Highest accepted price, inclusive.
    pub max: Option<i64>,
}

impl PriceRange {
    /// Build a range, rejecting negative bounds and inverted ranges.
    pub fn new(min: Option<i64>, max: Option<i64>) -> AppResult<Self> {
        if min.is_some_and(|v| v < 0) || max.is_some_and(|v| v < 0) {
            return Err(AppError::validation("Price bounds must be non-negative"));
        }
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(AppError::validation(format!(
                    "min_price ({lo}) must not exceed max_price ({hi})"
                )));
            }
        }
        Ok(Self { min, max })
    }

    /// Parse raw query-string bounds. Blank values count as absent.
    pub fn parse(min: Option<&str>, max: Option<&str>) -> AppResult<Self> {
        Self::new(parse_bound("min_price", min)?, parse_bound("max_price", max)?)
    }

    /// A range with no bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether `price` falls inside the range.
    pub fn contains(&self, price: i64) -> bool {
        self.min.is_none_or(|lo| price >= lo) && self.max.is_none_or(|hi| price <= hi)
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> AppResult<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::validation(format!("{name} must be an integer, got '{value}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let range = PriceRange::new(Some(1000), Some(5000)).unwrap();
        assert!(!range.contains(999));
        assert!(range.contains(1000));
        assert!(range.contains(5000));
        assert!(!range.contains(5001));
    }

    #[test]
    fn test_open_ended() {
        let range = PriceRange::new(Some(10), None).unwrap();
        assert!(range.contains(i64::MAX));
        assert!(!range.contains(9));
        assert!(PriceRange::unbounded().contains(0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = PriceRange::parse(Some("cheap"), None).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_parse_blank_is_absent() {
        let range = PriceRange::parse(Some(""), Some(" 20 ")).unwrap();
        assert_eq!(range, PriceRange { min: None, max: Some(20) });
    }

    #[test]
    fn test_inverted_and_negative_rejected() {
        assert!(PriceRange::new(Some(10), Some(5)).is_err());
        assert!(PriceRange::new(Some(-1), None).is_err());
    }
}
