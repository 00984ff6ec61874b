//! Year-over-year trend derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of change between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improved,
    Worsened,
    Unchanged,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Improved => "improved",
            Trend::Worsened => "worsened",
            Trend::Unchanged => "unchanged",
        }
    }

    /// Short arrow for terminal output.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Improved => "↑",
            Trend::Worsened => "↓",
            Trend::Unchanged => "→",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decides whether one value is better than another.
pub trait TrendComparator {
    /// True when `current` is strictly better than `prior`.
    fn is_better(&self, current: f64, prior: f64) -> bool;
}

/// Built-in comparators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger values are better (category scores).
    #[default]
    HigherIsBetter,
    /// Values nearer zero are better (gap-style metrics).
    CloserToZero,
}

impl TrendComparator for Direction {
    fn is_better(&self, current: f64, prior: f64) -> bool {
        match self {
            Direction::HigherIsBetter => current > prior,
            Direction::CloserToZero => current.abs() < prior.abs(),
        }
    }
}

/// Trend from `prior` to `current`.
///
/// Unchanged when either side is absent or the values are equal.
pub fn trend<C: TrendComparator + ?Sized>(current: Option<f64>, prior: Option<f64>, comparator: &C) -> Trend {
    match (current, prior) {
        (Some(c), Some(p)) if c == p => Trend::Unchanged,
        (Some(c), Some(p)) if comparator.is_better(c, p) => Trend::Improved,
        (Some(_), Some(_)) => Trend::Worsened,
        _ => Trend::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UP: Direction = Direction::HigherIsBetter;

    #[test]
    fn test_higher_is_better() {
        assert_eq!(trend(Some(60.0), Some(55.0), &UP), Trend::Improved);
        assert_eq!(trend(Some(50.0), Some(55.0), &UP), Trend::Worsened);
        assert_eq!(trend(Some(55.0), Some(55.0), &UP), Trend::Unchanged);
    }

    #[test]
    fn test_absent_values_unchanged() {
        assert_eq!(trend(None, Some(55.0), &UP), Trend::Unchanged);
        assert_eq!(trend(Some(55.0), None, &UP), Trend::Unchanged);
        assert_eq!(trend(None, None, &UP), Trend::Unchanged);
    }

    #[test]
    fn test_closer_to_zero() {
        let zero = Direction::CloserToZero;
        assert_eq!(trend(Some(-2.0), Some(5.0), &zero), Trend::Improved);
        assert_eq!(trend(Some(6.0), Some(-5.0), &zero), Trend::Worsened);
        // Equal distance from zero is not an improvement
        assert_eq!(trend(Some(-5.0), Some(5.0), &zero), Trend::Worsened);
    }

    #[test]
    fn test_custom_comparator() {
        struct LowerIsBetter;
        impl TrendComparator for LowerIsBetter {
            fn is_better(&self, current: f64, prior: f64) -> bool {
                current < prior
            }
        }
        assert_eq!(trend(Some(1.0), Some(2.0), &LowerIsBetter), Trend::Improved);
    }

    #[test]
    fn test_direction_serde_rejects_unknown() {
        assert!(serde_json::from_str::<Direction>("\"lower_is_better\"").is_err());
        assert_eq!(
            serde_json::from_str::<Direction>("\"closer_to_zero\"").unwrap(),
            Direction::CloserToZero
        );
    }
}
