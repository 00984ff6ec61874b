//! Score to severity tier classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GapscopeError, Result};

/// Severity level derived from a score. Higher severity means a worse score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Low,
    Middle,
    High,
}

impl SeverityTier {
    pub const ALL: [SeverityTier; 3] = [SeverityTier::Low, SeverityTier::Middle, SeverityTier::High];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Low => "low",
            SeverityTier::Middle => "middle",
            SeverityTier::High => "high",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A band of the scale: scores below `below` (and at or above the previous
/// band's bound) fall in `tier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityBand {
    pub below: f64,
    pub tier: SeverityTier,
}

/// A scale as written in configuration, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSeverityScale {
    pub bands: Vec<SeverityBand>,
    pub top: SeverityTier,
}

/// Ascending threshold boundaries with their tiers.
///
/// Bounds are inclusive below and exclusive above. The first band is
/// unbounded below and `top` covers everything at or above the last bound.
/// A scale is validated when built, so a bad threshold list fails before any
/// score is classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeverityScale")]
pub struct SeverityScale {
    bands: Vec<SeverityBand>,
    top: SeverityTier,
}

impl SeverityScale {
    /// Build a scale, rejecting empty, non-finite or unsorted bounds.
    pub fn new(bands: Vec<SeverityBand>, top: SeverityTier) -> Result<Self> {
        if bands.is_empty() {
            return Err(GapscopeError::Config("severity scale needs at least one threshold".to_string()));
        }
        if let Some(band) = bands.iter().find(|b| !b.below.is_finite()) {
            return Err(GapscopeError::Config(format!(
                "severity threshold must be finite, got {}",
                band.below
            )));
        }
        if let Some(pair) = bands.windows(2).find(|w| w[0].below >= w[1].below) {
            return Err(GapscopeError::Config(format!(
                "severity thresholds must be strictly ascending ({} then {})",
                pair[0].below, pair[1].below
            )));
        }
        Ok(Self { bands, top })
    }

    /// Scale used for recommendations: below 30 high, below 60 middle, else low.
    pub fn recommendations() -> Self {
        Self {
            bands: vec![
                SeverityBand { below: 30.0, tier: SeverityTier::High },
                SeverityBand { below: 60.0, tier: SeverityTier::Middle },
            ],
            top: SeverityTier::Low,
        }
    }

    /// Scale used for suggested actions: below 60 high, below 75 middle, else low.
    pub fn actions() -> Self {
        Self {
            bands: vec![
                SeverityBand { below: 60.0, tier: SeverityTier::High },
                SeverityBand { below: 75.0, tier: SeverityTier::Middle },
            ],
            top: SeverityTier::Low,
        }
    }

    /// Tier whose range contains `score`.
    pub fn classify(&self, score: f64) -> SeverityTier {
        self.bands
            .iter()
            .find(|band| score < band.below)
            .map(|band| band.tier)
            .unwrap_or(self.top)
    }

    pub fn bands(&self) -> &[SeverityBand] {
        &self.bands
    }

    pub fn top(&self) -> SeverityTier {
        self.top
    }
}

impl TryFrom<RawSeverityScale> for SeverityScale {
    type Error = GapscopeError;

    fn try_from(raw: RawSeverityScale) -> Result<Self> {
        Self::new(raw.bands, raw.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_boundaries() {
        let scale = SeverityScale::recommendations();

        assert_eq!(scale.classify(0.0), SeverityTier::High);
        assert_eq!(scale.classify(29.999), SeverityTier::High);
        assert_eq!(scale.classify(30.0), SeverityTier::Middle);
        assert_eq!(scale.classify(59.5), SeverityTier::Middle);
        assert_eq!(scale.classify(60.0), SeverityTier::Low);
        assert_eq!(scale.classify(100.0), SeverityTier::Low);
    }

    #[test]
    fn test_action_boundaries() {
        let scale = SeverityScale::actions();

        assert_eq!(scale.classify(59.0), SeverityTier::High);
        assert_eq!(scale.classify(60.0), SeverityTier::Middle);
        assert_eq!(scale.classify(74.9), SeverityTier::Middle);
        assert_eq!(scale.classify(75.0), SeverityTier::Low);
    }

    #[test]
    fn test_first_band_unbounded_below() {
        assert_eq!(SeverityScale::recommendations().classify(-1000.0), SeverityTier::High);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            SeverityScale::new(vec![], SeverityTier::Low),
            Err(GapscopeError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_unsorted() {
        let bands = vec![
            SeverityBand { below: 60.0, tier: SeverityTier::High },
            SeverityBand { below: 30.0, tier: SeverityTier::Middle },
        ];
        assert!(SeverityScale::new(bands, SeverityTier::Low).is_err());
    }

    #[test]
    fn test_rejects_repeated_bound() {
        let bands = vec![
            SeverityBand { below: 30.0, tier: SeverityTier::High },
            SeverityBand { below: 30.0, tier: SeverityTier::Middle },
        ];
        assert!(SeverityScale::new(bands, SeverityTier::Low).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let bands = vec![SeverityBand { below: f64::INFINITY, tier: SeverityTier::High }];
        assert!(SeverityScale::new(bands, SeverityTier::Low).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: SeverityScale = serde_json::from_str(
            r#"{"bands":[{"below":60,"tier":"high"},{"below":75,"tier":"middle"}],"top":"low"}"#,
        )
        .unwrap();
        assert_eq!(ok, SeverityScale::actions());

        let bad = serde_json::from_str::<SeverityScale>(r#"{"bands":[],"top":"low"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_round_trips() {
        let scale = SeverityScale::recommendations();
        let json = serde_json::to_string(&scale).unwrap();
        assert_eq!(serde_json::from_str::<SeverityScale>(&json).unwrap(), scale);
    }
}
