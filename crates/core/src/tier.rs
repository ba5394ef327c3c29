//! Confidence tiers for badge styling.
//!
//! Fixed cutoffs, not configurable. Higher confidence = better.

use serde::Serialize;

/// Lower bound (inclusive) of the high tier.
pub const HIGH_TIER_MIN: f64 = 0.8;

/// Lower bound (inclusive) of the medium tier.
pub const MEDIUM_TIER_MIN: f64 = 0.6;

/// Presentation-only confidence bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Bucket a confidence value:
    /// - `High` if `confidence >= 0.8`
    /// - `Medium` if `confidence >= 0.6`
    /// - `Low` otherwise
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_TIER_MIN {
            Self::High
        } else if confidence >= MEDIUM_TIER_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Badge variant the tier maps to.
    pub fn badge(self) -> &'static str {
        match self {
            Self::High => "success",
            Self::Medium => "primary",
            Self::Low => "secondary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_upper_tier() {
        assert_eq!(ConfidenceTier::from_confidence(0.8), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(0.6), ConfidenceTier::Medium);
    }

    #[test]
    fn just_below_boundaries() {
        assert_eq!(
            ConfidenceTier::from_confidence(0.799_999),
            ConfidenceTier::Medium
        );
        assert_eq!(ConfidenceTier::from_confidence(0.599_999), ConfidenceTier::Low);
    }

    #[test]
    fn extremes() {
        assert_eq!(ConfidenceTier::from_confidence(1.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(0.0), ConfidenceTier::Low);
    }

    #[test]
    fn every_hundredth_lands_in_exactly_one_tier() {
        for i in 0..=100 {
            let c = f64::from(i) / 100.0;
            let expected = if c >= 0.8 {
                "high"
            } else if c >= 0.6 {
                "medium"
            } else {
                "low"
            };
            assert_eq!(ConfidenceTier::from_confidence(c).as_str(), expected, "c = {c}");
        }
    }

    #[test]
    fn badges() {
        assert_eq!(ConfidenceTier::High.badge(), "success");
        assert_eq!(ConfidenceTier::Medium.badge(), "primary");
        assert_eq!(ConfidenceTier::Low.badge(), "secondary");
    }

    #[test]
    fn serializes_lowercase() {
        let v = serde_json::to_value(ConfidenceTier::Medium).unwrap();
        assert_eq!(v, "medium");
    }
}
