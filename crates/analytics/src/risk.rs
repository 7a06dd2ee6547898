//! Risk levels and the canonical color mapping shared by every dashboard.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::result::AnalyticsError;

/// Discrete risk level derived by thresholding a continuous score.
///
/// Ordered from least to most severe, so `Risk::High > Risk::Medium`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    Medium,
    High,
    Critical,
}

impl Risk {
    pub const ALL: [Risk; 4] = [Risk::Low, Risk::Medium, Risk::High, Risk::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Risk::Low => "low",
            Risk::Medium => "medium",
            Risk::High => "high",
            Risk::Critical => "critical",
        }
    }

    /// Display color band for this level (see [`RISK_COLORS`]).
    pub fn color(&self) -> RiskColor {
        RISK_COLORS[*self as usize].1
    }
}

impl core::fmt::Display for Risk {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Risk {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Risk::Low),
            "medium" => Ok(Risk::Medium),
            "high" => Ok(Risk::High),
            "critical" => Ok(Risk::Critical),
            other => Err(AnalyticsError::invalid_input(format!(
                "unknown risk level: {other}"
            ))),
        }
    }
}

/// UI color band for a risk level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskColor {
    Green,
    Amber,
    Red,
    DarkRed,
}

impl RiskColor {
    pub fn hex(&self) -> &'static str {
        match self {
            RiskColor::Green => "#16a34a",
            RiskColor::Amber => "#f59e0b",
            RiskColor::Red => "#dc2626",
            RiskColor::DarkRed => "#7f1d1d",
        }
    }
}

/// The single risk → color table. Indexed by `Risk as usize`.
pub const RISK_COLORS: [(Risk, RiskColor); 4] = [
    (Risk::Low, RiskColor::Green),
    (Risk::Medium, RiskColor::Amber),
    (Risk::High, RiskColor::Red),
    (Risk::Critical, RiskColor::DarkRed),
];

/// Which side of each threshold belongs to the higher band.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandEdge {
    /// `value <= edge` stays in the lower band (`(0, 10]` style intervals).
    UpperInclusive,
    /// `value >= edge` moves to the higher band (`[25, 50)` style intervals).
    LowerInclusive,
}

/// Three ascending cut points separating low/medium/high/critical.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
    pub edge: BandEdge,
}

impl RiskThresholds {
    pub const fn new(medium: f64, high: f64, critical: f64, edge: BandEdge) -> Self {
        Self {
            medium,
            high,
            critical,
            edge,
        }
    }

    /// Bucket a continuous value. Monotonic: a larger value never yields a lower level.
    pub fn classify(&self, value: f64) -> Risk {
        let above = |cut: f64| match self.edge {
            BandEdge::UpperInclusive => value > cut,
            BandEdge::LowerInclusive => value >= cut,
        };

        if above(self.critical) {
            Risk::Critical
        } else if above(self.high) {
            Risk::High
        } else if above(self.medium) {
            Risk::Medium
        } else {
            Risk::Low
        }
    }

    pub fn validate(&self, name: &str) -> Result<(), AnalyticsError> {
        let cuts = [self.medium, self.high, self.critical];
        if cuts.iter().any(|c| !c.is_finite()) {
            return Err(AnalyticsError::invalid_config(format!(
                "{name}: thresholds must be finite"
            )));
        }
        if !(self.medium < self.high && self.high < self.critical) {
            return Err(AnalyticsError::invalid_config(format!(
                "{name}: thresholds must be strictly ascending (medium < high < critical)"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn colors_follow_the_canonical_table() {
        assert_eq!(Risk::Low.color(), RiskColor::Green);
        assert_eq!(Risk::Medium.color(), RiskColor::Amber);
        assert_eq!(Risk::High.color(), RiskColor::Red);
        assert_eq!(Risk::Critical.color(), RiskColor::DarkRed);
        for (risk, _) in RISK_COLORS {
            assert_eq!(RISK_COLORS[risk as usize].0, risk);
        }
        assert_eq!(Risk::Critical.color().hex(), "#7f1d1d");
    }

    #[test]
    fn parses_and_displays_lowercase() {
        for risk in Risk::ALL {
            assert_eq!(risk.to_string().parse::<Risk>().unwrap(), risk);
        }
        assert_eq!(" High ".parse::<Risk>().unwrap(), Risk::High);
        assert!("severe".parse::<Risk>().is_err());
    }

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&Risk::Critical).unwrap(), "\"critical\"");
        assert_eq!(
            serde_json::to_string(&RiskColor::DarkRed).unwrap(),
            "\"dark_red\""
        );
    }

    #[test]
    fn upper_inclusive_keeps_edges_in_lower_band() {
        let t = RiskThresholds::new(0.0, 10.0, 25.0, BandEdge::UpperInclusive);
        assert_eq!(t.classify(-5.0), Risk::Low);
        assert_eq!(t.classify(0.0), Risk::Low);
        assert_eq!(t.classify(0.1), Risk::Medium);
        assert_eq!(t.classify(10.0), Risk::Medium);
        assert_eq!(t.classify(25.0), Risk::High);
        assert_eq!(t.classify(25.1), Risk::Critical);
    }

    #[test]
    fn lower_inclusive_moves_edges_to_higher_band() {
        let t = RiskThresholds::new(25.0, 50.0, 75.0, BandEdge::LowerInclusive);
        assert_eq!(t.classify(24.0), Risk::Low);
        assert_eq!(t.classify(25.0), Risk::Medium);
        assert_eq!(t.classify(50.0), Risk::High);
        assert_eq!(t.classify(75.0), Risk::Critical);
        assert_eq!(t.classify(100.0), Risk::Critical);
    }

    #[test]
    fn validate_rejects_unordered_cuts() {
        let t = RiskThresholds::new(10.0, 5.0, 25.0, BandEdge::UpperInclusive);
        assert!(matches!(t.validate("budget"), Err(AnalyticsError::InvalidConfig(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: bucketing is a monotonic staircase for both edge conventions.
        #[test]
        fn classify_is_monotonic(a in -50.0f64..150.0, b in -50.0f64..150.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for t in [
                RiskThresholds::new(0.0, 10.0, 25.0, BandEdge::UpperInclusive),
                RiskThresholds::new(25.0, 50.0, 75.0, BandEdge::LowerInclusive),
            ] {
                prop_assert!(t.classify(lo) <= t.classify(hi));
            }
        }
    }
}
