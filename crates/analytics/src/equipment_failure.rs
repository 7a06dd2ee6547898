use serde::{Deserialize, Serialize};

use buildops_core::{ValueObject, guard};

use crate::config::EquipmentFailureConfig;
use crate::job::{Calculator, InsightSummary};
use crate::result::{AnalyticsError, AnalyticsResult};
use crate::risk::Risk;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSnapshot {
    pub age_months: u32,
    pub usage_hours: f64,
    pub maintenance_count: u32,
    pub days_since_last_service: u32,
    /// Manufacturer/company service interval. Must be > 0.
    pub expected_service_interval_days: u32,
}

impl ValueObject for EquipmentSnapshot {}

impl EquipmentSnapshot {
    pub fn validate(&self) -> AnalyticsResult<()> {
        guard::non_negative("usage_hours", self.usage_hours)?;
        if self.expected_service_interval_days == 0 {
            return Err(AnalyticsError::invalid_input(
                "expected_service_interval_days must be > 0",
            ));
        }
        Ok(())
    }

    /// Days past the service interval, if any.
    pub fn days_overdue(&self) -> Option<u32> {
        self.days_since_last_service
            .checked_sub(self.expected_service_interval_days)
            .filter(|d| *d > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentFailureResult {
    /// Failure probability in `[0, 1]`.
    pub probability: f64,
    pub risk: Risk,
    pub recommendation: String,
}

impl ValueObject for EquipmentFailureResult {}

/// Weighted age/usage/overdue-service failure model.
///
/// Overdue maintenance carries half the weight: it is both the most predictive
/// and the most actionable signal.
#[derive(Debug, Clone, Default)]
pub struct EquipmentFailurePredictor {
    config: EquipmentFailureConfig,
}

impl EquipmentFailurePredictor {
    pub fn new(config: EquipmentFailureConfig) -> Self {
        Self { config }
    }

    pub fn predict(&self, snapshot: &EquipmentSnapshot) -> AnalyticsResult<EquipmentFailureResult> {
        snapshot.validate()?;
        let cfg = &self.config;

        let age_factor = (f64::from(snapshot.age_months) / cfg.age_ceiling_months).min(1.0);
        let usage_factor = (snapshot.usage_hours / cfg.usage_ceiling_hours).min(1.0);
        let overdue_ratio = f64::from(snapshot.days_since_last_service)
            / f64::from(snapshot.expected_service_interval_days);
        let overdue_factor = (overdue_ratio / cfg.overdue_ceiling_ratio).min(1.0);

        let probability = (cfg.age_weight * age_factor
            + cfg.usage_weight * usage_factor
            + cfg.overdue_weight * overdue_factor)
            .clamp(0.0, 1.0);
        let risk = cfg.thresholds.classify(probability);

        Ok(EquipmentFailureResult {
            probability,
            risk,
            recommendation: recommendation(risk, snapshot),
        })
    }
}

impl Calculator for EquipmentFailurePredictor {
    type Input = EquipmentSnapshot;
    type Output = EquipmentFailureResult;

    const KIND: &'static str = "equipment.failure";

    fn calculate(&self, input: &Self::Input) -> AnalyticsResult<Self::Output> {
        self.predict(input)
    }

    fn summarize(output: &Self::Output) -> InsightSummary {
        InsightSummary {
            score: output.probability,
            risk: Some(output.risk),
            explanation: format!(
                "failure probability {:.0}%: {}",
                output.probability * 100.0,
                output.recommendation
            ),
        }
    }
}

/// Predict with the published weights.
pub fn predict_equipment_failure(
    snapshot: &EquipmentSnapshot,
) -> AnalyticsResult<EquipmentFailureResult> {
    EquipmentFailurePredictor::default().predict(snapshot)
}

fn recommendation(risk: Risk, snapshot: &EquipmentSnapshot) -> String {
    let action = match risk {
        Risk::Critical => "Schedule immediate inspection and take out of service until cleared",
        Risk::High => "Schedule maintenance within the next 7 days",
        Risk::Medium => "Plan maintenance at the next scheduled window",
        Risk::Low => "No action needed",
    };

    match snapshot.days_overdue() {
        Some(overdue) => format!(
            "{action}; last serviced {} days ago, {overdue} days past the {}-day interval",
            snapshot.days_since_last_service, snapshot.expected_service_interval_days
        ),
        None => action.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot(age_months: u32, usage_hours: f64, days: u32, interval: u32) -> EquipmentSnapshot {
        EquipmentSnapshot {
            age_months,
            usage_hours,
            maintenance_count: 4,
            days_since_last_service: days,
            expected_service_interval_days: interval,
        }
    }

    #[test]
    fn two_intervals_overdue_saturates_to_critical() {
        let r = predict_equipment_failure(&snapshot(60, 5_000.0, 180, 90)).unwrap();
        assert!((r.probability - 0.75).abs() < 1e-12);
        assert_eq!(r.risk, Risk::Critical);
        assert!(r.recommendation.starts_with("Schedule immediate inspection"));
        assert!(r.recommendation.contains("last serviced 180 days ago"));
        assert!(r.recommendation.contains("90 days past the 90-day interval"));
    }

    #[test]
    fn freshly_serviced_new_machine_is_low_risk() {
        let r = predict_equipment_failure(&snapshot(6, 200.0, 10, 90)).unwrap();
        assert!(r.probability < 0.25);
        assert_eq!(r.risk, Risk::Low);
        assert_eq!(r.recommendation, "No action needed");
    }

    #[test]
    fn age_and_usage_saturate() {
        let r = predict_equipment_failure(&snapshot(240, 50_000.0, 0, 30)).unwrap();
        assert!((r.probability - 0.5).abs() < 1e-12);
        assert_eq!(r.risk, Risk::High);
        assert_eq!(r.recommendation, "Schedule maintenance within the next 7 days");
    }

    #[test]
    fn recommendation_mentions_days_only_when_overdue() {
        let on_interval = predict_equipment_failure(&snapshot(60, 5_000.0, 90, 90)).unwrap();
        assert!(!on_interval.recommendation.contains("days ago"));

        let overdue = predict_equipment_failure(&snapshot(60, 5_000.0, 91, 90)).unwrap();
        assert!(overdue.recommendation.contains("last serviced 91 days ago"));
    }

    #[test]
    fn zero_service_interval_is_rejected() {
        let err = predict_equipment_failure(&snapshot(12, 100.0, 10, 0)).unwrap_err();
        match err {
            AnalyticsError::InvalidInput(msg) => {
                assert!(msg.contains("expected_service_interval_days"))
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn negative_usage_is_rejected() {
        assert!(predict_equipment_failure(&snapshot(12, -5.0, 10, 30)).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: probability stays in [0, 1] and more elapsed days never lower the risk.
        #[test]
        fn probability_is_bounded_and_monotonic_in_elapsed_days(
            age in 0u32..300,
            usage in 0.0f64..20_000.0,
            days in 0u32..1_000,
            extra in 0u32..365,
            interval in 1u32..400,
        ) {
            let a = predict_equipment_failure(&snapshot(age, usage, days, interval)).unwrap();
            let later = snapshot(age, usage, days + extra, interval);
            let b = predict_equipment_failure(&later).unwrap();
            prop_assert!((0.0..=1.0).contains(&a.probability));
            prop_assert!(a.probability <= b.probability);
            prop_assert!(a.risk <= b.risk);
        }
    }
}
