//! Tunable model constants.
//!
//! Every weight, ceiling, rate and threshold used by the calculators lives here.
//! `Default` reproduces the published values; a JSON document can override any
//! subset of them (missing fields keep their defaults).

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use buildops_core::{DomainResult, guard};

use crate::result::{AnalyticsError, AnalyticsResult};
use crate::risk::{BandEdge, RiskThresholds};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub budget: BudgetOverrunConfig,
    pub safety: SafetyRiskConfig,
    pub equipment: EquipmentFailureConfig,
    pub cash_flow: CashFlowConfig,
}

impl AnalyticsConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> AnalyticsResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file from disk.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading analytics config {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("parsing analytics config {}", path.display()))
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        self.budget.validate()?;
        self.safety.validate()?;
        self.equipment.validate()?;
        self.cash_flow.validate()?;
        Ok(())
    }
}

/// Variance-percentage bands for the budget overrun predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetOverrunConfig {
    pub thresholds: RiskThresholds,
}

impl Default for BudgetOverrunConfig {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::new(0.0, 10.0, 25.0, BandEdge::UpperInclusive),
        }
    }
}

impl BudgetOverrunConfig {
    pub fn validate(&self) -> AnalyticsResult<()> {
        self.thresholds.validate("budget.thresholds")
    }
}

/// Factor weights and normalization constants for safety scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyRiskConfig {
    pub frequency_weight: f64,
    pub severity_weight: f64,
    pub inspection_weight: f64,
    pub certification_weight: f64,
    pub recency_weight: f64,

    /// Points per incident per active project.
    pub points_per_incident_rate: f64,
    pub points_per_severe_incident: f64,
    pub points_per_cert_gap: f64,

    /// Incidents more recent than this many days score the full recency factor.
    pub recent_incident_days: u32,
    /// Incidents more recent than this (but not `recent_incident_days`) score half.
    pub elevated_incident_days: u32,

    pub thresholds: RiskThresholds,
}

impl Default for SafetyRiskConfig {
    fn default() -> Self {
        Self {
            frequency_weight: 0.30,
            severity_weight: 0.25,
            inspection_weight: 0.20,
            certification_weight: 0.15,
            recency_weight: 0.10,
            points_per_incident_rate: 20.0,
            points_per_severe_incident: 25.0,
            points_per_cert_gap: 15.0,
            recent_incident_days: 30,
            elevated_incident_days: 90,
            thresholds: RiskThresholds::new(25.0, 50.0, 75.0, BandEdge::LowerInclusive),
        }
    }
}

impl SafetyRiskConfig {
    pub fn weights(&self) -> [f64; 5] {
        [
            self.frequency_weight,
            self.severity_weight,
            self.inspection_weight,
            self.certification_weight,
            self.recency_weight,
        ]
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        validate_weights("safety", &self.weights())?;
        for (name, v) in [
            ("points_per_incident_rate", self.points_per_incident_rate),
            ("points_per_severe_incident", self.points_per_severe_incident),
            ("points_per_cert_gap", self.points_per_cert_gap),
        ] {
            config_guard(guard::positive(&format!("safety.{name}"), v))?;
        }
        if self.recent_incident_days >= self.elevated_incident_days {
            return Err(AnalyticsError::invalid_config(
                "safety.recent_incident_days must be < elevated_incident_days",
            ));
        }
        self.thresholds.validate("safety.thresholds")
    }
}

/// Weights and saturation points for the equipment failure model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentFailureConfig {
    pub age_weight: f64,
    pub usage_weight: f64,
    pub overdue_weight: f64,

    /// Age at which the age factor saturates.
    pub age_ceiling_months: f64,
    /// Usage at which the usage factor saturates.
    pub usage_ceiling_hours: f64,
    /// Overdue ratio (elapsed / interval) at which the overdue factor saturates.
    pub overdue_ceiling_ratio: f64,

    pub thresholds: RiskThresholds,
}

impl Default for EquipmentFailureConfig {
    fn default() -> Self {
        Self {
            age_weight: 0.3,
            usage_weight: 0.2,
            overdue_weight: 0.5,
            age_ceiling_months: 120.0,
            usage_ceiling_hours: 10_000.0,
            overdue_ceiling_ratio: 2.0,
            thresholds: RiskThresholds::new(0.25, 0.5, 0.75, BandEdge::LowerInclusive),
        }
    }
}

impl EquipmentFailureConfig {
    pub fn validate(&self) -> AnalyticsResult<()> {
        validate_weights(
            "equipment",
            &[self.age_weight, self.usage_weight, self.overdue_weight],
        )?;
        for (name, v) in [
            ("age_ceiling_months", self.age_ceiling_months),
            ("usage_ceiling_hours", self.usage_ceiling_hours),
            ("overdue_ceiling_ratio", self.overdue_ceiling_ratio),
        ] {
            config_guard(guard::positive(&format!("equipment.{name}"), v))?;
        }
        self.thresholds.validate("equipment.thresholds")
    }
}

/// Per-bucket rates, ordered current, 1–30, 31–60, 90+.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowConfig {
    pub ar_collection_rates: [f64; 4],
    pub ap_payment_rates: [f64; 4],
}

impl Default for CashFlowConfig {
    fn default() -> Self {
        Self {
            ar_collection_rates: [0.95, 0.85, 0.70, 0.50],
            ap_payment_rates: [1.00, 0.95, 0.90, 0.80],
        }
    }
}

impl CashFlowConfig {
    pub fn validate(&self) -> AnalyticsResult<()> {
        for (name, rates) in [
            ("ar_collection_rates", &self.ar_collection_rates),
            ("ap_payment_rates", &self.ap_payment_rates),
        ] {
            for (i, rate) in rates.iter().enumerate() {
                config_guard(guard::fraction(&format!("cash_flow.{name}[{i}]"), *rate))?;
            }
        }
        Ok(())
    }
}

/// Field guards fail as `InvalidInput`; a bad tunable is a config error instead.
fn config_guard(checked: DomainResult<f64>) -> AnalyticsResult<f64> {
    checked.map_err(|e| AnalyticsError::invalid_config(e.to_string()))
}

fn validate_weights(name: &str, weights: &[f64]) -> AnalyticsResult<()> {
    if weights.iter().any(|w| !(w.is_finite() && *w >= 0.0)) {
        return Err(AnalyticsError::invalid_config(format!(
            "{name}: weights must be finite and non-negative"
        )));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(AnalyticsError::invalid_config(format!(
            "{name}: weights must sum to 1 (got {sum})"
        )));
    }
    Ok(())
}
