//! `buildops-analytics`
//!
//! **Responsibility:** predictive analytics and risk scoring for the back office.
//!
//! Every calculator here is a pure function over a caller-supplied snapshot:
//! - It must not perform IO or hold mutable state.
//! - It must not mutate its input.
//! - Identical inputs always produce identical outputs.
//!
//! Snapshots are assembled by callers (see [`snapshot`] for builders over stored
//! records). Results can be used directly or wrapped as tenant-scoped
//! [`Insight`]s through [`InsightJob`] and a [`Scheduler`].

pub mod budget_overrun;
pub mod cash_flow;
pub mod config;
pub mod earned_value;
pub mod equipment_failure;
pub mod job;
pub mod result;
pub mod risk;
pub mod safety_risk;
pub mod scheduler;
pub mod snapshot;

pub use budget_overrun::{
    BudgetOverrunPredictor, BudgetOverrunResult, ProjectBudgetSnapshot, predict_budget_overrun,
};
pub use cash_flow::{
    AgingBuckets, CashFlowForecast, CashFlowForecastInput, CashFlowForecaster, CashFlowPeriod,
    forecast_cash_flow,
};
pub use config::AnalyticsConfig;
pub use earned_value::{
    BudgetLineSnapshot, EarnedValuePerformanceCalculator, EarnedValueResult, PerformanceStatus,
    calculate_earned_value,
};
pub use equipment_failure::{
    EquipmentFailurePredictor, EquipmentFailureResult, EquipmentSnapshot, predict_equipment_failure,
};
pub use job::{Calculator, InsightJob, InsightSummary, Job};
pub use result::{AnalyticsError, AnalyticsResult, Insight};
pub use risk::{BandEdge, RISK_COLORS, Risk, RiskColor, RiskThresholds};
pub use safety_risk::{
    SafetyFactor, SafetyMetricsSnapshot, SafetyRiskResult, SafetyRiskScorer, score_safety_risk,
};
pub use scheduler::{LocalScheduler, Scheduler, TenantScope};
