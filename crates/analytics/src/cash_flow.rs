//! 30/60/90-day cash projection from receivable/payable aging.
//!
//! Expected collections and payments are computed once over the whole aging
//! snapshot (bucket amount × published rate) and recognized in equal thirds,
//! one per 30-day period. Each period also pays one month of burn.

use serde::{Deserialize, Serialize};

use buildops_core::{ValueObject, guard};

use crate::config::CashFlowConfig;
use crate::job::{Calculator, InsightSummary};
use crate::result::AnalyticsResult;
use crate::risk::Risk;

pub const FORECAST_PERIODS: usize = 3;

const PERIOD_LABELS: [&str; FORECAST_PERIODS] = ["30 Days", "60 Days", "90 Days"];

/// Outstanding amounts grouped by how far past due they are.
///
/// Buckets are mutually exclusive: each invoice/bill sits in exactly one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgingBuckets {
    pub current: f64,
    pub days30: f64,
    pub days60: f64,
    pub days90_plus: f64,
}

impl ValueObject for AgingBuckets {}

impl AgingBuckets {
    /// Buckets ordered current, 1–30, 31–60, 90+ (matches the rate tables).
    pub fn as_array(&self) -> [f64; 4] {
        [self.current, self.days30, self.days60, self.days90_plus]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Σ bucket × rate.
    pub fn weighted(&self, rates: &[f64; 4]) -> f64 {
        self.as_array()
            .iter()
            .zip(rates)
            .map(|(amount, rate)| amount * rate)
            .sum()
    }

    pub fn validate(&self, side: &str) -> AnalyticsResult<()> {
        guard::non_negative(&format!("{side}.current"), self.current)?;
        guard::non_negative(&format!("{side}.days30"), self.days30)?;
        guard::non_negative(&format!("{side}.days60"), self.days60)?;
        guard::non_negative(&format!("{side}.days90_plus"), self.days90_plus)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowForecastInput {
    pub current_cash: f64,
    pub ar_aging: AgingBuckets,
    pub ap_aging: AgingBuckets,
    pub monthly_burn_rate: f64,
}

impl ValueObject for CashFlowForecastInput {}

impl CashFlowForecastInput {
    pub fn validate(&self) -> AnalyticsResult<()> {
        // Current cash may legitimately be overdrawn.
        guard::finite("current_cash", self.current_cash)?;
        self.ar_aging.validate("ar_aging")?;
        self.ap_aging.validate("ap_aging")?;
        guard::non_negative("monthly_burn_rate", self.monthly_burn_rate)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPeriod {
    pub period: String,
    pub expected_collections: f64,
    pub expected_payments: f64,
    /// Cumulative balance at period end. Negative means a projected shortfall.
    pub projected_cash: f64,
}

impl ValueObject for CashFlowPeriod {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowForecast {
    pub total_expected_collections: f64,
    pub total_expected_payments: f64,
    pub periods: [CashFlowPeriod; FORECAST_PERIODS],
}

impl ValueObject for CashFlowForecast {}

impl CashFlowForecast {
    pub fn periods(&self) -> &[CashFlowPeriod] {
        &self.periods
    }

    pub fn ending_cash(&self) -> f64 {
        self.periods[FORECAST_PERIODS - 1].projected_cash
    }

    /// First period whose projected balance drops below zero.
    pub fn first_shortfall(&self) -> Option<&CashFlowPeriod> {
        self.periods.iter().find(|p| p.projected_cash < 0.0)
    }

    /// Shortfall timing as a risk level: sooner is worse.
    pub fn shortfall_risk(&self) -> Risk {
        match self.periods.iter().position(|p| p.projected_cash < 0.0) {
            Some(0) => Risk::Critical,
            Some(1) => Risk::High,
            Some(_) => Risk::Medium,
            None => Risk::Low,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CashFlowForecaster {
    config: CashFlowConfig,
}

impl CashFlowForecaster {
    pub fn new(config: CashFlowConfig) -> Self {
        Self { config }
    }

    pub fn forecast(&self, input: &CashFlowForecastInput) -> AnalyticsResult<CashFlowForecast> {
        input.validate()?;

        let total_expected_collections = input.ar_aging.weighted(&self.config.ar_collection_rates);
        let total_expected_payments = input.ap_aging.weighted(&self.config.ap_payment_rates);

        let share = FORECAST_PERIODS as f64;
        let expected_collections = total_expected_collections / share;
        let expected_payments = total_expected_payments / share;

        let mut cash = input.current_cash;
        let periods = PERIOD_LABELS.map(|label| {
            cash += expected_collections - expected_payments - input.monthly_burn_rate;
            CashFlowPeriod {
                period: label.to_string(),
                expected_collections,
                expected_payments,
                projected_cash: cash,
            }
        });
        // Running balances near f64::MAX overflow instead of saturating.
        for p in &periods {
            guard::finite(&format!("projected_cash[{}]", p.period), p.projected_cash)?;
        }

        Ok(CashFlowForecast {
            total_expected_collections,
            total_expected_payments,
            periods,
        })
    }
}

impl Calculator for CashFlowForecaster {
    type Input = CashFlowForecastInput;
    type Output = CashFlowForecast;

    const KIND: &'static str = "cash_flow.forecast";

    fn calculate(&self, input: &Self::Input) -> AnalyticsResult<Self::Output> {
        self.forecast(input)
    }

    fn summarize(output: &Self::Output) -> InsightSummary {
        let explanation = match output.first_shortfall() {
            Some(p) => format!(
                "projected shortfall within {}: {:.2}",
                p.period, p.projected_cash
            ),
            None => format!("projected cash at 90 days: {:.2}", output.ending_cash()),
        };
        InsightSummary {
            score: output.ending_cash(),
            risk: Some(output.shortfall_risk()),
            explanation,
        }
    }
}

/// Forecast with the published collection/payment rates.
pub fn forecast_cash_flow(input: &CashFlowForecastInput) -> AnalyticsResult<CashFlowForecast> {
    CashFlowForecaster::default().forecast(input)
}
