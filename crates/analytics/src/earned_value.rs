use serde::{Deserialize, Serialize};

use buildops_core::{ValueObject, guard};

use crate::job::{Calculator, InsightSummary};
use crate::result::AnalyticsResult;

/// One budget line's planned and actual spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLineSnapshot {
    pub budgeted_amount: f64,
    pub actual_amount: f64,
}

impl ValueObject for BudgetLineSnapshot {}

impl BudgetLineSnapshot {
    pub fn validate(&self, index: usize) -> AnalyticsResult<()> {
        guard::non_negative(&format!("lines[{index}].budgeted_amount"), self.budgeted_amount)?;
        guard::non_negative(&format!("lines[{index}].actual_amount"), self.actual_amount)?;
        Ok(())
    }
}

/// Cost/schedule position derived from CPI and SPI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceStatus {
    OnTrack,
    OverBudget,
    BehindSchedule,
    OverBudgetAndBehind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedValueResult {
    /// Budgeted cost of work performed (earned value).
    pub bcwp: f64,
    /// Budgeted cost of work scheduled (planned value).
    pub bcws: f64,
    /// Actual cost of work performed.
    pub acwp: f64,
    /// `bcwp / acwp`, 0 when nothing has been spent.
    pub cpi: f64,
    /// `bcwp / bcws`, 0 when nothing is budgeted.
    pub spi: f64,
}

impl ValueObject for EarnedValueResult {}

impl EarnedValueResult {
    pub fn cost_variance(&self) -> f64 {
        self.bcwp - self.acwp
    }

    pub fn schedule_variance(&self) -> f64 {
        self.bcwp - self.bcws
    }

    /// `bcws / cpi`; falls back to `bcws` while CPI is undefined.
    pub fn estimate_at_completion(&self) -> f64 {
        if self.cpi > 0.0 {
            self.bcws / self.cpi
        } else {
            self.bcws
        }
    }

    /// Indices of exactly 0 mean "undefined" and are not treated as slippage.
    pub fn status(&self) -> PerformanceStatus {
        let over_budget = self.cpi > 0.0 && self.cpi < 1.0;
        let behind = self.spi > 0.0 && self.spi < 1.0;
        match (over_budget, behind) {
            (false, false) => PerformanceStatus::OnTrack,
            (true, false) => PerformanceStatus::OverBudget,
            (false, true) => PerformanceStatus::BehindSchedule,
            (true, true) => PerformanceStatus::OverBudgetAndBehind,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EarnedValuePerformanceCalculator;

impl EarnedValuePerformanceCalculator {
    pub fn calculate(&self, lines: &[BudgetLineSnapshot]) -> AnalyticsResult<EarnedValueResult> {
        for (i, line) in lines.iter().enumerate() {
            line.validate(i)?;
        }

        let bcws: f64 = lines.iter().map(|l| l.budgeted_amount).sum();
        let acwp: f64 = lines.iter().map(|l| l.actual_amount).sum();
        // Earned credit per line is capped at its budget; zero-budget lines earn nothing.
        let bcwp: f64 = lines
            .iter()
            .filter(|l| l.budgeted_amount > 0.0)
            .map(|l| l.budgeted_amount * (l.actual_amount / l.budgeted_amount).min(1.0))
            .sum();

        let cpi = if acwp > 0.0 { bcwp / acwp } else { 0.0 };
        let spi = if bcws > 0.0 { bcwp / bcws } else { 0.0 };

        Ok(EarnedValueResult {
            bcwp,
            bcws,
            acwp,
            cpi,
            spi,
        })
    }
}

impl Calculator for EarnedValuePerformanceCalculator {
    type Input = Vec<BudgetLineSnapshot>;
    type Output = EarnedValueResult;

    const KIND: &'static str = "earned_value.performance";

    fn calculate(&self, input: &Self::Input) -> AnalyticsResult<Self::Output> {
        EarnedValuePerformanceCalculator::calculate(self, input)
    }

    fn summarize(output: &Self::Output) -> InsightSummary {
        InsightSummary {
            score: output.cpi,
            risk: None,
            explanation: format!(
                "CPI {:.2}, SPI {:.2} ({:?})",
                output.cpi,
                output.spi,
                output.status()
            ),
        }
    }
}

pub fn calculate_earned_value(lines: &[BudgetLineSnapshot]) -> AnalyticsResult<EarnedValueResult> {
    EarnedValuePerformanceCalculator.calculate(lines)
}
