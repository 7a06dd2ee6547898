use serde::{Deserialize, Serialize};

use buildops_core::{ValueObject, guard};

use crate::config::BudgetOverrunConfig;
use crate::job::{Calculator, InsightSummary};
use crate::result::AnalyticsResult;
use crate::risk::Risk;

/// Budget position of a single project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectBudgetSnapshot {
    /// Contract amount or estimate.
    pub budget: f64,
    pub actual_cost: f64,
    /// Fraction complete, in `[0, 1]`.
    pub completion_pct: f64,
}

impl ValueObject for ProjectBudgetSnapshot {}

impl ProjectBudgetSnapshot {
    pub fn validate(&self) -> AnalyticsResult<()> {
        guard::non_negative("budget", self.budget)?;
        guard::non_negative("actual_cost", self.actual_cost)?;
        guard::fraction("completion_pct", self.completion_pct)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOverrunResult {
    pub predicted_final_cost: f64,
    /// `predicted_final_cost - budget`; positive means overrun.
    pub variance: f64,
    pub variance_pct: f64,
    pub risk: Risk,
}

impl ValueObject for BudgetOverrunResult {}

/// Straight-line extrapolation of spend to 100% completion.
#[derive(Debug, Clone, Default)]
pub struct BudgetOverrunPredictor {
    config: BudgetOverrunConfig,
}

impl BudgetOverrunPredictor {
    pub fn new(config: BudgetOverrunConfig) -> Self {
        Self { config }
    }

    pub fn predict(
        &self,
        snapshot: &ProjectBudgetSnapshot,
    ) -> AnalyticsResult<BudgetOverrunResult> {
        snapshot.validate()?;

        // No recorded progress: assume the project lands on budget.
        let predicted_final_cost = if snapshot.completion_pct > 0.0 {
            snapshot.actual_cost / snapshot.completion_pct
        } else {
            snapshot.budget
        };
        // Tiny completion fractions can push the extrapolation past f64::MAX.
        let predicted_final_cost = guard::finite("predicted_final_cost", predicted_final_cost)?;

        let variance = predicted_final_cost - snapshot.budget;
        // Zero budget has no meaningful percentage; report 0 (low).
        let variance_pct = if snapshot.budget > 0.0 {
            variance / snapshot.budget * 100.0
        } else {
            0.0
        };
        let variance_pct = guard::finite("variance_pct", variance_pct)?;

        Ok(BudgetOverrunResult {
            predicted_final_cost,
            variance,
            variance_pct,
            risk: self.config.thresholds.classify(variance_pct),
        })
    }
}

impl Calculator for BudgetOverrunPredictor {
    type Input = ProjectBudgetSnapshot;
    type Output = BudgetOverrunResult;

    const KIND: &'static str = "budget.overrun";

    fn calculate(&self, input: &Self::Input) -> AnalyticsResult<Self::Output> {
        self.predict(input)
    }

    fn summarize(output: &Self::Output) -> InsightSummary {
        InsightSummary {
            score: output.variance_pct,
            risk: Some(output.risk),
            explanation: format!(
                "projected final cost {:.2} ({:+.1}% vs budget)",
                output.predicted_final_cost, output.variance_pct
            ),
        }
    }
}

/// Predict with the published thresholds.
pub fn predict_budget_overrun(
    snapshot: &ProjectBudgetSnapshot,
) -> AnalyticsResult<BudgetOverrunResult> {
    BudgetOverrunPredictor::default().predict(snapshot)
}
