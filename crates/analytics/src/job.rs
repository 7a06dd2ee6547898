use serde::Serialize;

use buildops_core::TenantId;

use crate::result::{AnalyticsResult, Insight};
use crate::risk::Risk;

/// A pure analytics calculation over one snapshot type.
///
/// Implementations hold only immutable model constants; `calculate` must not
/// perform IO or mutate anything.
pub trait Calculator: Send + Sync + 'static {
    type Input: Send + Sync + 'static;
    type Output: Serialize;

    /// Stable identifier used as the insight `kind`.
    const KIND: &'static str;

    fn calculate(&self, input: &Self::Input) -> AnalyticsResult<Self::Output>;

    /// Headline numbers for dashboards and logs.
    fn summarize(output: &Self::Output) -> InsightSummary;
}

/// Headline view of a calculator result.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightSummary {
    pub score: f64,
    pub risk: Option<Risk>,
    pub explanation: String,
}

/// A tenant-scoped unit of analytics work.
///
/// Inputs are provided by callers (page loaders, workers); jobs never read a
/// store themselves.
pub trait Job: Send + Sync + 'static {
    type Input: Send + Sync + 'static;

    fn kind(&self) -> &'static str;

    /// The tenant this job belongs to (tenant-safe execution model).
    fn tenant_id(&self) -> TenantId;

    /// The snapshot the job will run on.
    fn input(&self) -> &Self::Input;

    /// Run the calculation and package it as an insight.
    fn run(&self) -> AnalyticsResult<Insight>;
}

/// Binds a calculator to a tenant and a snapshot.
#[derive(Debug, Clone)]
pub struct InsightJob<C: Calculator> {
    tenant_id: TenantId,
    calculator: C,
    input: C::Input,
}

impl<C: Calculator> InsightJob<C> {
    pub fn new(tenant_id: TenantId, calculator: C, input: C::Input) -> Self {
        Self {
            tenant_id,
            calculator,
            input,
        }
    }
}

impl<C: Calculator + Default> InsightJob<C> {
    /// Job using the calculator's published constants.
    pub fn with_defaults(tenant_id: TenantId, input: C::Input) -> Self {
        Self::new(tenant_id, C::default(), input)
    }
}

impl<C: Calculator> Job for InsightJob<C> {
    type Input = C::Input;

    fn kind(&self) -> &'static str {
        C::KIND
    }

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn run(&self) -> AnalyticsResult<Insight> {
        let output = self.calculator.calculate(&self.input)?;
        let summary = C::summarize(&output);

        Ok(Insight::new(self.tenant_id, C::KIND, summary.score)
            .with_risk(summary.risk)
            .with_explanation(summary.explanation)
            .with_metadata(serde_json::to_value(&output)?))
    }
}
