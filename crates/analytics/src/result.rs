use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use buildops_core::{DomainError, TenantId};

use crate::risk::Risk;

/// Result type returned by every calculator and job.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// A tenant-scoped analytics insight.
///
/// This is a read-only output for dashboards. It never changes stored records;
/// higher layers decide whether to persist or render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub tenant_id: TenantId,

    /// Calculator that produced the insight (e.g. `"budget.overrun"`).
    pub kind: String,

    /// Headline continuous value (calculator-specific meaning).
    pub score: f64,

    /// Discrete level, when the calculator buckets its score.
    pub risk: Option<Risk>,

    pub explanation: Option<String>,

    /// Full calculator result, serialized.
    pub metadata: JsonValue,
}

impl Insight {
    pub fn new(tenant_id: TenantId, kind: impl Into<String>, score: f64) -> Self {
        Self {
            tenant_id,
            kind: kind.into(),
            score,
            risk: None,
            explanation: None,
            metadata: JsonValue::Null,
        }
    }

    pub fn with_risk(mut self, risk: Option<Risk>) -> Self {
        self.risk = risk;
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = metadata;
        self
    }
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The caller handed in a snapshot that violates a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("tenant scope violation: {0}")]
    TenantScope(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalyticsError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<DomainError> for AnalyticsError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::InvalidInput(msg),
            DomainError::InvalidId(msg) => Self::InvalidInput(format!("invalid identifier: {msg}")),
        }
    }
}
