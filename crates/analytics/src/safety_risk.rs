//! Composite safety risk score.
//!
//! Five signals are normalized to 0–100, weighted, summed and rounded:
//! incident frequency, severity, inspection shortfall, certification gaps and
//! recency of the last incident. Higher is riskier.

use serde::{Deserialize, Serialize};

use buildops_core::{ValueObject, guard};

use crate::config::SafetyRiskConfig;
use crate::job::{Calculator, InsightSummary};
use crate::result::AnalyticsResult;
use crate::risk::Risk;

const MAX_FACTOR: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyMetricsSnapshot {
    pub incident_count: u32,
    pub severe_incident_count: u32,
    /// Average inspection score, 0–100.
    pub avg_inspection_score: f64,
    pub cert_gap_count: u32,
    pub days_since_last_incident: u32,
    /// Active projects the incidents are spread across.
    pub project_count: u32,
}

impl ValueObject for SafetyMetricsSnapshot {}

impl SafetyMetricsSnapshot {
    pub fn validate(&self) -> AnalyticsResult<()> {
        guard::within("avg_inspection_score", self.avg_inspection_score, 0.0, 100.0)?;
        Ok(())
    }
}

/// One contributing signal, normalized to 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyFactor {
    pub name: String,
    pub value: f64,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyRiskResult {
    pub score: u8,
    pub level: Risk,
    /// Ordered: frequency, severity, inspections, certifications, recency.
    pub factors: Vec<SafetyFactor>,
}

impl ValueObject for SafetyRiskResult {}

#[derive(Debug, Clone, Default)]
pub struct SafetyRiskScorer {
    config: SafetyRiskConfig,
}

impl SafetyRiskScorer {
    pub fn new(config: SafetyRiskConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, snapshot: &SafetyMetricsSnapshot) -> AnalyticsResult<SafetyRiskResult> {
        snapshot.validate()?;
        let cfg = &self.config;

        let projects = snapshot.project_count.max(1);
        let frequency = (f64::from(snapshot.incident_count) / f64::from(projects)
            * cfg.points_per_incident_rate)
            .min(MAX_FACTOR);
        let severity = (f64::from(snapshot.severe_incident_count)
            * cfg.points_per_severe_incident)
            .min(MAX_FACTOR);
        let inspections = (MAX_FACTOR - snapshot.avg_inspection_score).max(0.0);
        let certifications =
            (f64::from(snapshot.cert_gap_count) * cfg.points_per_cert_gap).min(MAX_FACTOR);
        let recency = if snapshot.days_since_last_incident < cfg.recent_incident_days {
            MAX_FACTOR
        } else if snapshot.days_since_last_incident < cfg.elevated_incident_days {
            MAX_FACTOR / 2.0
        } else {
            0.0
        };

        let factors = vec![
            SafetyFactor {
                name: "Incident Frequency".to_string(),
                value: frequency,
                impact: format!(
                    "{} across {}",
                    plural(snapshot.incident_count, "incident"),
                    plural(snapshot.project_count, "active project"),
                ),
            },
            SafetyFactor {
                name: "Incident Severity".to_string(),
                value: severity,
                impact: plural(snapshot.severe_incident_count, "severe incident"),
            },
            SafetyFactor {
                name: "Inspection Scores".to_string(),
                value: inspections,
                impact: format!(
                    "average inspection score {:.0}/100",
                    snapshot.avg_inspection_score
                ),
            },
            SafetyFactor {
                name: "Certification Gaps".to_string(),
                value: certifications,
                impact: format!(
                    "{} expired or missing",
                    plural(snapshot.cert_gap_count, "certification")
                ),
            },
            SafetyFactor {
                name: "Incident Recency".to_string(),
                value: recency,
                impact: recency_impact(snapshot),
            },
        ];

        let weighted: f64 = factors
            .iter()
            .zip(cfg.weights())
            .map(|(f, w)| f.value * w)
            .sum();
        let score = weighted.round().clamp(0.0, MAX_FACTOR) as u8;

        Ok(SafetyRiskResult {
            score,
            level: cfg.thresholds.classify(f64::from(score)),
            factors,
        })
    }
}

impl Calculator for SafetyRiskScorer {
    type Input = SafetyMetricsSnapshot;
    type Output = SafetyRiskResult;

    const KIND: &'static str = "safety.risk";

    fn calculate(&self, input: &Self::Input) -> AnalyticsResult<Self::Output> {
        self.score(input)
    }

    fn summarize(output: &Self::Output) -> InsightSummary {
        // Lead with the heaviest contributor.
        let top = output
            .factors
            .iter()
            .max_by(|a, b| a.value.total_cmp(&b.value))
            .filter(|f| f.value > 0.0);
        let explanation = match top {
            Some(f) => format!(
                "safety risk {}/100; top factor: {} ({})",
                output.score, f.name, f.impact
            ),
            None => format!("safety risk {}/100; no contributing factors", output.score),
        };
        InsightSummary {
            score: f64::from(output.score),
            risk: Some(output.level),
            explanation,
        }
    }
}

/// Score with the published weights.
pub fn score_safety_risk(snapshot: &SafetyMetricsSnapshot) -> AnalyticsResult<SafetyRiskResult> {
    SafetyRiskScorer::default().score(snapshot)
}

fn recency_impact(snapshot: &SafetyMetricsSnapshot) -> String {
    if snapshot.incident_count == 0 {
        "no incidents on record".to_string()
    } else {
        let days = plural(snapshot.days_since_last_incident, "day");
        format!("{days} since last incident")
    }
}

fn plural(n: u32, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
