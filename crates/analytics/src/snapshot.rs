//! Builders that pre-aggregate stored back-office records into snapshots.
//!
//! Callers that already have aggregated numbers can construct snapshots
//! directly; these helpers cover the common row shapes (incident log,
//! inspection log, certification register, open invoices/bills, equipment
//! register with service history). All dates are evaluated against an explicit
//! `as_of` so results stay deterministic.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use buildops_core::{EquipmentId, ProjectId, guard};

use crate::cash_flow::AgingBuckets;
use crate::equipment_failure::EquipmentSnapshot;
use crate::result::AnalyticsResult;
use crate::safety_risk::SafetyMetricsSnapshot;

/// Average used when no inspections are on record.
const DEFAULT_INSPECTION_SCORE: f64 = 100.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IncidentSeverity {
    pub fn is_severe(&self) -> bool {
        *self >= IncidentSeverity::High
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub project_id: ProjectId,
    pub incident_date: NaiveDate,
    pub severity: IncidentSeverity,
    pub osha_recordable: bool,
}

impl IncidentRecord {
    /// High/critical severity, or anything OSHA-recordable.
    pub fn is_severe(&self) -> bool {
        self.severity.is_severe() || self.osha_recordable
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub inspection_date: NaiveDate,
    /// 0–100.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationRecord {
    /// `None` for certifications that do not expire.
    pub expiry_date: Option<NaiveDate>,
}

impl CertificationRecord {
    pub fn is_lapsed(&self, as_of: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d <= as_of)
    }
}

impl SafetyMetricsSnapshot {
    /// Aggregate safety logs as of a date.
    ///
    /// Records dated after `as_of` are ignored. With no incidents on record,
    /// `days_since_last_incident` is `u32::MAX`. `project_count` is the active
    /// project count; it is raised to the number of distinct projects that
    /// logged an incident when the caller passes fewer.
    pub fn from_records(
        as_of: NaiveDate,
        incidents: &[IncidentRecord],
        inspections: &[InspectionRecord],
        certifications: &[CertificationRecord],
        project_count: u32,
    ) -> AnalyticsResult<Self> {
        let incidents: Vec<&IncidentRecord> =
            incidents.iter().filter(|i| i.incident_date <= as_of).collect();

        let mut score_sum = 0.0;
        let mut score_count = 0u32;
        for inspection in inspections.iter().filter(|i| i.inspection_date <= as_of) {
            score_sum += guard::within("inspection.score", inspection.score, 0.0, 100.0)?;
            score_count += 1;
        }
        let avg_inspection_score = if score_count > 0 {
            score_sum / f64::from(score_count)
        } else {
            DEFAULT_INSPECTION_SCORE
        };

        let incident_projects: HashSet<ProjectId> =
            incidents.iter().map(|i| i.project_id).collect();
        let project_count = project_count.max(count(incident_projects.len()));

        let days_since_last_incident = incidents
            .iter()
            .map(|i| i.incident_date)
            .max()
            .map(|last| days_between(last, as_of))
            .unwrap_or(u32::MAX);

        Ok(Self {
            incident_count: count(incidents.len()),
            severe_incident_count: count(incidents.iter().filter(|i| i.is_severe()).count()),
            avg_inspection_score,
            cert_gap_count: count(certifications.iter().filter(|c| c.is_lapsed(as_of)).count()),
            days_since_last_incident,
            project_count,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenItemStatus {
    Pending,
    Approved,
    Paid,
    Void,
}

/// An unpaid invoice (receivable) or bill (payable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenItem {
    pub due_date: NaiveDate,
    pub amount: f64,
    pub status: OpenItemStatus,
}

impl AgingBuckets {
    /// Bucket open items by days past due as of a date.
    ///
    /// Not yet due → current, 1–30 → `days30`, 31–60 → `days60`, anything
    /// older → `days90_plus`. Paid and void items are skipped.
    pub fn from_open_items(as_of: NaiveDate, items: &[OpenItem]) -> AnalyticsResult<Self> {
        let mut buckets = AgingBuckets::default();
        for item in items {
            if matches!(item.status, OpenItemStatus::Paid | OpenItemStatus::Void) {
                continue;
            }
            let amount = guard::non_negative("open_item.amount", item.amount)?;
            let past_due = (as_of - item.due_date).num_days();
            match past_due {
                i64::MIN..=0 => buckets.current += amount,
                1..=30 => buckets.days30 += amount,
                31..=60 => buckets.days60 += amount,
                _ => buckets.days90_plus += amount,
            }
        }
        Ok(buckets)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub equipment_id: EquipmentId,
    pub purchase_date: NaiveDate,
    pub usage_hours: f64,
    pub service_interval_days: u32,
}

impl EquipmentSnapshot {
    /// Build from the equipment register row and its service dates.
    ///
    /// Never-serviced equipment counts elapsed time from the purchase date.
    pub fn from_record(
        as_of: NaiveDate,
        record: &EquipmentRecord,
        service_dates: &[NaiveDate],
    ) -> AnalyticsResult<Self> {
        let past_services: Vec<NaiveDate> =
            service_dates.iter().copied().filter(|d| *d <= as_of).collect();
        let last_service = past_services
            .iter()
            .copied()
            .max()
            .unwrap_or(record.purchase_date);

        let snapshot = Self {
            age_months: whole_months_between(record.purchase_date, as_of),
            usage_hours: record.usage_hours,
            maintenance_count: count(past_services.len()),
            days_since_last_service: days_between(last_service, as_of),
            expected_service_interval_days: record.service_interval_days,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

fn days_between(from: NaiveDate, to: NaiveDate) -> u32 {
    u32::try_from((to - from).num_days().max(0)).unwrap_or(u32::MAX)
}

/// Completed calendar months from `from` to `to` (0 if `to` precedes `from`).
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    let mut months =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    u32::try_from(months.max(0)).unwrap_or(0)
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
