//! Dashboard scenarios exercised through the public API only.

use buildops_analytics::{
    AgingBuckets, AnalyticsConfig, AnalyticsError, BudgetLineSnapshot, BudgetOverrunPredictor,
    CashFlowForecastInput, CashFlowForecaster, EquipmentFailurePredictor, EquipmentSnapshot,
    InsightJob, Job, LocalScheduler, PerformanceStatus, ProjectBudgetSnapshot, Risk, RiskColor,
    SafetyMetricsSnapshot, SafetyRiskScorer, Scheduler, TenantScope, calculate_earned_value,
    forecast_cash_flow, predict_budget_overrun, predict_equipment_failure, score_safety_risk,
};
use buildops_core::TenantId;

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn budget_overrun_scenario() {
    let r = predict_budget_overrun(&ProjectBudgetSnapshot {
        budget: 1_000_000.0,
        actual_cost: 600_000.0,
        completion_pct: 0.5,
    })
    .unwrap();

    assert_eq!(r.predicted_final_cost, 1_200_000.0);
    assert_eq!(r.variance, 200_000.0);
    assert!(approx(r.variance_pct, 20.0, 1e-9));
    assert_eq!(r.risk, Risk::High);
    assert_eq!(r.risk.color(), RiskColor::Red);
}

#[test]
fn safety_all_clear_scenario() {
    let r = score_safety_risk(&SafetyMetricsSnapshot {
        incident_count: 0,
        severe_incident_count: 0,
        avg_inspection_score: 100.0,
        cert_gap_count: 0,
        days_since_last_incident: 120,
        project_count: 5,
    })
    .unwrap();

    assert_eq!(r.score, 0);
    assert_eq!(r.level, Risk::Low);
    assert_eq!(r.factors.len(), 5);
    assert_eq!(r.factors[0].impact, "0 incidents across 5 active projects");
}

#[test]
fn equipment_failure_scenario() {
    let r = predict_equipment_failure(&EquipmentSnapshot {
        age_months: 60,
        usage_hours: 5_000.0,
        maintenance_count: 2,
        days_since_last_service: 180,
        expected_service_interval_days: 90,
    })
    .unwrap();

    assert!(approx(r.probability, 0.75, 1e-12));
    assert_eq!(r.risk, Risk::Critical);
    assert_eq!(r.risk.color(), RiskColor::DarkRed);
}

#[test]
fn cash_flow_scenario() {
    let f = forecast_cash_flow(&CashFlowForecastInput {
        current_cash: 5_000.0,
        ar_aging: AgingBuckets {
            current: 10_000.0,
            ..AgingBuckets::default()
        },
        ap_aging: AgingBuckets::default(),
        monthly_burn_rate: 0.0,
    })
    .unwrap();

    assert!(approx(f.total_expected_collections, 9_500.0, 1e-9));
    assert_eq!(f.periods().len(), 3);
    assert!(approx(f.periods[0].expected_collections, 3_166.67, 0.005));
    assert!(approx(f.periods[0].projected_cash, 8_166.67, 0.005));
}

#[test]
fn earned_value_scenario() {
    let r = calculate_earned_value(&[
        BudgetLineSnapshot {
            budgeted_amount: 100.0,
            actual_amount: 50.0,
        },
        BudgetLineSnapshot {
            budgeted_amount: 200.0,
            actual_amount: 300.0,
        },
    ])
    .unwrap();

    assert_eq!(r.bcwp, 250.0);
    assert_eq!(r.bcws, 300.0);
    assert_eq!(r.acwp, 350.0);
    assert!(approx(r.cpi, 0.714, 0.001));
    assert!(approx(r.spi, 0.833, 0.001));
    assert_eq!(r.status(), PerformanceStatus::OverBudgetAndBehind);
}

#[test]
fn calculators_are_shareable_across_threads() {
    let predictor = std::sync::Arc::new(EquipmentFailurePredictor::default());
    let snapshot = EquipmentSnapshot {
        age_months: 30,
        usage_hours: 2_500.0,
        maintenance_count: 1,
        days_since_last_service: 45,
        expected_service_interval_days: 60,
    };
    let expected = predictor.predict(&snapshot).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let predictor = predictor.clone();
            let snapshot = snapshot.clone();
            std::thread::spawn(move || predictor.predict(&snapshot).unwrap())
        })
        .collect();

    for h in handles {
        let r = h.join().unwrap();
        assert_eq!(r.probability.to_bits(), expected.probability.to_bits());
        assert_eq!(r, expected);
    }
}

#[test]
fn custom_config_changes_the_model() {
    let config = AnalyticsConfig::from_json_str(
        r#"{
            "equipment": { "age_weight": 0.0, "usage_weight": 0.0, "overdue_weight": 1.0 },
            "cash_flow": { "ar_collection_rates": [1.0, 1.0, 1.0, 1.0] }
        }"#,
    )
    .unwrap();

    let equipment = EquipmentFailurePredictor::new(config.equipment.clone());
    let r = equipment
        .predict(&EquipmentSnapshot {
            age_months: 200,
            usage_hours: 20_000.0,
            maintenance_count: 0,
            days_since_last_service: 45,
            expected_service_interval_days: 90,
        })
        .unwrap();
    assert!(approx(r.probability, 0.25, 1e-12));
    assert_eq!(r.risk, Risk::Medium);

    let cash = CashFlowForecaster::new(config.cash_flow.clone());
    let f = cash
        .forecast(&CashFlowForecastInput {
            current_cash: 0.0,
            ar_aging: AgingBuckets {
                days90_plus: 300.0,
                ..AgingBuckets::default()
            },
            ap_aging: AgingBuckets::default(),
            monthly_burn_rate: 0.0,
        })
        .unwrap();
    assert!(approx(f.ending_cash(), 300.0, 1e-9));
}

#[test]
fn dashboard_batch_for_one_tenant() {
    buildops_observability::init_with_default_filter("debug");

    let tenant_id = TenantId::new();
    let scheduler = LocalScheduler::for_tenant(tenant_id);

    let budget = InsightJob::new(
        tenant_id,
        BudgetOverrunPredictor::default(),
        ProjectBudgetSnapshot {
            budget: 250_000.0,
            actual_cost: 100_000.0,
            completion_pct: 0.5,
        },
    );
    let safety = InsightJob::new(
        tenant_id,
        SafetyRiskScorer::default(),
        SafetyMetricsSnapshot {
            incident_count: 6,
            severe_incident_count: 2,
            avg_inspection_score: 72.0,
            cert_gap_count: 3,
            days_since_last_incident: 12,
            project_count: 2,
        },
    );

    let b = scheduler.run(&budget).unwrap();
    assert_eq!(b.risk, Some(Risk::Low));
    assert_eq!(budget.input().budget, 250_000.0);

    let s = scheduler.run(&safety).unwrap();
    // 60*0.30 + 50*0.25 + 28*0.20 + 45*0.15 + 100*0.10 = 52.85
    assert_eq!(s.score, 53.0);
    assert_eq!(s.risk, Some(Risk::High));
    assert_eq!(s.metadata["factors"].as_array().map(Vec::len), Some(5));

    let foreign = LocalScheduler::new(TenantScope::Tenant(TenantId::new()));
    assert!(matches!(foreign.run(&budget), Err(AnalyticsError::TenantScope(_))));
}
